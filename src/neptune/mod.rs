//! neptune-cli integration
//!
//! Everything that touches the external wallet binary lives here:
//! finding it, running it, and reading its text output.
//!
//! # Output contract
//!
//! - `export-seed-phrase` prints 18 lines of the form `<n>. <word>`
//! - `nth-receiving-address` prints the address as its last non-empty line
//! - success is exit code 0

pub mod locator;
pub mod parser;
pub mod runner;

pub use locator::{Candidate, Locator, CLI_NAME};
pub use parser::{parse_address, parse_mnemonic};
pub use runner::{run_command, NeptuneCli, RunOptions, WalletCli};
