//! Neptune Paper Wallet Library
//!
//! Drives `neptune-cli` to create a wallet and turns the result into
//! printable artifacts: text files, an HTML paper wallet and an optional
//! short-code QR resolver.

pub mod artifact;
pub mod cli;
pub mod config;
pub mod error;
pub mod neptune;
pub mod wallet;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
