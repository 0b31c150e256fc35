//! Wallet session module
//!
//! A session is the in-memory result of one run: network, mnemonic and the
//! derived receiving addresses. It is never persisted except through the
//! artifacts written from it.
//!
//! ```text
//! WalletCli → collect_session → WalletSession → artifact::write_artifacts
//! ```

pub mod session;
pub mod types;

pub use session::collect_session;
pub use types::{Address, Mnemonic, Network, WalletSession, MNEMONIC_WORDS};
