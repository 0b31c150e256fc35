//! Core types for a paper wallet run
//!
//! Defines the network selector, the recovery mnemonic, receiving addresses
//! and the session that ties them together.

use serde::Serialize;

use crate::error::{Error, Result};

/// Number of words in a Neptune recovery phrase
pub const MNEMONIC_WORDS: usize = 18;

/// Network name passed through to neptune-cli
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Network(String);

impl Network {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 18-word recovery phrase, kept in order (slot 0 is word #1)
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    words: Vec<String>,
}

impl Mnemonic {
    pub fn new(words: Vec<String>) -> Result<Self> {
        if words.len() != MNEMONIC_WORDS {
            return Err(Error::MnemonicParse(format!(
                "expected {} words, got {}",
                MNEMONIC_WORDS,
                words.len()
            )));
        }
        if let Some(pos) = words
            .iter()
            .position(|w| w.is_empty() || !w.chars().all(|c| c.is_ascii_lowercase()))
        {
            return Err(Error::MnemonicParse(format!(
                "word {} is not lowercase alphabetic",
                pos + 1
            )));
        }
        Ok(Self { words })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Space-joined phrase, as written to the mnemonic text file
    pub fn phrase(&self) -> String {
        self.words.join(" ")
    }

    /// (1-based position, word) pairs for display
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &str)> {
        self.words.iter().enumerate().map(|(i, w)| (i + 1, w.as_str()))
    }
}

// Never print the words through Debug (logs, panics)
impl std::fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mnemonic([redacted; {} words])", self.words.len())
    }
}

/// Opaque receiving address; only non-emptiness is checked
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref().trim();
        if value.is_empty() {
            return Err(Error::EmptyAddress);
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything collected from neptune-cli in one run
#[derive(Debug, Clone)]
pub struct WalletSession {
    pub network: Network,
    pub mnemonic: Mnemonic,
    /// Index 0 is the first derived address
    pub addresses: Vec<Address>,
}
