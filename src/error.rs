//! Error types for the paper wallet generator

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using our custom Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the paper wallet generator
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // neptune-cli discovery and invocation
    #[error("Could not locate neptune-cli (tried {tried} candidates)")]
    BinaryNotFound { tried: usize },

    #[error("Failed to spawn {program}: {reason}")]
    Spawn { program: String, reason: String },

    #[error("Command failed ({status}): {command}\n{stdout}\n{stderr}")]
    NonZeroExit {
        status: String,
        command: String,
        stdout: String,
        stderr: String,
    },

    // Output parsing errors
    #[error("Failed to parse 18-word seed phrase from neptune-cli output: {0}")]
    MnemonicParse(String),

    #[error("neptune-cli printed no address")]
    EmptyAddress,

    // Artifact errors
    #[error("Refusing to overwrite existing artifact: {}", .0.display())]
    ArtifactExists(PathBuf),

    #[error("Short code collision: {code} maps to both {existing} and {address}")]
    ShortCodeCollision {
        code: String,
        existing: String,
        address: String,
    },

    #[error("Resolver map {} is unreadable: {reason}", .path.display())]
    ResolverMapCorrupt { path: PathBuf, reason: String },

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl Error {
    /// Guidance shown to the user next to the error, if any
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Error::BinaryNotFound { .. } => Some(
                "Set NEPTUNE_CLI_PATH to the neptune-cli binary, or build neptune-core first.",
            ),
            Error::MnemonicParse(_) | Error::EmptyAddress => {
                Some("neptune-cli output did not match the expected format; check its version.")
            }
            Error::ArtifactExists(_) => {
                Some("Artifacts are never overwritten. Move the old files or pick another --out-dir.")
            }
            Error::ResolverMapCorrupt { .. } => Some(
                "Earlier short codes live in resolver/codes.json. Repair it by hand or pick another --out-dir.",
            ),
            _ => None,
        }
    }
}

// Conversion from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

// Conversion from I/O errors
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}
