//! Per-run file layout under the output root

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// Filesystem-safe UTC timestamp that namespaces one run
///
/// ISO-8601 with `:` and `.` replaced by `-`: `2025-01-02T03-04-05-678Z`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStamp(String);

impl RunStamp {
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.format("%Y-%m-%dT%H-%M-%S-%3fZ").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where one run puts its files
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
    stamp: RunStamp,
}

impl OutputLayout {
    pub fn new(root: PathBuf, stamp: RunStamp) -> Self {
        Self { root, stamp }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn stamp(&self) -> &RunStamp {
        &self.stamp
    }

    /// neptune-cli `--data-dir` for this run
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(format!("wallet-{}", self.stamp))
    }

    pub fn mnemonic_path(&self) -> PathBuf {
        self.root.join(format!("mnemonic-{}.txt", self.stamp))
    }

    pub fn addresses_path(&self) -> PathBuf {
        self.root.join(format!("addresses-{}.txt", self.stamp))
    }

    pub fn html_path(&self) -> PathBuf {
        self.root.join(format!("paper-wallet-{}.html", self.stamp))
    }

    /// Shared across runs; holds codes.json and index.html
    pub fn resolver_dir(&self) -> PathBuf {
        self.root.join("resolver")
    }

    /// Create the output root and a fresh, previously absent data directory
    pub fn prepare(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.root)?;

        let data_dir = self.data_dir();
        match std::fs::create_dir(&data_dir) {
            Ok(()) => Ok(data_dir),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(Error::ArtifactExists(data_dir))
            }
            Err(e) => Err(e.into()),
        }
    }
}
