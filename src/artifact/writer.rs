//! File emission primitives
//!
//! Recovery material is written with create-new semantics so an existing
//! file is never clobbered. On Unix the files are readable by the owner only.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Error, Result};

/// Create `path` and write `contents`, failing if it already exists
pub fn write_exclusive(path: &Path, contents: &str) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = match options.open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(Error::ArtifactExists(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    debug!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

/// Replace `path` by writing a sibling temp file and renaming it over
///
/// Used for the shared resolver files, which are updated by every run.
pub fn replace_file(path: &Path, contents: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::Io(format!("not a file path: {}", path.display())))?;
    let tmp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
    }
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Lowercase hex SHA-256 of a byte slice
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Lowercase hex SHA-256 of a file's contents as stored on disk
pub fn sha256_file_hex(path: &Path) -> Result<String> {
    Ok(sha256_hex(&std::fs::read(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_exclusive_never_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mnemonic-x.txt");

        write_exclusive(&path, "first").unwrap();
        let second = write_exclusive(&path, "second");

        assert!(matches!(second, Err(Error::ArtifactExists(p)) if p == path));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_exclusive_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("secret.txt");
        write_exclusive(&path, "words").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }

    #[test]
    fn test_replace_file_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("codes.json");

        replace_file(&path, "{}").unwrap();
        replace_file(&path, "{\"a\":\"b\"}").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"a\":\"b\"}");
        assert!(!dir.path().join(".codes.json.tmp").exists());
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_file_matches_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("f.txt");
        write_exclusive(&path, "abc").unwrap();
        assert_eq!(sha256_file_hex(&path).unwrap(), sha256_hex(b"abc"));
    }
}
