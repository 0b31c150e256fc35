//! neptune-cli discovery
//!
//! Candidates are tried in a fixed order and the first usable one wins:
//! explicit override, next to our own executable, the `neptune-core` build
//! output (release, then debug) under a few base directories, and finally the
//! bare command name on `PATH`.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Command name of the external wallet binary
pub const CLI_NAME: &str = "neptune-cli";

/// File name of the binary on this platform
pub fn cli_file_name() -> String {
    format!("{}{}", CLI_NAME, std::env::consts::EXE_SUFFIX)
}

/// A single place neptune-cli might live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// Concrete path, usable if the file exists
    File(PathBuf),
    /// Bare command resolved through PATH, usable if `--help` succeeds
    OnPath(String),
}

impl Candidate {
    fn resolve(&self) -> Option<PathBuf> {
        match self {
            Candidate::File(path) => path.is_file().then(|| path.clone()),
            Candidate::OnPath(cmd) => probe_on_path(cmd).then(|| PathBuf::from(cmd)),
        }
    }
}

/// Locates the neptune-cli binary
#[derive(Debug, Clone)]
pub struct Locator {
    override_path: Option<PathBuf>,
    exe_dir: Option<PathBuf>,
    cwd: Option<PathBuf>,
    path_commands: Vec<String>,
}

impl Locator {
    /// Locator rooted at explicit directories
    pub fn new(override_path: Option<PathBuf>, exe_dir: Option<PathBuf>, cwd: Option<PathBuf>) -> Self {
        let mut path_commands = vec![CLI_NAME.to_string()];
        let file_name = cli_file_name();
        if file_name != CLI_NAME {
            path_commands.push(file_name);
        }

        Self {
            override_path,
            exe_dir,
            cwd,
            path_commands,
        }
    }

    /// Locator rooted at the running process (current exe and working dir)
    pub fn from_process(override_path: Option<PathBuf>) -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let cwd = std::env::current_dir().ok();
        Self::new(override_path, exe_dir, cwd)
    }

    /// Replace the bare command names probed on PATH
    pub fn with_path_commands(mut self, commands: Vec<String>) -> Self {
        self.path_commands = commands;
        self
    }

    /// All candidates in the order they are tried
    pub fn candidates(&self) -> Vec<Candidate> {
        let file_name = cli_file_name();
        let mut candidates = Vec::new();

        if let Some(path) = &self.override_path {
            candidates.push(Candidate::File(path.clone()));
        }

        if let Some(exe_dir) = &self.exe_dir {
            candidates.push(Candidate::File(exe_dir.join(&file_name)));
            candidates.push(Candidate::File(exe_dir.join("bin").join(&file_name)));
        }

        let mut bases: Vec<&Path> = Vec::new();
        if let Some(cwd) = &self.cwd {
            bases.push(cwd);
        }
        if let Some(exe_dir) = &self.exe_dir {
            bases.push(exe_dir);
            if let Some(parent) = exe_dir.parent() {
                bases.push(parent);
                if let Some(grandparent) = parent.parent() {
                    bases.push(grandparent);
                }
            }
        }
        for base in bases {
            let target = base.join("neptune-core").join("target");
            for profile in ["release", "debug"] {
                candidates.push(Candidate::File(target.join(profile).join(&file_name)));
            }
        }

        candidates.extend(self.path_commands.iter().cloned().map(Candidate::OnPath));
        candidates
    }

    /// Return the first usable candidate
    pub fn locate(&self) -> Result<PathBuf> {
        if let Some(path) = &self.override_path {
            if !path.is_file() {
                warn!("Ignoring neptune-cli override {:?}: not an existing file", path);
            }
        }

        let candidates = self.candidates();
        for candidate in &candidates {
            debug!("Trying neptune-cli candidate: {:?}", candidate);
            if let Some(path) = candidate.resolve() {
                info!("Using neptune-cli at {}", path.display());
                return Ok(path);
            }
        }

        Err(Error::BinaryNotFound {
            tried: candidates.len(),
        })
    }
}

/// Accept exit code 0, or 2 which clap-style CLIs use for usage output
fn probe_on_path(cmd: &str) -> bool {
    match Command::new(cmd)
        .arg("--help")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => matches!(status.code(), Some(0) | Some(2)),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"#!/bin/sh\n").unwrap();
    }

    fn build_output(base: &Path, profile: &str) -> PathBuf {
        base.join("neptune-core")
            .join("target")
            .join(profile)
            .join(cli_file_name())
    }

    #[test]
    fn test_existing_override_wins() {
        let dir = tempdir().unwrap();
        let override_path = dir.path().join("custom-cli");
        touch(&override_path);
        touch(&build_output(dir.path(), "release"));

        let locator = Locator::new(Some(override_path.clone()), None, Some(dir.path().to_path_buf()))
            .with_path_commands(vec![]);
        assert_eq!(locator.locate().unwrap(), override_path);
    }

    #[test]
    fn test_missing_override_is_skipped() {
        let dir = tempdir().unwrap();
        let release = build_output(dir.path(), "release");
        touch(&release);

        let locator = Locator::new(
            Some(dir.path().join("nope")),
            None,
            Some(dir.path().to_path_buf()),
        )
        .with_path_commands(vec![]);
        assert_eq!(locator.locate().unwrap(), release);
    }

    #[test]
    fn test_release_before_debug() {
        let dir = tempdir().unwrap();
        let release = build_output(dir.path(), "release");
        let debug = build_output(dir.path(), "debug");
        touch(&debug);
        touch(&release);

        let locator = Locator::new(None, None, Some(dir.path().to_path_buf())).with_path_commands(vec![]);
        assert_eq!(locator.locate().unwrap(), release);
    }

    #[test]
    fn test_adjacent_binary_beats_build_output() {
        let cwd = tempdir().unwrap();
        let exe = tempdir().unwrap();
        touch(&build_output(cwd.path(), "release"));
        let adjacent = exe.path().join("bin").join(cli_file_name());
        touch(&adjacent);

        let locator = Locator::new(None, Some(exe.path().to_path_buf()), Some(cwd.path().to_path_buf()))
            .with_path_commands(vec![]);
        assert_eq!(locator.locate().unwrap(), adjacent);
    }

    #[test]
    fn test_build_output_under_exe_grandparent() {
        let root = tempdir().unwrap();
        let exe_dir = root.path().join("tools").join("bin");
        std::fs::create_dir_all(&exe_dir).unwrap();
        let debug = build_output(root.path(), "debug");
        touch(&debug);

        let locator = Locator::new(None, Some(exe_dir), None).with_path_commands(vec![]);
        assert_eq!(locator.locate().unwrap(), debug);
    }

    #[test]
    fn test_candidate_order() {
        let locator = Locator::new(
            Some(PathBuf::from("/override")),
            Some(PathBuf::from("/opt/app/bin")),
            Some(PathBuf::from("/work")),
        )
        .with_path_commands(vec![CLI_NAME.to_string()]);

        let candidates = locator.candidates();
        assert_eq!(candidates[0], Candidate::File(PathBuf::from("/override")));
        assert_eq!(
            candidates[1],
            Candidate::File(PathBuf::from("/opt/app/bin").join(cli_file_name()))
        );
        assert_eq!(
            candidates[3],
            Candidate::File(build_output(Path::new("/work"), "release"))
        );
        assert_eq!(
            candidates.last().unwrap(),
            &Candidate::OnPath(CLI_NAME.to_string())
        );
        // override + 2 adjacent + 4 bases * 2 profiles + 1 PATH command
        assert_eq!(candidates.len(), 12);
    }

    #[test]
    fn test_not_found() {
        let dir = tempdir().unwrap();
        let locator = Locator::new(None, None, Some(dir.path().to_path_buf()))
            .with_path_commands(vec!["neptune-cli-does-not-exist-4f1c".to_string()]);

        match locator.locate() {
            Err(Error::BinaryNotFound { tried }) => assert_eq!(tried, 3),
            other => panic!("expected BinaryNotFound, got {:?}", other),
        }
    }

    #[cfg(unix)]
    fn script(dir: &Path, name: &str, code: i32) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\nexit {}\n", code)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    #[cfg(unix)]
    #[test]
    fn test_path_command_accepts_usage_exit() {
        let dir = tempdir().unwrap();
        let failing = script(dir.path(), "cli-exit-1", 1);
        let usage = script(dir.path(), "cli-exit-2", 2);

        let locator = Locator::new(None, None, Some(dir.path().to_path_buf()))
            .with_path_commands(vec![failing, usage.clone()]);
        assert_eq!(locator.locate().unwrap(), PathBuf::from(usage));
    }

    #[cfg(unix)]
    #[test]
    fn test_path_command_accepts_success_exit() {
        let dir = tempdir().unwrap();
        let ok = script(dir.path(), "cli-exit-0", 0);

        let locator = Locator::new(None, None, Some(dir.path().to_path_buf()))
            .with_path_commands(vec![ok.clone()]);
        assert_eq!(locator.locate().unwrap(), PathBuf::from(ok));
    }

    #[cfg(unix)]
    #[test]
    fn test_path_command_rejects_other_exit() {
        let dir = tempdir().unwrap();
        let failing = script(dir.path(), "cli-exit-1", 1);

        let locator = Locator::new(None, None, Some(dir.path().to_path_buf()))
            .with_path_commands(vec![failing]);
        assert!(matches!(
            locator.locate(),
            Err(Error::BinaryNotFound { tried: 3 })
        ));
    }
}
