//! Synchronous neptune-cli invocation

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};
use crate::wallet::types::Network;

/// The three neptune-cli operations a paper wallet run needs
pub trait WalletCli {
    /// Create a fresh wallet for the network
    fn generate_wallet(&self, network: &Network) -> Result<()>;

    /// Raw output of `export-seed-phrase`
    fn export_seed_phrase(&self, network: &Network) -> Result<String>;

    /// Raw output of `nth-receiving-address` for a zero-based index
    fn nth_receiving_address(&self, network: &Network, index: u32) -> Result<String>;
}

/// Optional process overrides
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

/// Run a program to completion and return its trimmed stdout
///
/// Spawn failures map to [`Error::Spawn`]; a non-zero exit maps to
/// [`Error::NonZeroExit`] with both output streams attached.
pub fn run_command(program: &Path, args: &[String], options: &RunOptions) -> Result<String> {
    let command_line = format!("{} {}", program.display(), args.join(" "));
    debug!("Running: {}", command_line);

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(cwd) = &options.cwd {
        command.current_dir(cwd);
    }
    for (key, value) in &options.env {
        command.env(key, value);
    }

    let output = command.output().map_err(|e| Error::Spawn {
        program: program.display().to_string(),
        reason: e.to_string(),
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        let status = output
            .status
            .code()
            .map(|code| code.to_string())
            .unwrap_or_else(|| output.status.to_string());
        return Err(Error::NonZeroExit {
            status,
            command: command_line,
            stdout,
            stderr,
        });
    }

    Ok(stdout.trim().to_string())
}

/// neptune-cli bound to one isolated data directory
#[derive(Debug, Clone)]
pub struct NeptuneCli {
    program: PathBuf,
    data_dir: PathBuf,
}

impl NeptuneCli {
    pub fn new(program: PathBuf, data_dir: PathBuf) -> Self {
        Self { program, data_dir }
    }

    /// `--data-dir` is a global flag and has to precede the subcommand
    fn build_args(&self, subcommand: &str, network: &Network, extra: &[String]) -> Vec<String> {
        let mut args = vec![
            "--data-dir".to_string(),
            self.data_dir.display().to_string(),
            subcommand.to_string(),
            "--network".to_string(),
            network.to_string(),
        ];
        args.extend_from_slice(extra);
        args
    }

    fn run(&self, subcommand: &str, network: &Network, extra: &[String]) -> Result<String> {
        let args = self.build_args(subcommand, network, extra);
        run_command(&self.program, &args, &RunOptions::default())
    }
}

impl WalletCli for NeptuneCli {
    fn generate_wallet(&self, network: &Network) -> Result<()> {
        self.run("generate-wallet", network, &[]).map(|_| ())
    }

    fn export_seed_phrase(&self, network: &Network) -> Result<String> {
        self.run("export-seed-phrase", network, &[])
    }

    fn nth_receiving_address(&self, network: &Network, index: u32) -> Result<String> {
        self.run("nth-receiving-address", network, &[index.to_string()])
    }
}
