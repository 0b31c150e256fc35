//! Configuration loading and validation

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Smallest number of addresses derived per run
pub const MIN_ADDRESSES: u32 = 1;

/// Largest number of addresses derived per run
pub const MAX_ADDRESSES: u32 = 50;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub qr: QrConfig,
    #[serde(default)]
    pub neptune: NeptuneConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    /// Network passed to every neptune-cli call ("main", "test", ...)
    #[serde(default = "default_network")]
    pub network: String,
    /// Number of receiving addresses to derive, clamped to 1..=50
    #[serde(default = "default_count")]
    pub count: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Output root; relative paths resolve against the current directory
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Emit the printable HTML page
    #[serde(default)]
    pub write_html: bool,
    /// Keep the neptune-cli data directory after a successful run
    #[serde(default)]
    pub keep_data_dir: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QrConfig {
    /// Enables short codes and the resolver assets
    #[serde(default)]
    pub base_url: Option<String>,
    /// Try to inline the QR rendering library into the HTML
    #[serde(default = "default_true")]
    pub fetch_library: bool,
    #[serde(default = "default_library_url")]
    pub library_url: String,
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NeptuneConfig {
    /// Explicit neptune-cli location, used only if the file exists
    #[serde(default)]
    pub cli_path: Option<PathBuf>,
}

/// Values given on the command line (or their unprefixed env equivalents)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub network: Option<String>,
    pub testnet: bool,
    pub count: Option<i64>,
    pub write_html: bool,
    pub qr_base_url: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub cli_path: Option<PathBuf>,
    pub keep_data_dir: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            count: default_count(),
        }
    }
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            fetch_library: true,
            library_url: default_library_url(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

fn default_network() -> String {
    "main".to_string()
}

fn default_count() -> u32 {
    MIN_ADDRESSES
}

fn default_true() -> bool {
    true
}

fn default_library_url() -> String {
    "https://cdnjs.cloudflare.com/ajax/libs/qrcodejs/1.0.0/qrcode.min.js".to_string()
}

fn default_fetch_timeout_ms() -> u64 {
    4000
}

/// Clamp a requested address count into 1..=50
pub fn clamp_count(requested: i64) -> u32 {
    requested.clamp(MIN_ADDRESSES as i64, MAX_ADDRESSES as i64) as u32
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from file and environment variables
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            // Start with defaults
            .set_default("wallet.network", default_network())?
            .set_default("wallet.count", default_count() as i64)?
            .set_default("qr.fetch_timeout_ms", default_fetch_timeout_ms() as i64)?
            // Load from file if exists
            .add_source(config::File::from(path).required(false))
            // Override with environment variables (prefix PAPER_WALLET_)
            .add_source(
                config::Environment::with_prefix("PAPER_WALLET")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let mut config: Config = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.normalize();
        config.validate()?;

        Ok(config)
    }

    /// Apply command-line values on top of the loaded configuration
    pub fn apply_overrides(&mut self, overrides: Overrides) -> Result<()> {
        if let Some(network) = non_empty(overrides.network) {
            self.wallet.network = network;
        }
        // --testnet wins over --network / NETWORK
        if overrides.testnet {
            self.wallet.network = "test".to_string();
        }
        if let Some(count) = overrides.count {
            self.wallet.count = clamp_count(count);
        }
        if overrides.write_html {
            self.output.write_html = true;
        }
        if overrides.keep_data_dir {
            self.output.keep_data_dir = true;
        }
        if let Some(url) = non_empty(overrides.qr_base_url) {
            self.qr.base_url = Some(url);
        }
        if let Some(dir) = overrides.out_dir.filter(|d| !d.as_os_str().is_empty()) {
            self.output.dir = Some(dir);
        }
        if let Some(path) = overrides.cli_path.filter(|p| !p.as_os_str().is_empty()) {
            self.neptune.cli_path = Some(path);
        }

        self.normalize();
        self.validate()
    }

    fn normalize(&mut self) {
        self.wallet.network = self.wallet.network.trim().to_lowercase();
        self.wallet.count = clamp_count(self.wallet.count as i64);
        self.qr.base_url = non_empty(self.qr.base_url.take());
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        let network = &self.wallet.network;
        if network.is_empty() {
            anyhow::bail!("network must not be empty");
        }
        if !network.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            anyhow::bail!("Invalid network name: {}", network);
        }

        if let Some(base) = &self.qr.base_url {
            let parsed = url::Url::parse(base)
                .with_context(|| format!("Invalid qr base_url: {}", base))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                anyhow::bail!("qr base_url must be http or https, got {}", parsed.scheme());
            }
        }

        if self.qr.fetch_timeout_ms == 0 {
            anyhow::bail!("qr fetch_timeout_ms must be positive");
        }

        Ok(())
    }

    /// A QR base URL only takes effect together with HTML output
    pub fn resolver_skipped(&self) -> bool {
        self.qr.base_url.is_some() && !self.output.write_html
    }

    /// Resolve the output root against the given working directory
    pub fn out_root(&self, cwd: &Path) -> PathBuf {
        match &self.output.dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd.join("paper-wallet").join("output"),
        }
    }

    /// Effective configuration for display
    pub fn display(&self) -> String {
        format!(
            r#"Configuration:
  Wallet:
    network: {}
    count: {}
  Output:
    dir: {}
    write_html: {}
    keep_data_dir: {}
  QR:
    base_url: {}
    fetch_library: {}
    library_url: {}
    fetch_timeout: {}ms
  Neptune:
    cli_path: {}
"#,
            self.wallet.network,
            self.wallet.count,
            self.output
                .dir
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| "(default)".to_string()),
            self.output.write_html,
            self.output.keep_data_dir,
            self.qr.base_url.as_deref().unwrap_or("(not set)"),
            self.qr.fetch_library,
            self.qr.library_url,
            self.qr.fetch_timeout_ms,
            self.neptune
                .cli_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(auto)".to_string()),
        )
    }
}
