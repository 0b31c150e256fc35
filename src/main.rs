//! Neptune Paper Wallet - printable wallet generator driving neptune-cli
//!
//! # WARNING
//! - The generated files contain a live recovery phrase. Keep them offline.
//! - Funds received with off-chain UTXO notifications cannot be recovered
//!   from the mnemonic alone.

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::Parser;
use tracing::error;

// Use the library crate
use neptune_paper_wallet::cli::commands;
use neptune_paper_wallet::config::{Config, Overrides};
use neptune_paper_wallet::Error;

/// Generate a fresh Neptune wallet and print it as a paper wallet
#[derive(Parser)]
#[command(name = "paper-wallet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "paper-wallet.toml")]
    config: String,

    /// Write the printable HTML page
    #[arg(long, env = "WRITE_HTML", value_parser = BoolishValueParser::new())]
    write: bool,

    /// Shorthand for --network test
    #[arg(long)]
    testnet: bool,

    /// Network name passed to neptune-cli
    #[arg(long, env = "NETWORK")]
    network: Option<String>,

    /// Number of receiving addresses (clamped to 1..=50)
    #[arg(long, env = "NUM_ADDRESSES", allow_negative_numbers = true)]
    count: Option<i64>,

    /// Base URL for short-code QR targets; enables the resolver assets
    #[arg(long, env = "QR_BASE_URL")]
    qr_base_url: Option<String>,

    /// Output directory (default: ./paper-wallet/output)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Explicit neptune-cli binary
    #[arg(long, env = "NEPTUNE_CLI_PATH")]
    cli_path: Option<PathBuf>,

    /// Keep the neptune-cli data directory after a successful run
    #[arg(long)]
    keep_data_dir: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    show_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("neptune_paper_wallet=info".parse()?)
                .add_directive("paper_wallet=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let mut config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let overrides = Overrides {
        network: cli.network,
        testnet: cli.testnet,
        count: cli.count,
        write_html: cli.write,
        qr_base_url: cli.qr_base_url,
        out_dir: cli.out_dir,
        cli_path: cli.cli_path,
        keep_data_dir: cli.keep_data_dir,
    };
    if let Err(e) = config.apply_overrides(overrides) {
        error!("Invalid options: {:#}", e);
        std::process::exit(1);
    }

    let result = if cli.show_config {
        commands::show_config(&config)
    } else {
        commands::generate(&config).await
    };

    if let Err(e) = result {
        error!("Command failed: {:#}", e);
        if let Some(hint) = e.downcast_ref::<Error>().and_then(Error::hint) {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }

    Ok(())
}
