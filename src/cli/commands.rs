//! CLI command implementations

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{info, warn};

use crate::artifact::{
    library_source, write_artifacts, ArtifactOptions, OutputLayout, QrLibrarySource, RunStamp,
    WrittenArtifacts,
};
use crate::config::Config;
use crate::neptune::{Locator, NeptuneCli, WalletCli};
use crate::wallet::{collect_session, Network, WalletSession};

/// Generate a paper wallet with the real neptune-cli
pub async fn generate(config: &Config) -> Result<()> {
    let cwd = std::env::current_dir().context("Cannot determine current directory")?;
    if config.resolver_skipped() {
        warn!("qr base_url is set but HTML output is disabled; no resolver will be written");
    }

    let program = Locator::from_process(config.neptune.cli_path.clone()).locate()?;
    let layout = OutputLayout::new(config.out_root(&cwd), RunStamp::now());
    let data_dir = layout.prepare()?;
    info!("Output directory: {}", layout.root().display());

    let cli = NeptuneCli::new(program, data_dir);
    let qr_source = library_source(
        config.qr.fetch_library,
        &config.qr.library_url,
        Duration::from_millis(config.qr.fetch_timeout_ms),
    );

    let written = generate_with(config, cli, &layout, qr_source.as_ref()).await?;

    println!("\nWrote files:");
    for path in written.paths() {
        println!("- {}", path.display());
    }
    if written.html_file.is_none() {
        warn!("Skipped writing HTML. Pass --write or set WRITE_HTML=1 to save a printable file.");
    }

    Ok(())
}

/// Run the session against any [`WalletCli`] and write the artifacts
///
/// `layout.prepare()` must already have created the data directory.
pub async fn generate_with<C>(
    config: &Config,
    cli: C,
    layout: &OutputLayout,
    qr_source: &dyn QrLibrarySource,
) -> Result<WrittenArtifacts>
where
    C: WalletCli + Send + 'static,
{
    let network = Network::new(&config.wallet.network);
    let count = config.wallet.count;

    // neptune-cli calls block; keep them off the async workers
    let session = tokio::task::spawn_blocking(move || collect_session(&cli, &network, count))
        .await
        .context("Wallet session task failed")??;

    print_summary(&session);

    let options = ArtifactOptions {
        write_html: config.output.write_html,
        qr_base_url: config.qr.base_url.clone(),
    };
    let written = write_artifacts(&session, layout, &options, qr_source).await?;

    if !config.output.keep_data_dir {
        let data_dir = layout.data_dir();
        match std::fs::remove_dir_all(&data_dir) {
            Ok(()) => info!("Removed wallet data directory {}", data_dir.display()),
            Err(e) => warn!("Could not remove {}: {}", data_dir.display(), e),
        }
    }

    Ok(written)
}

/// Console summary; the mnemonic goes to stdout only, never to the log
fn print_summary(session: &WalletSession) {
    println!("------------------------------");
    println!("Network: {}", session.network);
    println!("Address(es):");
    for (i, address) in session.addresses.iter().enumerate() {
        println!("#{} {}", i, address);
    }
    println!("Seed phrase ({} words):", session.mnemonic.words().len());
    for (n, word) in session.mnemonic.numbered() {
        println!("{}. {}", n, word);
    }
    println!("------------------------------");

    println!("\nIMPORTANT - Recovery limitations:");
    println!("- Mnemonic + blockchain can recover funds received with ON-CHAIN UTXO notifications.");
    println!("- OFF-CHAIN UTXO notifications require additional incoming randomness (transfer file) that is not derivable from the mnemonic.");
    println!("- If you expect off-chain transfers, ensure you obtain the transfer file(s) or consolidate to yourself via an on-chain notification.");
}

/// Show the effective configuration
pub fn show_config(config: &Config) -> Result<()> {
    println!("{}", config.display());
    Ok(())
}
