//! Turning a wallet session into files on disk
//!
//! Order matters: the two text files are written first, their checksums are
//! read back from disk, and only then is the HTML (which quotes the
//! checksums) rendered and written.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::wallet::types::WalletSession;

use super::html::{render_paper_wallet, PaperWalletPage};
use super::layout::OutputLayout;
use super::qr::{build_short_codes, write_resolver_assets, ResolverAssets};
use super::qr_library::QrLibrarySource;
use super::writer::{sha256_file_hex, write_exclusive};

/// What to emit beyond the two text files
#[derive(Debug, Clone, Default)]
pub struct ArtifactOptions {
    pub write_html: bool,
    pub qr_base_url: Option<String>,
}

/// SHA-256 (hex) of the written text files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksums {
    pub mnemonic_sha256: String,
    pub addresses_sha256: String,
}

/// Files produced by one run
#[derive(Debug, Clone)]
pub struct WrittenArtifacts {
    pub mnemonic_file: PathBuf,
    pub addresses_file: PathBuf,
    pub checksums: Checksums,
    pub html_file: Option<PathBuf>,
    pub resolver: Option<ResolverAssets>,
    pub qr_library_inlined: bool,
}

impl WrittenArtifacts {
    /// Every file written, HTML first
    pub fn paths(&self) -> Vec<&Path> {
        let mut paths = Vec::new();
        if let Some(html) = &self.html_file {
            paths.push(html.as_path());
        }
        paths.push(self.mnemonic_file.as_path());
        paths.push(self.addresses_file.as_path());
        if let Some(resolver) = &self.resolver {
            paths.push(resolver.codes_json.as_path());
            paths.push(resolver.index_html.as_path());
        }
        paths
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Write all artifacts for `session` into `layout`
pub async fn write_artifacts(
    session: &WalletSession,
    layout: &OutputLayout,
    options: &ArtifactOptions,
    qr_source: &dyn QrLibrarySource,
) -> Result<WrittenArtifacts> {
    let mnemonic_file = layout.mnemonic_path();
    let addresses_file = layout.addresses_path();

    write_exclusive(&mnemonic_file, &session.mnemonic.phrase())?;
    let address_lines: Vec<&str> = session.addresses.iter().map(|a| a.as_str()).collect();
    write_exclusive(&addresses_file, &address_lines.join("\n"))?;

    let checksums = Checksums {
        mnemonic_sha256: sha256_file_hex(&mnemonic_file)?,
        addresses_sha256: sha256_file_hex(&addresses_file)?,
    };

    let mut written = WrittenArtifacts {
        mnemonic_file,
        addresses_file,
        checksums,
        html_file: None,
        resolver: None,
        qr_library_inlined: false,
    };

    if !options.write_html {
        return Ok(written);
    }

    let qr_library = qr_source.fetch().await;

    let qr_targets: Vec<String> = match &options.qr_base_url {
        Some(base_url) => {
            let codes = build_short_codes(&session.addresses, base_url)?;
            written.resolver = Some(write_resolver_assets(&layout.resolver_dir(), &codes)?);
            codes.into_iter().map(|c| c.target).collect()
        }
        None => address_lines.iter().map(|a| a.to_string()).collect(),
    };

    let mnemonic_name = file_name(&written.mnemonic_file);
    let addresses_name = file_name(&written.addresses_file);
    let html = render_paper_wallet(&PaperWalletPage {
        network: &session.network,
        stamp: layout.stamp(),
        mnemonic: &session.mnemonic,
        addresses: &session.addresses,
        qr_targets: &qr_targets,
        mnemonic_file: &mnemonic_name,
        addresses_file: &addresses_name,
        checksums: &written.checksums,
        qr_library: &qr_library,
    })?;

    let html_file = layout.html_path();
    write_exclusive(&html_file, &html)?;
    info!("Wrote paper wallet {}", html_file.display());

    written.html_file = Some(html_file);
    written.qr_library_inlined = qr_library.is_available();
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::layout::RunStamp;
    use crate::artifact::qr::short_code;
    use crate::artifact::qr_library::{NoQrLibrary, QrLibrary};
    use crate::error::Error;
    use crate::wallet::session::collect_session;
    use crate::wallet::session::tests::{FakeCli, SEED_WORDS};
    use crate::wallet::types::Network;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    struct FixedQrLibrary(&'static str);

    #[async_trait]
    impl QrLibrarySource for FixedQrLibrary {
        async fn fetch(&self) -> QrLibrary {
            QrLibrary::Inline(self.0.to_string())
        }
    }

    fn session(network: &str, addresses: &[&str]) -> WalletSession {
        let cli = FakeCli::with_addresses(addresses);
        collect_session(&cli, &Network::new(network), addresses.len() as u32).unwrap()
    }

    #[tokio::test]
    async fn test_three_addresses_with_html() {
        let dir = tempdir().unwrap();
        let layout = OutputLayout::new(dir.path().to_path_buf(), RunStamp::now());
        let session = session("test", &["addr-0", "addr-1", "addr-2"]);
        let options = ArtifactOptions {
            write_html: true,
            qr_base_url: None,
        };

        let written = write_artifacts(&session, &layout, &options, &FixedQrLibrary("var QRCode;"))
            .await
            .unwrap();

        let addresses = std::fs::read_to_string(&written.addresses_file).unwrap();
        assert_eq!(addresses, "addr-0\naddr-1\naddr-2");

        let mnemonic = std::fs::read_to_string(&written.mnemonic_file).unwrap();
        assert_eq!(mnemonic, SEED_WORDS.join(" "));
        assert_eq!(
            written.checksums.mnemonic_sha256,
            crate::artifact::writer::sha256_hex(mnemonic.as_bytes())
        );

        let html = std::fs::read_to_string(written.html_file.as_ref().unwrap()).unwrap();
        for addr in ["addr-0", "addr-1", "addr-2"] {
            assert!(html.contains(addr));
        }
        for word in SEED_WORDS {
            assert!(html.contains(word));
        }
        assert!(html.contains(&written.checksums.addresses_sha256));
        assert!(written.qr_library_inlined);
        assert!(written.resolver.is_none());
        assert_eq!(written.paths().len(), 3);
    }

    #[tokio::test]
    async fn test_text_only_without_write_flag() {
        let dir = tempdir().unwrap();
        let layout = OutputLayout::new(dir.path().to_path_buf(), RunStamp::now());
        let session = session("main", &["only"]);

        let written = write_artifacts(&session, &layout, &ArtifactOptions::default(), &NoQrLibrary)
            .await
            .unwrap();

        assert!(written.html_file.is_none());
        assert!(!layout.html_path().exists());
        assert_eq!(std::fs::read_to_string(&written.addresses_file).unwrap(), "only");
    }

    #[tokio::test]
    async fn test_resolver_mapping_for_two_addresses() {
        let dir = tempdir().unwrap();
        let layout = OutputLayout::new(dir.path().to_path_buf(), RunStamp::now());
        let session = session("main", &["first-address", "second-address"]);
        let options = ArtifactOptions {
            write_html: true,
            qr_base_url: Some("https://example.com/r".to_string()),
        };

        let written = write_artifacts(&session, &layout, &options, &NoQrLibrary)
            .await
            .unwrap();

        let resolver = written.resolver.as_ref().unwrap();
        let map: BTreeMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&resolver.codes_json).unwrap()).unwrap();
        assert_eq!(map.len(), 2);

        let code0 = short_code(&session.addresses[0], 0);
        let code1 = short_code(&session.addresses[1], 1);
        assert!(code0.starts_with("0-") && code1.starts_with("1-"));
        assert_eq!(map[&code0], "first-address");
        assert_eq!(map[&code1], "second-address");

        let html = std::fs::read_to_string(written.html_file.as_ref().unwrap()).unwrap();
        assert!(html.contains(&format!("https://example.com/r/{}", code0)));
    }

    #[tokio::test]
    async fn test_failed_library_fetch_degrades_html() {
        let dir = tempdir().unwrap();
        let layout = OutputLayout::new(dir.path().to_path_buf(), RunStamp::now());
        let session = session("test", &["addr-0"]);
        let options = ArtifactOptions {
            write_html: true,
            qr_base_url: None,
        };

        let written = write_artifacts(&session, &layout, &options, &NoQrLibrary)
            .await
            .unwrap();

        assert!(!written.qr_library_inlined);
        let html = std::fs::read_to_string(written.html_file.as_ref().unwrap()).unwrap();
        assert!(html.contains("QR codes unavailable"));
    }

    #[tokio::test]
    async fn test_same_stamp_twice_fails() {
        let dir = tempdir().unwrap();
        let layout = OutputLayout::new(dir.path().to_path_buf(), RunStamp::now());
        let session = session("test", &["addr-0"]);

        write_artifacts(&session, &layout, &ArtifactOptions::default(), &NoQrLibrary)
            .await
            .unwrap();
        let second = write_artifacts(&session, &layout, &ArtifactOptions::default(), &NoQrLibrary).await;

        assert!(matches!(second, Err(Error::ArtifactExists(_))));
    }
}
