//! Short codes and the static QR resolver
//!
//! A full address makes a dense QR code. With a base URL configured, the
//! paper wallet prints `<base>/<code>` instead and a small static page maps
//! the code back to the address using `codes.json` next to it.
//!
//! Codes are a convenience for scanning, not a secret. The index prefix keeps
//! them unique within a run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::{Error, Result};
use crate::wallet::types::Address;

use super::writer::replace_file;

/// Characters of the base64url hash kept in a code
pub const SHORT_HASH_LEN: usize = 10;

/// `{index}-{first 10 chars of base64url(sha256(address))}`
pub fn short_code(address: &Address, index: usize) -> String {
    let digest = Sha256::digest(address.as_str().as_bytes());
    let encoded = URL_SAFE_NO_PAD.encode(digest);
    format!("{}-{}", index, &encoded[..SHORT_HASH_LEN])
}

/// Join a base URL and a code with exactly one `/`
pub fn join_url(base: &str, code: &str) -> String {
    if base.is_empty() {
        code.to_string()
    } else if base.ends_with('/') {
        format!("{}{}", base, code)
    } else {
        format!("{}/{}", base, code)
    }
}

/// One printed short code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortCode {
    pub code: String,
    pub address: Address,
    /// What the QR code encodes
    pub target: String,
}

/// Codes for every address, in address order
pub fn build_short_codes(addresses: &[Address], base_url: &str) -> Result<Vec<ShortCode>> {
    let mut seen: BTreeMap<String, &Address> = BTreeMap::new();
    let mut codes = Vec::with_capacity(addresses.len());

    for (index, address) in addresses.iter().enumerate() {
        let code = short_code(address, index);
        if let Some(existing) = seen.insert(code.clone(), address) {
            return Err(Error::ShortCodeCollision {
                code,
                existing: existing.to_string(),
                address: address.to_string(),
            });
        }
        codes.push(ShortCode {
            target: join_url(base_url, &code),
            code,
            address: address.clone(),
        });
    }

    Ok(codes)
}

/// Files written for the resolver
#[derive(Debug, Clone)]
pub struct ResolverAssets {
    pub codes_json: PathBuf,
    pub index_html: PathBuf,
    /// Entries in codes.json after the merge
    pub entries: usize,
}

/// Write `codes.json` and `index.html` into `resolver_dir`
///
/// Entries from earlier runs are kept so their printed codes still resolve.
/// A code already mapped to a different address is an error.
pub fn write_resolver_assets(resolver_dir: &Path, codes: &[ShortCode]) -> Result<ResolverAssets> {
    std::fs::create_dir_all(resolver_dir)?;
    let codes_json = resolver_dir.join("codes.json");
    let index_html = resolver_dir.join("index.html");

    let mut mapping = load_mapping(&codes_json)?;
    for entry in codes {
        if let Some(existing) = mapping.get(&entry.code) {
            if existing.as_str() != entry.address.as_str() {
                return Err(Error::ShortCodeCollision {
                    code: entry.code.clone(),
                    existing: existing.clone(),
                    address: entry.address.to_string(),
                });
            }
        }
        mapping.insert(entry.code.clone(), entry.address.to_string());
    }

    replace_file(&codes_json, &serde_json::to_string_pretty(&mapping)?)?;
    replace_file(&index_html, RESOLVER_INDEX_HTML)?;
    info!(
        "Wrote resolver assets to {} ({} codes)",
        resolver_dir.display(),
        mapping.len()
    );

    Ok(ResolverAssets {
        codes_json,
        index_html,
        entries: mapping.len(),
    })
}

fn load_mapping(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| Error::ResolverMapCorrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

const RESOLVER_INDEX_HTML: &str = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Neptune QR Resolver</title>
    <style>
      body{font-family:system-ui,-apple-system,Segoe UI,Roboto,Arial,sans-serif;padding:24px;margin:0}
      .container{max-width:720px;margin:0 auto}
      .panel{border:1px solid #e5e7eb;border-radius:12px;padding:16px}
      .row{display:flex;gap:8px;align-items:center;flex-wrap:wrap}
      .btn{appearance:none;border:1px solid #e5e7eb;padding:8px 12px;border-radius:8px;cursor:pointer;font-weight:600}
      .mono{font-family:ui-monospace,SFMono-Regular,Menlo,Consolas,monospace;word-break:break-all;margin:8px 0}
      .muted{color:#6b7280;margin-top:8px}
    </style>
  </head>
  <body>
    <div class="container">
      <h1>Neptune QR Resolver</h1>
      <div id="status" class="panel">Resolving...</div>
    </div>
    <script>
      (async function () {
        const code = (location.hash.slice(1) || location.pathname.split('/').filter(Boolean).pop() || '').trim();
        const status = document.getElementById('status');
        try {
          const res = await fetch('codes.json', { cache: 'no-cache' });
          const map = await res.json();
          const addr = map[code];
          if (!addr) { status.textContent = 'Unknown code'; return; }
          status.textContent = '';
          const title = document.createElement('strong');
          title.textContent = 'Address';
          const value = document.createElement('div');
          value.className = 'mono';
          value.textContent = addr;
          const btn = document.createElement('button');
          btn.className = 'btn';
          btn.textContent = 'Copy';
          btn.onclick = async () => {
            try {
              await navigator.clipboard.writeText(addr);
              btn.textContent = 'Copied';
              setTimeout(() => { btn.textContent = 'Copy'; }, 1200);
            } catch (e) { alert('Copy failed'); }
          };
          const note = document.createElement('div');
          note.className = 'muted';
          note.textContent = 'This page is local-only and does not transmit your address.';
          status.append(title, value, btn, note);
        } catch (e) {
          status.textContent = 'Failed to resolve code.';
        }
      })();
    </script>
  </body>
</html>
"#;
