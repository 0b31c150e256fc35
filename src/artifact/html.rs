//! Printable HTML paper wallet
//!
//! The page is self-contained: styles and scripts are inline and nothing is
//! loaded from the network when it is opened. QR codes only render if the
//! QR library was inlined at generation time.

use crate::error::Result;
use crate::wallet::types::{Address, Mnemonic, Network};

use super::layout::RunStamp;
use super::qr_library::QrLibrary;
use super::Checksums;

/// Everything the page shows
pub struct PaperWalletPage<'a> {
    pub network: &'a Network,
    pub stamp: &'a RunStamp,
    pub mnemonic: &'a Mnemonic,
    pub addresses: &'a [Address],
    /// QR payload per address (short-code URL or the address itself)
    pub qr_targets: &'a [String],
    pub mnemonic_file: &'a str,
    pub addresses_file: &'a str,
    pub checksums: &'a Checksums,
    pub qr_library: &'a QrLibrary,
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON string literal that is safe inside a <script> element
fn script_literal(value: &str) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Keep inlined third-party source from closing our <script> early
fn inline_script(source: &str) -> String {
    source.replace("</script", "<\\/script")
}

pub fn render_paper_wallet(page: &PaperWalletPage<'_>) -> Result<String> {
    let network = escape_html(page.network.as_str());
    let stamp = escape_html(page.stamp.as_str());

    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!doctype html>\n<html>\n  <head>\n");
    html.push_str("    <meta charset=\"utf-8\" />\n");
    html.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
    html.push_str(&format!(
        "    <title>Neptune Paper Wallet - {} - {}</title>\n",
        network, stamp
    ));
    html.push_str(STYLE);
    html.push_str("  </head>\n  <body>\n    <div class=\"container\">\n");

    // Header
    html.push_str(&format!(
        r#"      <header>
        <div class="title">
          <h1>Neptune Paper Wallet</h1>
          <div class="sub">Network: <span class="kbd">{network}</span> &middot; Timestamp: <span class="kbd">{stamp}</span></div>
        </div>
        <div class="actions">
          <button class="btn primary" onclick="window.print()">Print</button>
          <a class="btn" href="{addresses_file}" download>Download addresses.txt</a>
          <a class="btn" href="{mnemonic_file}" download>Download mnemonic.txt</a>
          <button class="btn" onclick="downloadHtml()">Download this HTML</button>
        </div>
      </header>

      <div class="panel warning" style="margin-bottom:16px">
        <strong>Security Notice:</strong> Keep this page and files offline and private. Anyone with the seed phrase can spend your funds.
      </div>
"#,
        network = network,
        stamp = stamp,
        addresses_file = escape_html(page.addresses_file),
        mnemonic_file = escape_html(page.mnemonic_file),
    ));

    if !page.qr_library.is_available() {
        html.push_str(
            r#"
      <div class="panel notice" id="qr-offline" style="margin-bottom:16px">
        <strong>QR codes unavailable:</strong> the QR library could not be fetched when this page was generated. Copy or transcribe the addresses manually.
      </div>
"#,
        );
    }

    // Addresses and seed phrase
    html.push_str(
        r#"
      <div class="grid">
        <section class="panel">
          <h2>Receive Address(es)</h2>
          <div class="muted" style="margin-bottom:6px">Share these addresses to receive funds.</div>
"#,
    );
    for (i, address) in page.addresses.iter().enumerate() {
        let target = page
            .qr_targets
            .get(i)
            .map(String::as_str)
            .unwrap_or(address.as_str());
        html.push_str(&format!(
            r#"          <div class="addr-item">
            <div class="row" style="justify-content:space-between">
              <div><strong>#{i}:</strong></div>
              <div class="row">
                <button class="btn" data-copy="{addr}" onclick="copyAddress(this.dataset.copy)">Copy</button>
                <button class="btn" data-qr="{target}" onclick="toggleQR(this.dataset.qr, 'qr-{i}', this)">Show QR</button>
              </div>
            </div>
            <div class="mono address">{addr}</div>
            <div id="qr-{i}" class="panel" style="display:none; margin-top:10px; padding:12px"></div>
          </div>
"#,
            i = i,
            addr = escape_html(address.as_str()),
            target = escape_html(target),
        ));
    }
    html.push_str(
        r#"        </section>

        <section class="panel">
          <div class="row" style="justify-content:space-between">
            <h2 style="margin-bottom:6px">Seed Phrase (18 words)</h2>
            <div class="row">
              <button class="btn success" onclick="copySeed()">Copy</button>
            </div>
          </div>
          <div class="seed mono">
"#,
    );
    for (n, word) in page.mnemonic.numbered() {
        html.push_str(&format!("            {}. {}<br/>\n", n, escape_html(word)));
    }
    html.push_str(
        r#"          </div>
          <div class="muted" style="margin-top:10px">Write this down carefully. Do not store digitally unless encrypted and offline.</div>
        </section>
      </div>
"#,
    );

    // Recovery, restore, integrity
    html.push_str(RECOVERY_LIMITATIONS);
    html.push_str(&format!(
        r#"
      <section class="panel" style="margin-top:16px">
        <h2>Restore Instructions</h2>
        <ol>
          <li>Run <span class="mono">neptune-cli import-seed-phrase --network {network}</span> and enter the 18 words in order.</li>
          <li>Verify an address: <span class="mono">neptune-cli nth-receiving-address 0 --network {network}</span>.</li>
          <li>Compare with the address shown above. If mismatched, stop and re-try import.</li>
        </ol>
      </section>

      <section class="panel" style="margin-top:16px">
        <h2>File Integrity</h2>
        <div class="muted">Use these checksums to verify exported files:</div>
        <div class="mono" style="margin-top:8px">
          {mnemonic_file} &mdash; SHA-256: {mnemonic_sha}<br/>
          {addresses_file} &mdash; SHA-256: {addresses_sha}
        </div>
      </section>

      <footer>
        Generated by Neptune tools &middot; {stamp}
      </footer>
    </div>
"#,
        network = network,
        stamp = stamp,
        mnemonic_file = escape_html(page.mnemonic_file),
        addresses_file = escape_html(page.addresses_file),
        mnemonic_sha = page.checksums.mnemonic_sha256,
        addresses_sha = page.checksums.addresses_sha256,
    ));

    // Scripts
    html.push_str("\n    <script>\n");
    match page.qr_library {
        QrLibrary::Inline(source) => {
            html.push_str(&inline_script(source));
            html.push('\n');
        }
        QrLibrary::Unavailable => {
            html.push_str(
                "      // QRCode library unavailable (offline at generation time). Show QR falls back to an alert.\n",
            );
        }
    }
    html.push_str(&format!(
        "      const PAGE_TIMESTAMP = {};\n      const SEED_ONE_LINE = {};\n",
        script_literal(page.stamp.as_str())?,
        script_literal(&page.mnemonic.phrase())?
    ));
    html.push_str(SCRIPT);
    html.push_str("    </script>\n  </body>\n</html>\n");

    Ok(html)
}

const STYLE: &str = r#"    <style>
      :root { --bg: #0b0c10; --panel: #12151a; --text: #e5e7eb; --muted: #9aa3af; --accent: #4f46e5; --accent-2: #22c55e; --warn: #ef4444; --border: #2a2f3a; }
      @media (prefers-color-scheme: light) {
        :root { --bg: #f6f7f9; --panel: #ffffff; --text: #0b1220; --muted: #4b5563; --border: #e5e7eb; }
      }
      * { box-sizing: border-box; }
      body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; color: var(--text); background: var(--bg); }
      .container { max-width: 980px; margin: 0 auto; padding: 24px; }
      header { display: flex; align-items: center; justify-content: space-between; gap: 12px; margin-bottom: 16px; }
      .title { display: flex; flex-direction: column; gap: 6px; }
      h1 { margin: 0; font-size: 24px; }
      .sub { color: var(--muted); font-size: 13px; }
      .actions { display: flex; flex-wrap: wrap; gap: 8px; }
      .btn { appearance: none; border: 1px solid var(--border); background: transparent; color: var(--text); padding: 8px 12px; border-radius: 8px; cursor: pointer; font-weight: 600; font-size: 13px; text-decoration: none; display: inline-flex; align-items: center; gap: 8px; }
      .btn.primary { border-color: transparent; background: var(--accent); color: white; }
      .btn.success { border-color: transparent; background: var(--accent-2); color: #062a19; }
      .grid { display: grid; grid-template-columns: 1fr; gap: 16px; }
      @media (min-width: 900px) { .grid { grid-template-columns: 1.1fr 0.9fr; } }
      .panel { background: var(--panel); border: 1px solid var(--border); border-radius: 14px; padding: 18px; }
      .panel h2 { margin-top: 0; font-size: 18px; }
      .warning { border-left: 4px solid var(--warn); }
      .notice { border-left: 4px solid var(--accent); }
      .mono { font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; }
      .seed { font-size: 14px; line-height: 1.9; column-count: 2; column-gap: 24px; }
      @media (max-width: 640px) { .seed { column-count: 1; } }
      .addr-item { padding: 8px 0; border-bottom: 1px dashed var(--border); }
      .addr-item:last-child { border-bottom: 0; }
      .kbd { font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; padding: 2px 6px; border-radius: 6px; border: 1px solid var(--border); }
      footer { margin-top: 18px; color: var(--muted); font-size: 12px; text-align: center; }
      .muted { color: var(--muted); }
      .row { display: flex; gap: 8px; flex-wrap: wrap; align-items: center; }
      .address { word-break: break-all; overflow-wrap: anywhere; line-height: 1.6; }
      @media print {
        body { background: white; color: black; }
        header .actions, .btn, .notice { display: none; }
      }
    </style>
"#;

const RECOVERY_LIMITATIONS: &str = r#"
      <section class="panel" style="margin-top:16px">
        <h2>Important - Recovery Limitations</h2>
        <ul>
          <li>Mnemonic + blockchain can recover funds received with <strong>on-chain UTXO notifications</strong> (ciphertexts embedded on-chain).</li>
          <li>Funds received via <strong>off-chain UTXO notifications</strong> require additional data (incoming randomness) that is <em>not</em> derivable from the mnemonic.</li>
          <li>If you expect off-chain transfers, ensure you obtain the transfer file(s) or consolidate to yourself via an on-chain notification.</li>
        </ul>
      </section>
"#;

const SCRIPT: &str = r#"      async function copyText(text) {
        if (navigator.clipboard && navigator.clipboard.writeText) {
          await navigator.clipboard.writeText(text);
        } else {
          const ta = document.createElement('textarea');
          ta.value = text; document.body.appendChild(ta); ta.select();
          document.execCommand('copy'); document.body.removeChild(ta);
        }
      }
      async function copySeed() {
        try { await copyText(SEED_ONE_LINE); alert('Seed phrase copied to clipboard.'); }
        catch (e) { alert('Copy failed: ' + (e && e.message ? e.message : e)); }
      }
      async function copyAddress(addr) {
        try { await copyText(addr); alert('Address copied.'); }
        catch (e) { alert('Copy failed: ' + e); }
      }
      function toggleQR(textToEncode, elId, btnEl) {
        const el = document.getElementById(elId);
        if (!el) return;
        const isHidden = el.style.display === 'none' || !el.style.display;
        if (isHidden) {
          el.innerHTML = '';
          if (!window.QRCode) { alert('QR library not embedded (generation was offline).'); return; }
          try {
            new QRCode(el, { text: textToEncode, width: 256, height: 256, correctLevel: QRCode.CorrectLevel.L });
          } catch (e) {
            el.textContent = 'Unable to render QR. Content too large. Configure QR_BASE_URL to use a short code.';
          }
          el.style.display = 'block';
          if (btnEl) btnEl.textContent = 'Hide QR';
        } else {
          el.style.display = 'none';
          el.innerHTML = '';
          if (btnEl) btnEl.textContent = 'Show QR';
        }
      }
      function downloadHtml() {
        const blob = new Blob([document.documentElement.outerHTML], { type: 'text/html' });
        const url = URL.createObjectURL(blob);
        const a = document.createElement('a');
        a.href = url;
        a.download = 'paper-wallet-' + PAGE_TIMESTAMP + '.html';
        document.body.appendChild(a);
        a.click();
        a.remove();
        URL.revokeObjectURL(url);
      }
"#;
