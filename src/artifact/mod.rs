//! Output generation
//!
//! ```text
//! WalletSession ──► mnemonic-<ts>.txt ─┐
//!               └─► addresses-<ts>.txt ┴─► SHA-256 ─► paper-wallet-<ts>.html
//!                                      (optional) resolver/codes.json + index.html
//! ```
//!
//! Text and HTML artifacts are create-new only. The QR library fetch is the
//! one network access and cannot fail a run.

pub mod assembler;
pub mod html;
pub mod layout;
pub mod qr;
pub mod qr_library;
pub mod writer;

pub use assembler::{write_artifacts, ArtifactOptions, Checksums, WrittenArtifacts};
pub use layout::{OutputLayout, RunStamp};
pub use qr::{build_short_codes, join_url, short_code, ResolverAssets, ShortCode};
pub use qr_library::{library_source, HttpQrLibrary, NoQrLibrary, QrLibrary, QrLibrarySource};
