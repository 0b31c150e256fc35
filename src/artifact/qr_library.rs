//! Best-effort download of the QR rendering script
//!
//! The paper wallet inlines the script so it can draw QR codes offline. The
//! fetch never fails the run: any error, timeout or non-200 answer resolves
//! to [`QrLibrary::Unavailable`].

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Outcome of the fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrLibrary {
    /// Script source to inline
    Inline(String),
    /// Not fetched; the page falls back to an offline notice
    Unavailable,
}

impl QrLibrary {
    pub fn is_available(&self) -> bool {
        matches!(self, QrLibrary::Inline(_))
    }
}

/// Where the QR script comes from
#[async_trait]
pub trait QrLibrarySource: Send + Sync {
    async fn fetch(&self) -> QrLibrary;
}

/// Plain HTTPS GET with a bounded timeout
pub struct HttpQrLibrary {
    client: reqwest::Client,
    url: String,
}

impl HttpQrLibrary {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn try_fetch(&self) -> std::result::Result<Option<String>, reqwest::Error> {
        let resp = self.client.get(&self.url).send().await?;
        if resp.status() != reqwest::StatusCode::OK {
            warn!("QR library fetch returned {}", resp.status());
            return Ok(None);
        }
        let body = resp.text().await?;
        Ok(Some(body).filter(|b| !b.trim().is_empty()))
    }
}

#[async_trait]
impl QrLibrarySource for HttpQrLibrary {
    async fn fetch(&self) -> QrLibrary {
        debug!("Fetching QR library from {}", self.url);
        match self.try_fetch().await {
            Ok(Some(body)) => {
                info!("Inlining QR library ({} bytes)", body.len());
                QrLibrary::Inline(body)
            }
            Ok(None) => QrLibrary::Unavailable,
            Err(e) => {
                warn!("QR library unavailable, HTML will use the offline notice: {}", e);
                QrLibrary::Unavailable
            }
        }
    }
}

/// Never fetches; for fully offline generation
pub struct NoQrLibrary;

#[async_trait]
impl QrLibrarySource for NoQrLibrary {
    async fn fetch(&self) -> QrLibrary {
        QrLibrary::Unavailable
    }
}

/// Pick the QR script source for a run
///
/// A client that cannot be built degrades to [`NoQrLibrary`].
pub fn library_source(enabled: bool, url: &str, timeout: Duration) -> Box<dyn QrLibrarySource> {
    if !enabled {
        return Box::new(NoQrLibrary);
    }
    offline_on_error(HttpQrLibrary::new(url, timeout))
}

fn offline_on_error(built: Result<HttpQrLibrary>) -> Box<dyn QrLibrarySource> {
    match built {
        Ok(source) => Box::new(source),
        Err(e) => {
            warn!("QR library fetch disabled, HTML will use the offline notice: {}", e);
            Box::new(NoQrLibrary)
        }
    }
}
