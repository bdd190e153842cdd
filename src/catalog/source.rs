//! Where catalog documents come from.
//!
//! A [`CatalogSource`] returns the raw document body. Parsing and
//! validation happen in the loader so every source shares one failure path.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::CatalogError;

/// Everything that can go wrong while loading a catalog.
/// All variants end up as the same in-place failure message in the UI.
#[derive(Debug)]
pub enum LoadError {
    /// Local file could not be read.
    Io(std::io::Error),
    /// Transport failure (DNS, connection refused, reset).
    Network(String),
    /// Server answered with a non-success status.
    Status { status: u16 },
    /// Body is not a catalog document.
    Parse(String),
    /// Body parsed but violates catalog invariants.
    Invalid(CatalogError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "catalog I/O error: {e}"),
            LoadError::Network(msg) => write!(f, "network error: {msg}"),
            LoadError::Status { status } => write!(f, "HTTP error! status: {status}"),
            LoadError::Parse(msg) => write!(f, "parse error: {msg}"),
            LoadError::Invalid(e) => write!(f, "invalid catalog: {e}"),
        }
    }
}

impl std::error::Error for LoadError {}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable location, used in logs.
    fn describe(&self) -> String;

    /// Fetch the raw catalog document.
    async fn fetch(&self) -> Result<String, LoadError>;
}

/// Fetches the catalog over HTTP(S).
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        info!("Fetching catalog from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        debug!("Catalog response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("Catalog request failed with HTTP {}", status);
            return Err(LoadError::Status { status });
        }

        response
            .text()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))
    }
}

/// Reads the catalog from a local JSON file.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String, LoadError> {
        info!("Reading catalog from {}", self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(LoadError::Io)
    }
}

/// Picks a source for a location string: `http://` and `https://` go over
/// the network, anything else is treated as a file path.
pub fn source_for(location: &str) -> Box<dyn CatalogSource> {
    let lower = location.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}
