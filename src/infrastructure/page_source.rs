//! Page acquisition boundary
//!
//! The pipeline consumes a DOM snapshot and does not care how it was
//! rendered. `PageSource` is that boundary: an HTTP implementation for
//! fetching fare pages directly, and a file implementation for snapshots
//! captured by an external browser session.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, info};
use url::Url;

use crate::domain::query::FareQuery;
use crate::infrastructure::extraction::error::{ExtractionError, ExtractionResult};

#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the rendered HTML for `url`.
    async fn fetch(&self, url: &Url) -> ExtractionResult<String>;
}

/// HTTP client settings for fare page fetches.
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36".to_string(),
        }
    }
}

pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(config: &HttpSourceConfig) -> ExtractionResult<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| ExtractionError::page_source_failed("http client", &e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &Url) -> ExtractionResult<String> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ExtractionError::page_source_failed(url.as_str(), &e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::page_source_failed(
                url.as_str(),
                &format!("HTTP {status}"),
            ));
        }
        let body = response
            .text()
            .await
            .map_err(|e| ExtractionError::page_source_failed(url.as_str(), &e.to_string()))?;
        info!("Fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }
}

/// Serves a snapshot captured by an external, already-rendered browser
/// session. The URL is ignored.
pub struct FilePageSource {
    path: PathBuf,
}

impl FilePageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PageSource for FilePageSource {
    async fn fetch(&self, _url: &Url) -> ExtractionResult<String> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ExtractionError::page_source_failed(&self.path.display().to_string(), &e.to_string())
        })
    }
}

/// Assemble the fare search URL for one query.
pub fn build_search_url(base: &Url, query: &FareQuery) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("originIata", &query.origin_code)
        .append_pair("destinationIata", &query.destination_code)
        .append_pair("dateOut", &query.date.format("%Y-%m-%d").to_string())
        .append_pair("adults", &query.party.adults.to_string())
        .append_pair("teens", &query.party.teens.to_string())
        .append_pair("children", &query.party.children.to_string())
        .append_pair("infants", &query.party.infants.to_string());
    url
}
