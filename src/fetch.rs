//! Page fetching
//!
//! The [`DocumentFetcher`] trait is the only I/O seam of the export pipeline.
//! [`HttpFetcher`] is the default implementation over `reqwest`. Failures are
//! reported once and never retried.

use crate::error::FetchError;
use crate::extraction::normalize_base;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Source of raw page markup
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the markup at `url`
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Options for HTTP fetching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Request timeout (default: 10s)
    pub timeout: Duration,
    /// User-Agent header (default: "Mozilla/5.0")
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchOptions {
    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Fetches pages over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    options: FetchOptions,
}

impl HttpFetcher {
    /// Create a fetcher with default options
    pub fn new() -> Result<Self, FetchError> {
        Self::with_options(FetchOptions::default())
    }

    /// Create a fetcher with custom options
    pub fn with_options(options: FetchOptions) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(options.user_agent.clone())
            .timeout(options.timeout)
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, options })
    }

    /// Options this fetcher was built with
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    fn map_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.options.timeout.as_secs())
        } else if let Some(status) = err.status() {
            FetchError::HttpStatus {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string(),
            }
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url = normalize_base(url);
        let parsed = url::Url::parse(&url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;

        info!("Fetching {}", parsed);
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Fetch returned HTTP {}", status);
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string(),
            });
        }

        let body = response.text().await.map_err(|e| self.map_error(e))?;
        debug!("Fetched {} bytes", body.len());
        Ok(body)
    }
}
