//! HTTP page provider
//!
//! Fetches job-search result pages over HTTP. Acquisition (connect, send,
//! headers) and content download are bounded separately.

use crate::config::{FetchTimeouts, ProviderConfig};
use crate::provider::{FetchError, PageProvider};
use reqwest::{Client, StatusCode};
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use jobwatch::config::ProviderConfig;
/// use jobwatch::provider::build_http_client;
///
/// let client = build_http_client(&ProviderConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ProviderConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .connect_timeout(config.timeouts().acquire)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Provider backed by the job board's search endpoint
#[derive(Debug, Clone)]
pub struct HttpPageProvider {
    client: Client,
    base_url: Url,
    posted_within_days: u32,
}

impl HttpPageProvider {
    pub fn new(client: Client, base_url: Url, posted_within_days: u32) -> Self {
        Self {
            client,
            base_url,
            posted_within_days,
        }
    }

    /// Creates a provider from configuration, building its HTTP client
    pub fn from_config(config: &ProviderConfig) -> crate::Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| crate::ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;
        let client = build_http_client(config)?;
        Ok(Self::new(client, base_url, config.posted_within_days))
    }

    /// Builds the search URL: `q` (query), `l` (location), `fromage` (days)
    pub fn search_url(&self, query: &str, location: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("l", location)
            .append_pair("fromage", &self.posted_within_days.to_string());
        url
    }
}

impl PageProvider for HttpPageProvider {
    async fn fetch(
        &self,
        query: &str,
        location: &str,
        timeouts: FetchTimeouts,
    ) -> Result<String, FetchError> {
        let url = self.search_url(query, location);
        tracing::debug!("Fetching {}", url);

        let response = tokio::time::timeout(timeouts.acquire, self.client.get(url).send())
            .await
            .map_err(|_| FetchError::Timeout {
                after: timeouts.acquire,
            })?
            .map_err(classify_error)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        tokio::time::timeout(timeouts.content, response.text())
            .await
            .map_err(|_| FetchError::Timeout {
                after: timeouts.content,
            })?
            .map_err(classify_error)
    }
}

fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Network("request timeout".to_string())
    } else if e.is_connect() {
        FetchError::Network("connection refused".to_string())
    } else {
        FetchError::Network(e.to_string())
    }
}
