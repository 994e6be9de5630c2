//! Page providers
//!
//! A provider turns a search query into rendered page content. The runner
//! only depends on the [`PageProvider`] capability, so the extraction and
//! aggregation pipeline can be driven by synthetic pages in tests.

mod http;

pub use http::{build_http_client, HttpPageProvider};

use crate::config::FetchTimeouts;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Failure to obtain page content for a query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("rate limited by upstream (HTTP 429)")]
    RateLimited,

    #[error("HTTP {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid search URL: {0}")]
    InvalidUrl(String),
}

/// Capability to render a search query into page content
pub trait PageProvider {
    /// Fetches the result page for `query` at `location`
    ///
    /// Implementations should honor `timeouts`; the runner also cancels any
    /// fetch that exceeds [`FetchTimeouts::total`].
    fn fetch(
        &self,
        query: &str,
        location: &str,
        timeouts: FetchTimeouts,
    ) -> impl Future<Output = Result<String, FetchError>>;
}
