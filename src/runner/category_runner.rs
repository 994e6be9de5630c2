//! Sequential per-category query loop
//!
//! For each category: build the query, fetch the result page, extract the
//! count, record the result, then pause before the next category. A failing
//! category is recorded as unavailable and the loop moves on.

use crate::config::{Category, FetchTimeouts};
use crate::extract::{CountExtractor, ExtractionError};
use crate::provider::{FetchError, PageProvider};
use crate::runner::RateLimiter;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Why a category has no count
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Outcome of querying one category
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Category name
    pub category: String,

    /// Query string sent to the provider
    pub query_string: String,

    /// Extracted count, or the reason there is none
    pub outcome: Result<u64, CategoryError>,

    /// When the result was observed
    pub observed_at: DateTime<Utc>,
}

impl QueryResult {
    /// The extracted count, `None` when the category was unavailable
    pub fn count(&self) -> Option<u64> {
        self.outcome.as_ref().ok().copied()
    }
}

/// Drives every category through the provider and extractor
pub struct CategoryRunner<P> {
    provider: P,
    extractor: CountExtractor,
    rate_limiter: RateLimiter,
    location: String,
    timeouts: FetchTimeouts,
}

impl<P: PageProvider> CategoryRunner<P> {
    pub fn new(
        provider: P,
        extractor: CountExtractor,
        rate_limiter: RateLimiter,
        location: impl Into<String>,
        timeouts: FetchTimeouts,
    ) -> Self {
        Self {
            provider,
            extractor,
            rate_limiter,
            location: location.into(),
            timeouts,
        }
    }

    /// Queries every category in order
    ///
    /// Returns exactly one result per category, in the order given. The
    /// rate-limit pause is applied between categories, not after the last.
    pub async fn run(&self, categories: &[Category]) -> Vec<QueryResult> {
        let mut results = Vec::with_capacity(categories.len());

        for (index, category) in categories.iter().enumerate() {
            let result = self.run_category(category).await;

            match &result.outcome {
                Ok(count) => tracing::info!("{}: {} jobs", result.category, count),
                Err(e) => tracing::warn!("{}: unavailable ({})", result.category, e),
            }
            results.push(result);

            if index + 1 < categories.len() {
                self.rate_limiter.pause().await;
            }
        }

        results
    }

    async fn run_category(&self, category: &Category) -> QueryResult {
        let query_string = category.query_string();
        tracing::debug!("Querying {} with \"{}\"", category.name, query_string);

        let outcome = self.count_for(&query_string).await;

        QueryResult {
            category: category.name.clone(),
            query_string,
            outcome,
            observed_at: Utc::now(),
        }
    }

    async fn count_for(&self, query: &str) -> Result<u64, CategoryError> {
        let limit = self.timeouts.total();
        let content = tokio::time::timeout(
            limit,
            self.provider.fetch(query, &self.location, self.timeouts),
        )
        .await
        .map_err(|_| FetchError::Timeout { after: limit })??;

        Ok(self.extractor.extract(&content)?)
    }
}
