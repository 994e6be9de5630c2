//! Jobwatch: an employment-health signal from job-search result counts
//!
//! This crate queries a job-search service for a set of labor-market
//! categories, extracts the approximate number of postings from each result
//! page, folds the counts into a bounded health score and writes one
//! timestamped snapshot per run.

pub mod aggregate;
pub mod config;
pub mod extract;
pub mod provider;
pub mod runner;
pub mod snapshot;

use thiserror::Error;

/// Main error type for Jobwatch operations
///
/// Only conditions that end a run live here. Per-category failures are
/// carried in [`runner::CategoryError`] and never escalate.
#[derive(Debug, Error)]
pub enum JobwatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Persistence error: {0}")]
    Persistence(#[from] snapshot::PersistenceError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid extraction selector: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Jobwatch operations
pub type Result<T> = std::result::Result<T, JobwatchError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use aggregate::{aggregate, Aggregate, HealthRating};
pub use config::{Category, Config};
pub use extract::CountExtractor;
pub use provider::{FetchError, HttpPageProvider, PageProvider};
pub use runner::{run_pipeline, CategoryRunner, QueryResult};
pub use snapshot::{RunSnapshot, SnapshotPersister};
