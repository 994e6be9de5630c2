//! Run orchestration
//!
//! This module contains the per-run pipeline:
//! - Sequential category queries with failure isolation
//! - Pacing between upstream requests
//! - Aggregation and persistence of the final snapshot

mod category_runner;
mod rate_limit;

pub use category_runner::{CategoryError, CategoryRunner, QueryResult};
pub use rate_limit::RateLimiter;

use crate::config::Config;
use crate::extract::CountExtractor;
use crate::provider::{HttpPageProvider, PageProvider};
use crate::snapshot::{RunSnapshot, SnapshotPersister};

/// Runs one complete pass against the configured job board
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP provider and extraction cascade
/// 2. Query every category in order
/// 3. Aggregate counts into a health score
/// 4. Persist the snapshot
///
/// # Example
///
/// ```no_run
/// use jobwatch::config::Config;
/// use jobwatch::runner::run_pipeline;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let snapshot = run_pipeline(&Config::default()).await?;
/// println!("Health score: {}", snapshot.health_score);
/// # Ok(())
/// # }
/// ```
pub async fn run_pipeline(config: &Config) -> crate::Result<RunSnapshot> {
    let provider = HttpPageProvider::from_config(&config.provider)?;
    run_with_provider(config, provider).await
}

/// Runs one complete pass using the given provider
///
/// Per-category failures are recorded in the snapshot; only a persistence
/// failure is returned as an error.
pub async fn run_with_provider<P: PageProvider>(
    config: &Config,
    provider: P,
) -> crate::Result<RunSnapshot> {
    let extractor = CountExtractor::from_config(&config.extraction)?;
    let runner = CategoryRunner::new(
        provider,
        extractor,
        RateLimiter::from_millis(config.runner.rate_limit_ms),
        config.provider.location.clone(),
        config.provider.timeouts(),
    );

    tracing::info!("Querying {} categories", config.categories.len());
    let results = runner.run(&config.categories).await;

    let snapshot = RunSnapshot::finalize(results, config.scoring.scale);
    tracing::info!(
        "Total jobs: {}, health score: {}/100 ({})",
        snapshot.total_count,
        snapshot.health_score,
        snapshot.rating()
    );

    let persister = SnapshotPersister::new(&config.output.snapshot_path);
    persister.persist(&snapshot)?;
    tracing::info!("Snapshot written to {}", persister.path().display());

    Ok(snapshot)
}
