//! Jobwatch main entry point
//!
//! This is the command-line interface for a single Jobwatch run.

use anyhow::Context;
use clap::Parser;
use jobwatch::config::{load_config_with_hash, Config};
use jobwatch::provider::HttpPageProvider;
use jobwatch::runner::run_pipeline;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Jobwatch: employment-health signal from job-search result counts
///
/// Queries the job board once per configured category, aggregates the
/// result counts into a 0-100 health score and writes a JSON snapshot.
/// Runs with built-in defaults when no configuration file is given.
#[derive(Parser, Debug)]
#[command(name = "jobwatch")]
#[command(version)]
#[command(about = "Employment-health snapshot from job-search counts", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the snapshot here instead of the configured path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the queries that would be sent without sending them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(output) = &cli.output {
        config.output.snapshot_path = output.clone();
    }

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_run(&config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("jobwatch=info,warn"),
            1 => EnvFilter::new("jobwatch=debug,info"),
            2 => EnvFilter::new("jobwatch=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and lists the planned queries
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let provider = HttpPageProvider::from_config(&config.provider)?;

    println!("=== Jobwatch Dry Run ===\n");

    println!("Provider:");
    println!("  Endpoint: {}", config.provider.base_url);
    println!("  Location: {}", config.provider.location);
    println!(
        "  Posted within: {} days",
        config.provider.posted_within_days
    );
    println!(
        "  Timeouts: {}s acquire + {}s content",
        config.provider.acquire_timeout_secs, config.provider.content_wait_secs
    );
    println!("  Rate limit: {}ms", config.runner.rate_limit_ms);

    println!("\nScoring scale: {}", config.scoring.scale);
    println!("Snapshot: {}", config.output.snapshot_path.display());

    println!("\nExtraction rules:");
    for selector in &config.extraction.selectors {
        println!("  - {}", selector);
    }
    if config.extraction.document_fallback {
        println!("  - (whole document)");
    }

    println!("\nCategories ({}):", config.categories.len());
    for category in &config.categories {
        let query = category.query_string();
        println!("  - {}: {}", category.name, query);
        println!(
            "    {}",
            provider.search_url(&query, &config.provider.location)
        );
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main run
async fn handle_run(config: &Config) -> anyhow::Result<()> {
    let snapshot = run_pipeline(config).await.context("run failed")?;

    let available = snapshot
        .results
        .iter()
        .filter(|r| r.count().is_some())
        .count();
    tracing::info!(
        "Run completed: {}/{} categories available",
        available,
        snapshot.results.len()
    );

    Ok(())
}
