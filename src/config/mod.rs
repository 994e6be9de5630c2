//! Configuration module for Jobwatch
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional, so the binary runs with no file at all.
//!
//! # Example
//!
//! ```no_run
//! use jobwatch::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("jobwatch.toml")).unwrap();
//! println!("Snapshot goes to: {}", config.output.snapshot_path.display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    default_categories, Category, Config, ExtractionConfig, FetchTimeouts, OutputConfig,
    ProviderConfig, RunnerConfig, ScoringConfig, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
