use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Browser-like user agent; the job board serves a reduced page to obvious bots
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Jobwatch
///
/// Every section is optional; a missing section takes its defaults, so an
/// empty file (or no file at all) yields the reference configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub runner: RunnerConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(rename = "category", default = "default_categories")]
    pub categories: Vec<Category>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            runner: RunnerConfig::default(),
            scoring: ScoringConfig::default(),
            output: OutputConfig::default(),
            extraction: ExtractionConfig::default(),
            categories: default_categories(),
        }
    }
}

/// Job-search endpoint configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Search endpoint the query parameters are appended to
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Location parameter sent with every query
    pub location: String,

    /// Only count postings from the last N days
    #[serde(rename = "posted-within-days")]
    pub posted_within_days: u32,

    /// User-Agent header for requests
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Time allowed to obtain a response (seconds)
    #[serde(rename = "acquire-timeout-secs")]
    pub acquire_timeout_secs: u64,

    /// Additional time allowed for the page content to arrive (seconds)
    #[serde(rename = "content-wait-secs")]
    pub content_wait_secs: u64,
}

impl ProviderConfig {
    pub fn timeouts(&self) -> FetchTimeouts {
        FetchTimeouts {
            acquire: Duration::from_secs(self.acquire_timeout_secs),
            content: Duration::from_secs(self.content_wait_secs),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.indeed.com/jobs".to_string(),
            location: "us".to_string(),
            posted_within_days: 3,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            acquire_timeout_secs: 15,
            content_wait_secs: 10,
        }
    }
}

/// Bounds applied to a single page fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTimeouts {
    pub acquire: Duration,
    pub content: Duration,
}

impl FetchTimeouts {
    /// Upper bound on one fetch from start to finished content
    pub fn total(&self) -> Duration {
        self.acquire + self.content
    }
}

impl Default for FetchTimeouts {
    fn default() -> Self {
        ProviderConfig::default().timeouts()
    }
}

/// Sequential runner configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Pause between consecutive category queries (milliseconds)
    #[serde(rename = "rate-limit-ms")]
    pub rate_limit_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            rate_limit_ms: 2000,
        }
    }
}

/// Health score calibration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Total job count that maps to a score of 100
    pub scale: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { scale: 1_000_000 }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON snapshot, overwritten on every run
    #[serde(rename = "snapshot-path")]
    pub snapshot_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("./data/job_trends.json"),
        }
    }
}

/// Count extraction rules
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// CSS selectors tried in order to locate the result-count text
    pub selectors: Vec<String>,

    /// Fall back to scanning the whole document text when no selector matches
    #[serde(rename = "document-fallback")]
    pub document_fallback: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            selectors: crate::extract::DEFAULT_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            document_fallback: true,
        }
    }
}

/// A labor-market segment and the keywords that query it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Category name, used as the key in the snapshot
    pub name: String,

    /// Keywords combined into one disjunctive query
    pub keywords: Vec<String>,
}

impl Category {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Joins the keywords into the query string sent to the provider
    pub fn query_string(&self) -> String {
        self.keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>()
            .join(" OR ")
    }
}

/// The reference category set
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(
            "tech",
            &["software engineer", "data scientist", "developer", "IT"],
        ),
        Category::new(
            "retail",
            &["retail", "store associate", "cashier", "sales associate"],
        ),
        Category::new(
            "manufacturing",
            &["manufacturing", "factory", "warehouse", "production"],
        ),
        Category::new(
            "healthcare",
            &["nurse", "medical", "healthcare", "hospital"],
        ),
        Category::new("finance", &["finance", "accountant", "analyst", "banking"]),
        Category::new("general", &["full time", "part time", "employment"]),
    ]
}
