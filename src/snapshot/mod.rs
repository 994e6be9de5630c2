//! Run snapshots
//!
//! A snapshot is the finalized result of one run: every category's result,
//! the total count and the health score. It is serialized to the JSON
//! artifact consumed downstream:
//!
//! ```json
//! {
//!   "timestamp": "2026-01-01T12:00:00.000Z",
//!   "totalJobs": 1500,
//!   "healthScore": 0,
//!   "categories": {
//!     "tech": { "keywords": "developer OR IT", "count": 1500, "timestamp": "..." }
//!   }
//! }
//! ```
//!
//! Unavailable counts are written as `0`.

mod persist;

pub use persist::{PersistenceError, SnapshotPersister};

use crate::aggregate::{aggregate, HealthRating};
use crate::runner::QueryResult;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// The complete result of one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSnapshot {
    pub observed_at: DateTime<Utc>,
    pub total_count: u64,
    pub health_score: u8,
    /// One result per configured category, in configured order
    pub results: Vec<QueryResult>,
}

impl RunSnapshot {
    /// Aggregates results into a snapshot observed at `observed_at`
    pub fn new(observed_at: DateTime<Utc>, results: Vec<QueryResult>, scale: u64) -> Self {
        let totals = aggregate(&results, scale);
        Self {
            observed_at,
            total_count: totals.total_count,
            health_score: totals.health_score,
            results,
        }
    }

    /// Aggregates results into a snapshot observed now
    pub fn finalize(results: Vec<QueryResult>, scale: u64) -> Self {
        Self::new(Utc::now(), results, scale)
    }

    pub fn rating(&self) -> HealthRating {
        HealthRating::from_score(self.health_score)
    }

    pub fn result(&self, category: &str) -> Option<&QueryResult> {
        self.results.iter().find(|r| r.category == category)
    }

    /// Renders the snapshot artifact as pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&SnapshotDocument::from(self))
    }
}

/// Artifact layout of a snapshot
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotDocument<'a> {
    timestamp: String,
    total_jobs: u64,
    health_score: u8,
    categories: CategoryEntries<'a>,
}

impl<'a> From<&'a RunSnapshot> for SnapshotDocument<'a> {
    fn from(snapshot: &'a RunSnapshot) -> Self {
        Self {
            timestamp: format_timestamp(&snapshot.observed_at),
            total_jobs: snapshot.total_count,
            health_score: snapshot.health_score,
            categories: CategoryEntries(&snapshot.results),
        }
    }
}

/// Category results serialized as a map in configured order
#[derive(Debug)]
struct CategoryEntries<'a>(&'a [QueryResult]);

impl Serialize for CategoryEntries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for result in self.0 {
            map.serialize_entry(&result.category, &CategoryEntry::from(result))?;
        }
        map.end()
    }
}

#[derive(Debug, Serialize)]
struct CategoryEntry<'a> {
    keywords: &'a str,
    count: u64,
    timestamp: String,
}

impl<'a> From<&'a QueryResult> for CategoryEntry<'a> {
    fn from(result: &'a QueryResult) -> Self {
        Self {
            keywords: &result.query_string,
            count: result.count().unwrap_or(0),
            timestamp: format_timestamp(&result.observed_at),
        }
    }
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
