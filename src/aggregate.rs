//! Aggregation of per-category counts into a health score

use crate::runner::QueryResult;
use std::fmt;

/// Score reported when no category produced a count
pub const NEUTRAL_SCORE: u8 = 50;

/// Total job count considered "perfectly healthy" by default
pub const DEFAULT_SCALE: u64 = 1_000_000;

/// Totals for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregate {
    pub total_count: u64,
    pub health_score: u8,
}

impl Aggregate {
    pub fn rating(&self) -> HealthRating {
        HealthRating::from_score(self.health_score)
    }
}

/// Coarse reading of a health score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthRating {
    Healthy,
    Cautious,
    Concerning,
}

impl HealthRating {
    pub fn from_score(score: u8) -> Self {
        match score {
            70.. => HealthRating::Healthy,
            50..=69 => HealthRating::Cautious,
            _ => HealthRating::Concerning,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthRating::Healthy => "healthy",
            HealthRating::Cautious => "cautious",
            HealthRating::Concerning => "concerning",
        }
    }
}

impl fmt::Display for HealthRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Folds query results into a total count and health score
///
/// Unavailable counts contribute zero.
pub fn aggregate(results: &[QueryResult], scale: u64) -> Aggregate {
    let total_count = results
        .iter()
        .filter_map(QueryResult::count)
        .fold(0u64, u64::saturating_add);

    Aggregate {
        total_count,
        health_score: health_score(total_count, scale),
    }
}

/// Normalizes a total count to `0..=100`
///
/// A zero total means the signal is unavailable, not that the market is
/// bad, and maps to [`NEUTRAL_SCORE`]. Rounds half up. A zero scale is
/// treated as 1.
pub fn health_score(total_count: u64, scale: u64) -> u8 {
    if total_count == 0 {
        return NEUTRAL_SCORE;
    }

    // round(total * 100 / scale) == floor((200 * total + scale) / (2 * scale))
    let scale = u128::from(scale.max(1));
    let score = (200 * u128::from(total_count) + scale) / (2 * scale);
    score.min(100) as u8
}
