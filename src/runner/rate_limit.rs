//! Pacing between consecutive upstream queries

use std::time::Duration;

/// Fixed pause between category queries
///
/// Pacing only affects how fast requests reach the job board, never what
/// the run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimiter {
    delay: Duration,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// A limiter that never waits
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits out the configured delay
    pub async fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        tracing::trace!("Rate limiting for {:?}", self.delay);
        tokio::time::sleep(self.delay).await;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}
