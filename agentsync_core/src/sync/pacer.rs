use std::time::Duration;

/// Fixed-interval pacing gate for CRM-bound iteration.
///
/// The third-party API rate limit is respected by processing records one at a
/// time with a uniform pause between iterations. The pause applies in dry-run
/// too, keeping run timing identical across modes.
#[derive(Debug, Clone)]
pub struct Pacer {
    interval: Duration,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Gate that never pauses (tests, one-record runs).
    pub fn disabled() -> Self {
        Self {
            interval: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait out one pacing interval.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn pause(&self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }
}
