//! Time provider implementations for real time.

use async_trait::async_trait;
use std::time::Duration;

/// Provider trait for time operations.
///
/// This trait allows code to work with both real wall-clock time and a
/// controlled test clock in a unified way. Implementations handle sleeping
/// and getting current time appropriate for their environment.
///
/// The advance loop suspends exclusively through [`TimeProvider::sleep`],
/// which makes it the single point where a surrounding task can be
/// cancelled without observing a half-applied state change.
#[async_trait]
pub trait TimeProvider: Clone + Send + Sync + 'static {
    /// Sleep for the specified duration.
    async fn sleep(&self, duration: Duration);

    /// Get elapsed time since provider creation.
    fn now(&self) -> Duration;
}

/// Real time provider using Tokio's time facilities.
///
/// Under a runtime with a paused clock (`tokio::time::pause`), sleeps
/// resolve in virtual time and `now()` tracks the virtual clock, which is
/// what the timing tests rely on.
#[derive(Debug, Clone)]
pub struct TokioTimeProvider {
    /// Start time for calculating elapsed duration
    start_time: tokio::time::Instant,
}

impl TokioTimeProvider {
    /// Create a new Tokio time provider.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        Self {
            start_time: tokio::time::Instant::now(),
        }
    }
}

impl Default for TokioTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TimeProvider for TokioTimeProvider {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> Duration {
        self.start_time.elapsed()
    }
}
