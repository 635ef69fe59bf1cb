//! Progress state and advancement rules for a single race participant.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use crate::error::{RaceError, RaceResult};
use crate::time::TimeProvider;

/// State holder for one race participant.
///
/// Progress advances by `step` every `interval` until `ceiling` is
/// reached. The current value lives in a single atomic integer so the
/// rendering layer can read it at any time, including mid-advancement:
/// reads see the last committed increment, never a torn value.
///
/// The value is written by exactly two parties: the advancement task
/// (via [`advance`](ProgressSimulator::advance)) and the control surface
/// (via [`reset`](ProgressSimulator::reset)). No mutual exclusion is
/// imposed between them; see [`reset`](ProgressSimulator::reset).
#[derive(Debug)]
pub struct ProgressSimulator {
    name: String,
    ceiling: u32,
    interval: Duration,
    step: u32,
    current: AtomicU32,
}

impl ProgressSimulator {
    /// Create a new participant.
    ///
    /// `initial_progress` is only consulted here; a later
    /// [`reset`](ProgressSimulator::reset) always returns the participant
    /// to zero regardless of this value.
    ///
    /// # Errors
    ///
    /// Returns [`RaceError::InvalidConfiguration`] if `ceiling` or `step`
    /// is zero.
    pub fn new(
        name: impl Into<String>,
        ceiling: u32,
        interval: Duration,
        step: u32,
        initial_progress: u32,
    ) -> RaceResult<Self> {
        if ceiling == 0 {
            return Err(RaceError::InvalidConfiguration(format!(
                "ceiling={}; must be > 0",
                ceiling
            )));
        }
        if step == 0 {
            return Err(RaceError::InvalidConfiguration(format!(
                "step={}; must be > 0",
                step
            )));
        }

        Ok(Self {
            name: name.into(),
            ceiling,
            interval,
            step,
            current: AtomicU32::new(initial_progress),
        })
    }

    /// Repeatedly add `step` to the current progress, waiting `interval`
    /// between increments, until the ceiling is reached. Returns
    /// immediately if the participant has already finished.
    ///
    /// The timed wait is the only suspension point: cancelling the
    /// surrounding task abandons an in-flight wait without applying a
    /// partial increment, and every committed increment is retained. A
    /// later call resumes from the retained value, not from zero.
    pub async fn advance<T: TimeProvider>(&self, time: &T) {
        while self.current_progress() < self.ceiling {
            time.sleep(self.interval).await;
            let value = self.current.fetch_add(self.step, Ordering::Relaxed) + self.step;
            tracing::trace!("Participant '{}' progressed to {}", self.name, value);
        }
    }

    /// Reset progress to zero, regardless of the configured initial value.
    ///
    /// Synchronous and idempotent. Safe to call while an advancement task
    /// is suspended elsewhere; if that task resumes it continues adding to
    /// whatever value it finds. A reset racing an in-flight increment can
    /// therefore yield `step` rather than zero: an accepted race in this
    /// design, kept deliberately rather than hidden behind a lock.
    pub fn reset(&self) {
        self.current.store(0, Ordering::Relaxed);
    }

    /// The participant's identifying label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The progress value at which this participant is done.
    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// The participant's current progress.
    pub fn current_progress(&self) -> u32 {
        self.current.load(Ordering::Relaxed)
    }

    /// Whether the participant has reached its ceiling.
    pub fn is_finished(&self) -> bool {
        self.current_progress() >= self.ceiling
    }

    /// Completion ratio, current progress over ceiling, recomputed on
    /// every read.
    ///
    /// When `step` does not divide `ceiling` evenly the final increment
    /// overshoots, and the factor reports a value above `1.0` rather than
    /// clamping; callers decide how to render that.
    pub fn progress_factor(&self) -> f64 {
        f64::from(self.current_progress()) / f64::from(self.ceiling)
    }
}

/// Builder for [`ProgressSimulator`] with default pacing: ceiling 100,
/// one increment of 1 every 500ms, starting from zero.
#[derive(Debug, Clone)]
pub struct ProgressSimulatorBuilder {
    name: String,
    ceiling: u32,
    interval: Duration,
    step: u32,
    initial_progress: u32,
}

impl ProgressSimulatorBuilder {
    /// Create a builder for a participant with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ceiling: 100,
            interval: Duration::from_millis(500),
            step: 1,
            initial_progress: 0,
        }
    }

    /// Set the progress value at which the participant is done.
    pub fn ceiling(mut self, ceiling: u32) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Set the time between increments.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the amount added per interval.
    pub fn step(mut self, step: u32) -> Self {
        self.step = step;
        self
    }

    /// Set the starting progress value.
    pub fn initial_progress(mut self, initial_progress: u32) -> Self {
        self.initial_progress = initial_progress;
        self
    }

    /// Build the participant, validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RaceError::InvalidConfiguration`] if `ceiling` or `step`
    /// is zero.
    pub fn build(self) -> RaceResult<ProgressSimulator> {
        ProgressSimulator::new(
            self.name,
            self.ceiling,
            self.interval,
            self.step,
            self.initial_progress,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TokioTimeProvider;
    use std::sync::Arc;

    #[test]
    fn test_rejects_zero_ceiling() {
        let result = ProgressSimulator::new("p", 0, Duration::from_millis(500), 1, 0);
        assert!(matches!(result, Err(RaceError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_rejects_zero_step() {
        let result = ProgressSimulator::new("p", 100, Duration::from_millis(500), 0, 0);
        assert!(matches!(result, Err(RaceError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_builder_defaults() {
        let participant = ProgressSimulatorBuilder::new("Player 1").build().unwrap();

        assert_eq!(participant.name(), "Player 1");
        assert_eq!(participant.ceiling(), 100);
        assert_eq!(participant.current_progress(), 0);
        assert!(!participant.is_finished());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let participant = ProgressSimulator::new("p", 100, Duration::from_millis(500), 1, 42)
            .unwrap();

        assert_eq!(participant.current_progress(), 42);
        participant.reset();
        assert_eq!(participant.current_progress(), 0);
        participant.reset();
        assert_eq!(participant.current_progress(), 0);
    }

    #[test]
    fn test_progress_factor_is_derived() {
        let participant = ProgressSimulator::new("p", 100, Duration::from_millis(500), 1, 50)
            .unwrap();

        assert_eq!(participant.progress_factor(), 0.5);
        participant.reset();
        assert_eq!(participant.progress_factor(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_runs_to_ceiling() {
        let time = TokioTimeProvider::new();
        let participant = ProgressSimulator::new("p", 5, Duration::from_millis(100), 1, 0)
            .unwrap();

        participant.advance(&time).await;

        assert_eq!(participant.current_progress(), 5);
        assert!(participant.is_finished());
        assert_eq!(participant.progress_factor(), 1.0);
        // Exactly 5 intervals of simulated time elapsed.
        assert_eq!(time.now(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_is_noop_once_finished() {
        let time = TokioTimeProvider::new();
        let participant = ProgressSimulator::new("p", 100, Duration::from_millis(500), 1, 100)
            .unwrap();

        participant.advance(&time).await;

        // Returned without a single timed wait.
        assert_eq!(time.now(), Duration::ZERO);
        assert_eq!(participant.current_progress(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_increments_by_step_each_interval() {
        let time = TokioTimeProvider::new();
        let participant =
            Arc::new(ProgressSimulator::new("p", 100, Duration::from_millis(100), 4, 0).unwrap());

        let task = {
            let participant = Arc::clone(&participant);
            let time = time.clone();
            tokio::spawn(async move { participant.advance(&time).await })
        };

        // One millisecond past each interval boundary, exactly one more
        // step has been committed.
        tokio::time::sleep(Duration::from_millis(101)).await;
        assert_eq!(participant.current_progress(), 4);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(participant.current_progress(), 8);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(participant.current_progress(), 12);

        task.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_final_increment_may_overshoot_ceiling() {
        let time = TokioTimeProvider::new();
        let participant = ProgressSimulator::new("p", 100, Duration::from_millis(100), 3, 0)
            .unwrap();

        participant.advance(&time).await;

        // 33 increments reach 99, the 34th lands on 102.
        assert_eq!(participant.current_progress(), 102);
        assert!(participant.is_finished());
        assert!(participant.progress_factor() > 1.0);
    }
}
