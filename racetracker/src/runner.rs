//! Concurrent race coordination over a fixed set of participants.
//!
//! [`RaceRunner`] drives one advancement task per participant under a
//! single start/pause/reset control surface and reports aggregate
//! completion through an observable `running` flag.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::participant::ProgressSimulator;
use crate::time::{TimeProvider, TokioTimeProvider};

/// Control state for the in-flight run attempt.
///
/// The epoch is a monotonic attempt id: the supervisor of a finished
/// attempt only performs the automatic `running = false` transition if its
/// attempt is still the current one.
#[derive(Debug, Default)]
struct RunnerState {
    epoch: u64,
    cancel: Option<CancellationToken>,
}

/// Drives N participants concurrently under one start/pause/reset control.
///
/// The `running` flag is the single source of truth for whether
/// advancement is active, with two states (idle and running) and four
/// transitions: `start` enters running, `pause` returns to idle, all
/// participants reaching their ceiling returns to idle automatically, and
/// `reset_all` returns to idle from anywhere while zeroing every
/// participant.
///
/// Each `start` opens one cancellation scope spanning exactly one run
/// attempt; `pause` cancels that scope wholesale, which is the single
/// cancellation point for all participants. Partial pause of one
/// participant is not supported.
///
/// The runner does not own the participants (they are constructed by the
/// caller and handed in as shared references), but it exclusively owns the
/// decision of when they advance.
#[derive(Debug)]
pub struct RaceRunner<T: TimeProvider = TokioTimeProvider> {
    participants: Vec<Arc<ProgressSimulator>>,
    time: T,
    running: Arc<watch::Sender<bool>>,
    state: Arc<Mutex<RunnerState>>,
}

impl RaceRunner<TokioTimeProvider> {
    /// Create a runner over the given participants using real time.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(participants: Vec<Arc<ProgressSimulator>>) -> Self {
        Self::with_time(participants, TokioTimeProvider::new())
    }
}

impl<T: TimeProvider> RaceRunner<T> {
    /// Create a runner over the given participants with an explicit time
    /// provider.
    pub fn with_time(participants: Vec<Arc<ProgressSimulator>>, time: T) -> Self {
        let (running, _) = watch::channel(false);
        Self {
            participants,
            time,
            running: Arc::new(running),
            state: Arc::new(Mutex::new(RunnerState::default())),
        }
    }

    /// Start a run attempt: one advancement task per participant, all
    /// resuming from their current (not reset) progress.
    ///
    /// A no-op when already running. When every participant reaches its
    /// ceiling the runner flips back to idle on its own; see
    /// [`await_completion`](RaceRunner::await_completion).
    pub fn start(&self) {
        let mut state = self.state.lock().expect("runner state lock poisoned");
        if *self.running.borrow() {
            return;
        }

        let cancel = CancellationToken::new();
        state.epoch += 1;
        let epoch = state.epoch;
        state.cancel = Some(cancel.clone());
        self.running.send_replace(true);
        tracing::debug!("Race started with {} participant(s)", self.participants.len());

        let mut tasks = Vec::with_capacity(self.participants.len());
        for participant in &self.participants {
            let participant = Arc::clone(participant);
            let time = self.time.clone();
            let cancel = cancel.clone();
            tasks.push(tokio::spawn(async move {
                // Biased: once the scope is cancelled, no further increment
                // is committed, even for a wait that has already elapsed.
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        tracing::debug!("Participant '{}' advancement cancelled", participant.name());
                    }
                    _ = participant.advance(&time) => {
                        tracing::debug!("Participant '{}' finished", participant.name());
                    }
                }
            }));
        }

        let running = Arc::clone(&self.running);
        let shared = Arc::clone(&self.state);
        tokio::spawn(async move {
            // Implicit barrier: wait for every advancement task.
            for task in tasks {
                let _ = task.await;
            }
            let state = shared.lock().expect("runner state lock poisoned");
            if state.epoch == epoch && !cancel.is_cancelled() {
                running.send_replace(false);
                tracing::debug!("All participants finished, race complete");
            }
        });
    }

    /// Pause the race: cancel all in-flight advancement tasks at once.
    ///
    /// Every participant retains its last committed progress; no partial
    /// increment is applied and no new increment occurs until
    /// [`start`](RaceRunner::start) is called again.
    pub fn pause(&self) {
        let mut state = self.state.lock().expect("runner state lock poisoned");
        if let Some(cancel) = state.cancel.take() {
            cancel.cancel();
        }
        let was_running = self.running.send_replace(false);
        if was_running {
            tracing::debug!("Race paused");
        }
    }

    /// Reset every participant to zero and force the runner back to idle,
    /// cancelling any in-flight advancement tasks.
    pub fn reset_all(&self) {
        let mut state = self.state.lock().expect("runner state lock poisoned");
        if let Some(cancel) = state.cancel.take() {
            cancel.cancel();
        }
        self.running.send_replace(false);
        for participant in &self.participants {
            participant.reset();
        }
        tracing::debug!("Race reset");
    }

    /// Wait until the runner is idle.
    ///
    /// Completes immediately when no run attempt is active; otherwise
    /// resolves when the current attempt ends, whether through `pause`,
    /// `reset_all`, or every participant reaching its ceiling.
    pub async fn await_completion(&self) {
        let mut rx = self.running.subscribe();
        while *rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                break;
            }
        }
    }

    /// Whether a run attempt is currently active.
    pub fn is_running(&self) -> bool {
        *self.running.borrow()
    }

    /// Subscribe to `running` transitions, e.g. to toggle a start/pause
    /// affordance label.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.running.subscribe()
    }

    /// The participants driven by this runner, in handed-in order.
    pub fn participants(&self) -> &[Arc<ProgressSimulator>] {
        &self.participants
    }
}

impl<T: TimeProvider> Drop for RaceRunner<T> {
    fn drop(&mut self) {
        // Advancement tasks must not outlive the control surface.
        if let Ok(mut state) = self.state.lock() {
            if let Some(cancel) = state.cancel.take() {
                cancel.cancel();
            }
        }
    }
}
