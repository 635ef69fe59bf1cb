//! # Racetracker
//!
//! Concurrent race progress simulation with pause, resume and reset.
//!
//! Two components, composed by the caller:
//!
//! - [`ProgressSimulator`]: one participant's progress state and the rules
//!   for advancing it over time: an integer value that grows by a fixed
//!   step at a fixed interval until a ceiling is reached.
//! - [`RaceRunner`]: drives N simulators concurrently, exposes a single
//!   start/pause/reset control surface, and flips its observable `running`
//!   flag back to idle only when every participant has finished.
//!
//! The presentation layer holds shared references to the participants,
//! reads their progress to render indicators, and toggles the runner.
//!
//! ## Quick Start
//!
//! ```ignore
//! use racetracker::{ProgressSimulatorBuilder, RaceRunner};
//!
//! let player_one = Arc::new(ProgressSimulatorBuilder::new("Player 1").build()?);
//! let player_two = Arc::new(ProgressSimulatorBuilder::new("Player 2").step(2).build()?);
//!
//! let runner = RaceRunner::new(vec![player_one, player_two]);
//! runner.start();
//! runner.await_completion().await;
//! ```
//!
//! Cancellation (pause) is cooperative and scope-wide: a participant task
//! is only ever interrupted while suspended in its timed wait, never
//! mid-mutation, so pausing neither applies a partial increment nor loses
//! a committed one.

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

/// Error types for race configuration.
pub mod error;
/// Progress state and advancement rules for a single participant.
pub mod participant;
/// Concurrent race coordination and the start/pause/reset control surface.
pub mod runner;
/// Time provider abstraction for real and test execution.
pub mod time;

// Public API exports
pub use error::{RaceError, RaceResult};
pub use participant::{ProgressSimulator, ProgressSimulatorBuilder};
pub use runner::RaceRunner;
pub use time::{TimeProvider, TokioTimeProvider};
