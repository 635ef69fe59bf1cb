//! Binary target for a demo race between two participants.
//!
//! Stands in for the presentation layer: builds two players, starts the
//! runner, and reports progress until the race completes.

use std::sync::Arc;
use std::time::Duration;

use racetracker::{ProgressSimulatorBuilder, RaceError, RaceRunner};

#[tokio::main]
async fn main() -> Result<(), RaceError> {
    tracing_subscriber::fmt::init();

    // Sped-up pacing so the demo finishes in a few seconds.
    let interval = Duration::from_millis(50);
    let player_one = Arc::new(
        ProgressSimulatorBuilder::new("Player 1")
            .interval(interval)
            .build()?,
    );
    let player_two = Arc::new(
        ProgressSimulatorBuilder::new("Player 2")
            .interval(interval)
            .step(2)
            .build()?,
    );

    let runner = RaceRunner::new(vec![Arc::clone(&player_one), Arc::clone(&player_two)]);
    runner.start();

    let mut ticker = tokio::time::interval(Duration::from_millis(500));
    loop {
        tokio::select! {
            _ = runner.await_completion() => break,
            _ = ticker.tick() => {
                for participant in runner.participants() {
                    tracing::info!(
                        "{}: {}/{} ({:.0}%)",
                        participant.name(),
                        participant.current_progress(),
                        participant.ceiling(),
                        participant.progress_factor() * 100.0
                    );
                }
            }
        }
    }

    for participant in runner.participants() {
        tracing::info!(
            "{} finished at {}",
            participant.name(),
            participant.current_progress()
        );
    }

    Ok(())
}
