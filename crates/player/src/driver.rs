//! Tick loop ownership for one minigame session.
//!
//! The UI owns a `watch` sender for the held input and a
//! `CancellationToken` for teardown. The loop owns the state machine;
//! cancelling the token stops the interval outright, so a superseded
//! session can never be mutated by a stale tick.

use std::time::Duration;

use driftline_domain::CastQuality;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::minigame::{Phase, TensionGame, TICK_MS};

/// Terminal outcome of one attempt, reported to the session owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptResult {
    Caught(CastQuality),
    Escaped,
}

/// Drive a game to completion of any number of attempts.
///
/// Emits one [`AttemptResult`] per terminal transition and keeps running
/// (the machine resets itself after its cooldown) until cancelled.
pub async fn run(
    mut game: TensionGame,
    mut input: watch::Receiver<bool>,
    results: mpsc::Sender<AttemptResult>,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(Duration::from_millis(u64::from(TICK_MS)));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut last_phase = game.phase();
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Minigame session torn down");
                return;
            }
            _ = interval.tick() => {
                let held = *input.borrow_and_update();
                let phase = game.tick(held);
                if phase != last_phase {
                    if let Some(result) = terminal_result(phase) {
                        if results.send(result).await.is_err() {
                            // Receiver gone, nobody is watching this session.
                            return;
                        }
                    }
                    last_phase = phase;
                }
            }
        }
    }
}

fn terminal_result(phase: Phase) -> Option<AttemptResult> {
    match phase {
        Phase::Caught(quality) => Some(AttemptResult::Caught(quality)),
        Phase::Escaped => Some(AttemptResult::Escaped),
        Phase::Idle | Phase::Active => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_held_input_runs_to_escape() {
        let (input_tx, input_rx) = watch::channel(true);
        let (results_tx, mut results_rx) = mpsc::channel(4);
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(run(
            TensionGame::new(),
            input_rx,
            results_tx,
            cancel.clone(),
        ));

        // Held the whole way: danger threshold ends the attempt.
        let result = results_rx.recv().await.expect("terminal result");
        assert_eq!(result, AttemptResult::Escaped);

        cancel.cancel();
        handle.await.expect("join");
        drop(input_tx);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks_without_result() {
        let (_input_tx, input_rx) = watch::channel(false);
        let (results_tx, mut results_rx) = mpsc::channel(4);
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(run(
            TensionGame::new(),
            input_rx,
            results_tx,
            cancel.clone(),
        ));

        // Never pressed, so the machine stays idle; teardown must end the
        // loop rather than leaving it ticking.
        cancel.cancel();
        handle.await.expect("join");
        assert!(results_rx.recv().await.is_none());
    }
}
