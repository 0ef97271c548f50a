//! Round timer
//!
//! At most one timer task runs at a time: either the per-question countdown
//! or the short pending reveal after both teams lock. Starting either one
//! aborts whatever was running. Tasks also carry the round epoch they were
//! started for and do nothing if the game has moved on.

use super::AppState;
use crate::protocol::ServerMessage;
use crate::types::GamePhase;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

impl AppState {
    /// Abort the running timer task, if any
    pub(super) async fn cancel_timer(&self) {
        if let Some(handle) = self.timer.lock().await.take() {
            handle.abort();
        }
    }

    async fn replace_timer(&self, handle: JoinHandle<()>) {
        if let Some(previous) = self.timer.lock().await.replace(handle) {
            previous.abort();
        }
    }

    /// Count the current question down one second at a time, revealing at zero
    pub(super) async fn start_countdown(&self, epoch: u64) {
        let state = self.clone();
        let handle = tokio::spawn(async move { state.run_countdown(epoch).await });
        self.replace_timer(handle).await;
    }

    async fn run_countdown(self, epoch: u64) {
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let mut game = self.game.write().await;
            if game.round_epoch != epoch || game.phase != GamePhase::Question {
                return;
            }

            game.timer_value = game.timer_value.saturating_sub(1);
            tracing::debug!("Timer: {}s left", game.timer_value);
            self.broadcast_to_all(ServerMessage::TimerTick {
                seconds_remaining: game.timer_value,
            });

            if game.timer_value == 0 {
                tracing::info!("Time is up");
                self.reveal(&mut game);
                return;
            }
        }
    }

    /// Stop the countdown and reveal after the configured short delay
    pub(super) async fn schedule_reveal(&self, epoch: u64) {
        let state = self.clone();
        let delay = self.config.reveal_delay();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut game = state.game.write().await;
            if game.round_epoch == epoch && !state.reveal(&mut game) {
                tracing::debug!("Question already revealed, skipping");
            }
        });
        self.replace_timer(handle).await;
    }
}
