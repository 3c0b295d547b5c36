use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use super::errors::{StoreError, StoreResult};
use super::store::RoomStore;

/// How a wait loop came to exit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// Some handler flagged the room down and the poll observed it
    Stopped,
    /// No stop event arrived before the hard deadline
    TimedOut,
    /// The process is shutting down
    Cancelled,
}

impl std::fmt::Display for WaitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaitOutcome::Stopped => write!(f, "stopped"),
            WaitOutcome::TimedOut => write!(f, "timed out"),
            WaitOutcome::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Holds one room's webhook response open until the room ends
///
/// Polls the store every `poll_interval` and exits the moment the liveness
/// flag is no longer `true`. Bounded by `max_duration` so the request
/// always completes even if no stop event ever arrives. On every exit path
/// (stop observed, deadline hit, shutdown signalled, or a store failure
/// mid-poll) the room entry this loop owns is deleted before returning.
pub struct WaitLoop {
    room: String,
    store: Arc<dyn RoomStore>,
    poll_interval: Duration,
    max_duration: Duration,
}

impl WaitLoop {
    pub fn new(
        room: String,
        store: Arc<dyn RoomStore>,
        poll_interval: Duration,
        max_duration: Duration,
    ) -> Self {
        Self {
            room,
            store,
            poll_interval,
            max_duration,
        }
    }

    /// Run the loop to completion. The `shutdown` channel is flipped by the
    /// graceful-shutdown path in `main`; any change (or a dropped sender)
    /// cancels the wait.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> StoreResult<WaitOutcome> {
        let deadline = Instant::now() + self.max_duration;

        let result: Result<WaitOutcome, StoreError> = loop {
            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {
                    match self.store.get(&self.room).await {
                        // Still live; keep the response open.
                        Ok(Some(true)) => {}
                        // Flagged down, or already gone.
                        Ok(_) => break Ok(WaitOutcome::Stopped),
                        Err(e) => break Err(e),
                    }
                }
                _ = tokio::time::sleep_until(deadline) => {
                    break Ok(WaitOutcome::TimedOut);
                }
                _ = shutdown.changed() => {
                    break Ok(WaitOutcome::Cancelled);
                }
            }
        };

        // Cleanup is owned by this loop, not the reconciler: best effort on
        // every exit path.
        if let Err(e) = self.store.delete(&self.room).await {
            tracing::warn!(
                "Failed to clean up entry for room {} after wait: {}",
                self.room,
                e
            );
        }

        result
    }
}
