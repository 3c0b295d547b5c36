use crate::webhook::event::{EventKind, WebhookEvent};

use super::errors::StoreResult;
use super::store::RoomStore;

/// Outcome of reconciling one webhook event against the room store
///
/// Every variant except `BeginWait` is acknowledged to the caller
/// immediately; `BeginWait` hands the request over to a wait loop that
/// holds the response open for the room's active lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// A new worker session was recorded; hold the response open
    BeginWait { room: String },
    /// A live session was flagged for spin-down
    MarkStopped,
    /// Start event for a room that already has a live worker tracked
    IgnoreAlreadyRunning,
    /// Stop event for a room with no tracked entry at all
    IgnoreUnknownRoom,
    /// Stop event for a room whose worker was already flagged down
    IgnoreAlreadyStopped,
    /// Event type the coordinator does not act on
    IgnoreUnknownEvent,
}

/// Map an event and the room's current store state to the next state and
/// the action to take.
///
/// All state changes go through `compare_and_swap`, so two handlers racing
/// on the same room settle on exactly one winner; the loser re-reads and
/// lands on the appropriate ignore decision. Entries are never deleted
/// here; deletion belongs to the wait loop that created the entry.
pub async fn reconcile(event: &WebhookEvent, store: &dyn RoomStore) -> StoreResult<Decision> {
    let Some(room) = event.room_name() else {
        return Ok(Decision::IgnoreUnknownEvent);
    };

    match event.kind() {
        EventKind::RoomStarted => loop {
            let current = store.get(room).await?;
            if current == Some(true) {
                return Ok(Decision::IgnoreAlreadyRunning);
            }
            // Absent, or a leftover inactive entry the previous waiter has
            // not reaped yet; either way this handler claims the room.
            if store.compare_and_swap(room, current, true).await? {
                return Ok(Decision::BeginWait {
                    room: room.to_string(),
                });
            }
        },
        EventKind::RoomFinished | EventKind::ParticipantLeft => loop {
            match store.get(room).await? {
                None => return Ok(Decision::IgnoreUnknownRoom),
                Some(false) => return Ok(Decision::IgnoreAlreadyStopped),
                Some(true) => {
                    if store.compare_and_swap(room, Some(true), false).await? {
                        return Ok(Decision::MarkStopped);
                    }
                }
            }
        },
        EventKind::Other => Ok(Decision::IgnoreUnknownEvent),
    }
}
