use async_trait::async_trait;

use super::errors::StoreResult;

/// Shared store of per-room worker liveness flags
///
/// One entry per room name. `true` means a worker session is considered
/// live for the room, `false` means spin-down was requested but the entry
/// has not been reaped yet, and an absent key means no worker is tracked.
/// Implementations must make each individual operation atomic with respect
/// to concurrent handlers; callers must not assume anything about state
/// between two separate calls and should reach for `compare_and_swap` when
/// a read has to agree with the following write.
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Current liveness flag for a room, or `None` if untracked
    async fn get(&self, room: &str) -> StoreResult<Option<bool>>;

    /// Write the liveness flag, overwriting any existing entry
    async fn set(&self, room: &str, active: bool) -> StoreResult<()>;

    /// Remove the entry for a room; removing an absent entry is a no-op
    async fn delete(&self, room: &str) -> StoreResult<()>;

    /// Whether any entry (live or not) exists for a room
    async fn contains(&self, room: &str) -> StoreResult<bool>;

    /// Atomically write `new` iff the current value matches `expected`
    /// (`None` meaning the entry is absent). Returns whether the swap
    /// happened.
    async fn compare_and_swap(
        &self,
        room: &str,
        expected: Option<bool>,
        new: bool,
    ) -> StoreResult<bool>;
}
