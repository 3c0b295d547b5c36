// Room lifecycle coordination core
//
// The pieces that decide what a webhook event means for a room's tracked
// worker session and that tie a worker's lifetime to a held-open response.

pub mod errors;
pub mod reconciler;
pub mod store;
pub mod wait;

// Re-export main types
pub use errors::StoreError;
pub use reconciler::{reconcile, Decision};
pub use store::RoomStore;
pub use wait::{WaitLoop, WaitOutcome};
