// Inbound webhook surface: the signed event envelope and its validator

pub mod event;
pub mod receiver;

pub use event::{EventKind, WebhookEvent};
pub use receiver::{ReceiveError, WebhookReceiver};
