//! Roomkeeper API Library
//!
//! Room-lifecycle coordinator for a real-time voice-agent platform: the
//! session service posts signed lifecycle webhooks here, and the
//! coordinator tracks exactly one live worker session per room in a shared
//! store, holding each `room_started` response open until the room ends.

pub mod api;
pub mod auth;
pub mod config;
pub mod coordinator;
pub mod infrastructure;
pub mod webhook;
