// API layer module (adapters for controllers)
// Composes validation, reconciliation, and the wait loop behind HTTP

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tokio::sync::watch;

use crate::coordinator::RoomStore;
use crate::webhook::WebhookReceiver;

pub mod errors;
pub mod handlers;

/// Shared state for all request handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RoomStore>,
    pub receiver: Arc<WebhookReceiver>,
    /// Cadence of the held-open liveness poll
    pub poll_interval: Duration,
    /// Hard ceiling on how long one webhook response stays open
    pub max_wait: Duration,
    /// Flipped by the graceful-shutdown path; cancels open waits
    pub shutdown: watch::Receiver<bool>,
}

/// Build the coordinator's router over the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::webhook::receive_event))
        .route("/health", get(handlers::webhook::health_check))
        .with_state(state)
}
