use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::coordinator::{reconcile, Decision, WaitLoop};

/// Receive a session-service lifecycle event
///
/// POST /
///
/// For a `room_started` that begins tracking a worker, the response is
/// deliberately held open for the room's entire active lifetime, so the
/// caller observes worker liveness through the open request. Every other
/// outcome is acknowledged with an immediate empty 200.
pub async fn receive_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let auth_header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());

    let event = state.receiver.receive(&body, auth_header)?;

    tracing::info!(
        "Received {} event for room {}",
        event.event,
        event.room_name().unwrap_or("<none>")
    );

    let decision = reconcile(&event, state.store.as_ref())
        .await
        .map_err(|e| ApiError::internal_server_error(format!("Room store error: {}", e)))?;

    match decision {
        Decision::BeginWait { room } => {
            let session_id = Uuid::new_v4();
            tracing::info!("Worker for room {} spawned (session {})", room, session_id);

            let wait = WaitLoop::new(
                room.clone(),
                Arc::clone(&state.store),
                state.poll_interval,
                state.max_wait,
            );

            // Run the wait on its own task and await the handle: if the
            // caller disconnects, the task still drives the loop to an exit
            // and reaps the room entry.
            let outcome = tokio::spawn(wait.run(state.shutdown.clone()))
                .await
                .map_err(|e| ApiError::internal_server_error(format!("Wait task failed: {}", e)))?
                .map_err(|e| {
                    ApiError::internal_server_error(format!("Room store error: {}", e))
                })?;

            tracing::info!(
                "Wait for room {} finished: {} (session {})",
                room,
                outcome,
                session_id
            );
            Ok(StatusCode::OK)
        }
        Decision::MarkStopped => {
            tracing::info!(
                "Worker for room {} spun down",
                event.room_name().unwrap_or("<none>")
            );
            Ok(StatusCode::OK)
        }
        Decision::IgnoreAlreadyRunning => {
            tracing::info!(
                "Room {} already has a worker running, ignoring start",
                event.room_name().unwrap_or("<none>")
            );
            Ok(StatusCode::OK)
        }
        Decision::IgnoreUnknownRoom => {
            tracing::info!(
                "Worker for room {} not found, acknowledging stop",
                event.room_name().unwrap_or("<none>")
            );
            Ok(StatusCode::OK)
        }
        Decision::IgnoreAlreadyStopped => {
            tracing::info!(
                "Worker for room {} already spun down",
                event.room_name().unwrap_or("<none>")
            );
            Ok(StatusCode::OK)
        }
        Decision::IgnoreUnknownEvent => {
            tracing::debug!("No action for {} event", event.event);
            Ok(StatusCode::OK)
        }
    }
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
