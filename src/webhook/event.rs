use serde::Deserialize;

/// Event envelope posted by the session service
///
/// Only the event type and room name drive coordination; the rest of the
/// payload (participant details, track metadata, ...) is ignored and
/// tolerated.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Raw event type string, preserved as sent
    pub event: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub room: Option<RoomInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomInfo {
    pub name: String,
    #[serde(default)]
    pub sid: Option<String>,
}

/// Event types the coordinator acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    RoomStarted,
    RoomFinished,
    ParticipantLeft,
    /// Anything else the session service emits; acknowledged, never acted on
    Other,
}

impl WebhookEvent {
    pub fn kind(&self) -> EventKind {
        match self.event.as_str() {
            "room_started" => EventKind::RoomStarted,
            "room_finished" => EventKind::RoomFinished,
            "participant_left" => EventKind::ParticipantLeft,
            _ => EventKind::Other,
        }
    }

    pub fn room_name(&self) -> Option<&str> {
        self.room.as_ref().map(|r| r.name.as_str())
    }
}
