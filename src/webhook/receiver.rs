use thiserror::Error;

use crate::auth::token::{self, payload_digest};

use super::event::{EventKind, WebhookEvent};

/// Why an inbound delivery was rejected before reaching the reconciler
#[derive(Debug, Error)]
pub enum ReceiveError {
    #[error("missing Authorization header")]
    MissingAuth,

    #[error("token verification failed: {0}")]
    InvalidToken(String),

    #[error("token digest does not match request body")]
    DigestMismatch,

    #[error("malformed event payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0} event is missing a room name")]
    MissingRoom(String),
}

impl ReceiveError {
    /// Whether this is an authentication failure (vs. a malformed payload)
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            ReceiveError::MissingAuth | ReceiveError::InvalidToken(_) | ReceiveError::DigestMismatch
        )
    }
}

/// Verifies and decodes inbound webhook deliveries
///
/// Pure validation: authenticate the `Authorization` token against the
/// configured signing credential, check that the token was minted for this
/// exact body, then decode the envelope. Nothing here touches the store.
pub struct WebhookReceiver {
    api_key: String,
    api_secret: String,
}

impl WebhookReceiver {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    pub fn receive(
        &self,
        body: &[u8],
        auth_header: Option<&str>,
    ) -> Result<WebhookEvent, ReceiveError> {
        let header = auth_header.ok_or(ReceiveError::MissingAuth)?;
        // The session service sends the bare token; tolerate a Bearer prefix.
        let raw_token = header.strip_prefix("Bearer ").unwrap_or(header).trim();

        let claims = token::verify_token(raw_token, &self.api_key, &self.api_secret)
            .map_err(ReceiveError::InvalidToken)?;

        if claims.sha256 != payload_digest(body) {
            return Err(ReceiveError::DigestMismatch);
        }

        let event: WebhookEvent = serde_json::from_slice(body)?;

        // Lifecycle events are meaningless without a room to act on.
        let needs_room = !matches!(event.kind(), EventKind::Other);
        if needs_room && event.room_name().is_none() {
            return Err(ReceiveError::MissingRoom(event.event.clone()));
        }

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::create_token;

    const KEY: &str = "receiver-key";
    const SECRET: &str = "receiver-secret";

    fn receiver() -> WebhookReceiver {
        WebhookReceiver::new(KEY, SECRET)
    }

    fn signed(body: &[u8]) -> String {
        create_token(body, KEY, SECRET).unwrap()
    }

    #[test]
    fn accepts_signed_delivery() {
        let body = br#"{"event":"room_started","room":{"name":"room-42"}}"#;
        let token = signed(body);

        let event = receiver().receive(body, Some(&token)).unwrap();

        assert_eq!(event.room_name(), Some("room-42"));
    }

    #[test]
    fn accepts_bearer_prefixed_header() {
        let body = br#"{"event":"room_started","room":{"name":"room-42"}}"#;
        let header = format!("Bearer {}", signed(body));

        assert!(receiver().receive(body, Some(&header)).is_ok());
    }

    #[test]
    fn rejects_missing_header() {
        let err = receiver().receive(b"{}", None).unwrap_err();

        assert!(matches!(err, ReceiveError::MissingAuth));
        assert!(err.is_auth());
    }

    #[test]
    fn rejects_foreign_signature() {
        let body = br#"{"event":"room_started","room":{"name":"room-42"}}"#;
        let token = create_token(body, KEY, "other-secret").unwrap();

        let err = receiver().receive(body, Some(&token)).unwrap_err();
        assert!(matches!(err, ReceiveError::InvalidToken(_)));
    }

    #[test]
    fn rejects_token_minted_for_other_body() {
        let token = signed(br#"{"event":"room_started","room":{"name":"room-1"}}"#);
        let other = br#"{"event":"room_started","room":{"name":"room-2"}}"#;

        let err = receiver().receive(other, Some(&token)).unwrap_err();
        assert!(matches!(err, ReceiveError::DigestMismatch));
        assert!(err.is_auth());
    }

    #[test]
    fn rejects_unparseable_body() {
        let body = b"not json";
        let token = signed(body);

        let err = receiver().receive(body, Some(&token)).unwrap_err();
        assert!(matches!(err, ReceiveError::Decode(_)));
        assert!(!err.is_auth());
    }

    #[test]
    fn rejects_lifecycle_event_without_room() {
        let body = br#"{"event":"room_finished"}"#;
        let token = signed(body);

        let err = receiver().receive(body, Some(&token)).unwrap_err();
        assert!(matches!(err, ReceiveError::MissingRoom(_)));
    }

    #[test]
    fn passes_unknown_event_through_without_room() {
        let body = br#"{"event":"egress_ended"}"#;
        let token = signed(body);

        let event = receiver().receive(body, Some(&token)).unwrap();
        assert_eq!(event.event, "egress_ended");
    }
}
