// Webhook token creation and verification
// The session service signs each delivery with a short-lived HS256 token

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Claims carried by a webhook delivery token
///
/// # Fields
/// * `iss` - Issuer; must match the configured API key
/// * `exp` - Expiry time (seconds since epoch)
/// * `sha256` - Base64 digest of the raw request body, binding the token
///   to exactly one payload
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WebhookClaims {
    pub iss: String,
    pub exp: usize,
    pub sha256: String,
}

/// Base64 SHA-256 digest of a payload, as carried in the token
pub fn payload_digest(body: &[u8]) -> String {
    BASE64.encode(Sha256::digest(body))
}

/// Signs a webhook token for a payload
///
/// Counterpart of `verify_token`, used by the test suite and local tooling
/// to produce deliveries the coordinator will accept.
///
/// # Token Properties
/// - Expires after 10 minutes
/// - Signed with HS256
/// - Bound to the payload via the `sha256` claim
pub fn create_token(body: &[u8], api_key: &str, api_secret: &str) -> Result<String, String> {
    let expiry = Utc::now() + Duration::minutes(10);
    let claims = WebhookClaims {
        iss: api_key.to_string(),
        exp: expiry.timestamp() as usize,
        sha256: payload_digest(body),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(api_secret.as_ref()),
    )
    .map_err(|e| e.to_string())
}

/// Verifies a webhook token signature and expiry
///
/// Returns the decoded claims so the caller can check the payload digest
/// against the body it actually received.
///
/// # Errors
/// * Signature or expiry failure from the JWT layer
/// * `iss` claim not matching the expected API key
pub fn verify_token(token: &str, api_key: &str, api_secret: &str) -> Result<WebhookClaims, String> {
    let claims = decode::<WebhookClaims>(
        token,
        &DecodingKey::from_secret(api_secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())?;

    if claims.iss != api_key {
        return Err(format!("unexpected token issuer: {}", claims.iss));
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = "test-api-key";
    const TEST_SECRET: &str = "test-api-secret-for-unit-tests";

    #[test]
    fn create_and_verify_token() {
        let body = br#"{"event":"room_started"}"#;
        let token = create_token(body, TEST_KEY, TEST_SECRET).expect("valid token");

        let claims = verify_token(&token, TEST_KEY, TEST_SECRET).expect("valid verification");
        assert_eq!(claims.iss, TEST_KEY);
        assert_eq!(claims.sha256, payload_digest(body));
    }

    #[test]
    fn wrong_secret_fails() {
        let token = create_token(b"{}", TEST_KEY, TEST_SECRET).expect("valid token");

        let result = verify_token(&token, TEST_KEY, "wrong-secret");
        assert!(result.is_err());
    }

    #[test]
    fn wrong_issuer_fails() {
        let token = create_token(b"{}", "someone-else", TEST_SECRET).expect("valid token");

        let result = verify_token(&token, TEST_KEY, TEST_SECRET);
        assert!(result.is_err());
    }

    #[test]
    fn garbage_token_fails() {
        let result = verify_token("not.a.token", TEST_KEY, TEST_SECRET);
        assert!(result.is_err());
    }

    #[test]
    fn digest_tracks_payload() {
        assert_eq!(payload_digest(b"abc"), payload_digest(b"abc"));
        assert_ne!(payload_digest(b"abc"), payload_digest(b"abd"));
    }
}
