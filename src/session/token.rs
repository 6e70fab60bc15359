//! Token Inspector
//!
//! Reads the claims of a JWT-shaped bearer token without verifying its
//! signature. The result only drives redirect decisions in the route gate and
//! the session probe; the backend API re-checks every token it receives.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::{Map, Value};

/// Decoded claims object of a token payload
pub type Claims = Map<String, Value>;

/// Decode the payload segment of a token into its claims object.
///
/// Returns `None` when the token has no payload segment, the segment is not
/// base64url, the bytes are not JSON, or the JSON is not an object.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;

    match serde_json::from_slice::<Value>(&bytes).ok()? {
        Value::Object(claims) => Some(claims),
        _ => None,
    }
}

/// The `exp` claim (seconds since epoch), if present and numeric.
pub fn expiry_of(token: &str) -> Option<f64> {
    decode_claims(token)?.get("exp")?.as_f64()
}

/// Check expiry against the current wall clock
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, chrono::Utc::now().timestamp_millis())
}

/// Check expiry against `now_ms` (milliseconds since epoch).
///
/// A token is expired unless it decodes, carries a numeric `exp`, and
/// `exp * 1000` is strictly greater than `now_ms`.
pub fn is_expired_at(token: &str, now_ms: i64) -> bool {
    match expiry_of(token) {
        Some(exp) => exp * 1000.0 <= now_ms as f64,
        None => true,
    }
}
