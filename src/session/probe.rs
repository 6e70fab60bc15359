//! Session Probe
//!
//! Optimistic "is someone signed in" check for UI purposes. The answer is
//! never an authorization decision.

use super::cookies::{CookieSource, SESSION_COOKIES};
use super::token::is_expired_at;

/// True when a cookie store is available and at least one session token in it
/// is present and not expired.
pub fn is_authenticated<C: CookieSource + ?Sized>(store: Option<&C>) -> bool {
    is_authenticated_at(store, chrono::Utc::now().timestamp_millis())
}

/// [`is_authenticated`] against an explicit clock
pub fn is_authenticated_at<C: CookieSource + ?Sized>(store: Option<&C>, now_ms: i64) -> bool {
    let Some(store) = store else {
        return false;
    };

    has_valid_token(store, now_ms)
}

/// At least one present session token decodes with a future expiry
pub(crate) fn has_valid_token<C: CookieSource + ?Sized>(store: &C, now_ms: i64) -> bool {
    SESSION_COOKIES
        .iter()
        .filter_map(|name| store.present(name))
        .any(|token| !is_expired_at(token, now_ms))
}
