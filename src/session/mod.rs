//! Session Inspection
//!
//! Everything the web front knows about a visitor's session comes from the
//! two token cookies set by the backend. Tokens are decoded, never verified.

pub mod cookies;
pub mod probe;
pub mod token;

pub use cookies::{
    clear_from_jar, removal_cookies, CookieSource, DocumentCookies, ACCESS_TOKEN_COOKIE,
    REFRESH_TOKEN_COOKIE, SESSION_COOKIES,
};
pub use probe::{is_authenticated, is_authenticated_at};
pub use token::{decode_claims, expiry_of, is_expired, is_expired_at, Claims};
