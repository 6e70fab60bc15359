//! Session Cookies
//!
//! Cookie names shared with the backend, a read-only view over any cookie
//! store, and the expiring cookies used to clear a stale session.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::collections::HashMap;
use std::convert::Infallible;

/// Cookie carrying the short-lived access token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Cookie carrying the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Both session cookies, in clearing order
pub const SESSION_COOKIES: [&str; 2] = [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE];

/// Read access to a snapshot of request cookies
pub trait CookieSource {
    /// Raw value of the named cookie, if set
    fn cookie(&self, name: &str) -> Option<&str>;

    /// Value of the named cookie if it is set and non-empty
    fn present(&self, name: &str) -> Option<&str> {
        self.cookie(name).filter(|value| !value.is_empty())
    }

    /// Session presence: either session cookie is set, valid or not
    fn has_session(&self) -> bool {
        SESSION_COOKIES.iter().any(|name| self.present(name).is_some())
    }
}

impl CookieSource for HashMap<String, String> {
    fn cookie(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Cookies parsed from a raw `Cookie` header or `document.cookie` string.
///
/// The first occurrence of a repeated name wins, matching the order browsers
/// send them in (most specific path first). Every reader in the crate goes
/// through this type so the gate and the session probe agree.
#[derive(Debug, Clone, Default)]
pub struct DocumentCookies {
    values: HashMap<String, String>,
}

impl DocumentCookies {
    /// Parse `name=value; name2=value2`. Unparseable pairs are skipped and
    /// a later duplicate does not override the first occurrence.
    pub fn parse(raw: &str) -> Self {
        let mut cookies = Self::default();
        cookies.extend_from(raw);
        cookies
    }

    /// Parse every `Cookie` header of a request, in header order
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut cookies = Self::default();
        for value in headers.get_all(header::COOKIE) {
            if let Ok(raw) = value.to_str() {
                cookies.extend_from(raw);
            }
        }
        cookies
    }

    fn extend_from(&mut self, raw: &str) {
        for cookie in Cookie::split_parse(raw).flatten() {
            self.values
                .entry(cookie.name().to_string())
                .or_insert_with(|| cookie.value().to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl CookieSource for DocumentCookies {
    fn cookie(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

impl<S> FromRequestParts<S> for DocumentCookies
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Expiring `Set-Cookie` values for both session cookies
pub fn removal_cookies(secure: bool) -> Vec<Cookie<'static>> {
    SESSION_COOKIES
        .iter()
        .map(|name| {
            Cookie::build((*name, ""))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(secure)
                .max_age(cookie::time::Duration::ZERO)
                .build()
        })
        .collect()
}

/// Add removal cookies for `names` to a jar
pub fn clear_from_jar(jar: CookieJar, names: &[&'static str], secure: bool) -> CookieJar {
    removal_cookies(secure)
        .into_iter()
        .filter(|c| names.iter().any(|name| *name == c.name()))
        .fold(jar, |jar, c| jar.add(c))
}
