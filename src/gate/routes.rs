//! Route Classification
//!
//! Static partition of path prefixes into public, protected and auth-only
//! routes. The longest matching prefix decides, so a nested public page under
//! a protected prefix (or the reverse) classifies the same way regardless of
//! the order the lists are declared in.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Marketing and invite-acceptance pages
pub const PUBLIC_ROUTES: &[&str] = &["/", "/docs", "/terms", "/privacy", "/accept-invite"];

/// Pages that need a session cookie
pub const PROTECTED_ROUTES: &[&str] = &["/dashboard", "/profile", "/api-keys", "/invite"];

/// Pages only shown to signed-out visitors
pub const AUTH_ROUTES: &[&str] = &["/login", "/signup"];

/// Where anonymous visitors to protected pages are sent
pub const LOGIN_PATH: &str = "/login";

/// Where signed-in visitors to auth pages are sent
pub const DASHBOARD_PATH: &str = "/dashboard";

static DEFAULT_TABLE: Lazy<RouteTable> = Lazy::new(|| RouteTable {
    public: owned(PUBLIC_ROUTES),
    protected: owned(PROTECTED_ROUTES),
    auth_only: owned(AUTH_ROUTES),
});

fn owned(prefixes: &[&str]) -> Vec<String> {
    prefixes.iter().map(|p| p.to_string()).collect()
}

/// Classification of a request path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteClass {
    Public,
    Protected,
    AuthOnly,
    /// Matched nothing; the gate lets it through
    Unclassified,
}

/// Prefix lists for each route class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    pub public: Vec<String>,
    pub protected: Vec<String>,
    pub auth_only: Vec<String>,
}

impl Default for RouteTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

impl RouteTable {
    /// Classify `path` by its longest matching prefix.
    ///
    /// On equal-length matches across classes (the same prefix listed twice)
    /// protected beats auth-only beats public.
    pub fn classify(&self, path: &str) -> RouteClass {
        let candidates = [
            (RouteClass::Protected, &self.protected),
            (RouteClass::AuthOnly, &self.auth_only),
            (RouteClass::Public, &self.public),
        ];

        let mut best: Option<(usize, RouteClass)> = None;
        for (class, prefixes) in candidates {
            for prefix in prefixes.iter().filter(|p| matches_prefix(path, p)) {
                if best.map_or(true, |(len, _)| prefix.len() > len) {
                    best = Some((prefix.len(), class));
                }
            }
        }

        best.map(|(_, class)| class).unwrap_or(RouteClass::Unclassified)
    }
}

/// `/` only matches the root itself; every other prefix matches by `starts_with`.
pub fn matches_prefix(path: &str, prefix: &str) -> bool {
    if prefix == "/" {
        path == "/"
    } else {
        path.starts_with(prefix)
    }
}
