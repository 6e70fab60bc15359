//! Gate Decision
//!
//! Pure evaluation of one navigation request: `(path, cookies, now)` in,
//! [`GateDecision`] out. Applying the decision to a real response is the
//! middleware's job.

use super::routes::{RouteClass, RouteTable, DASHBOARD_PATH, LOGIN_PATH};
use crate::session::cookies::{CookieSource, SESSION_COOKIES};
use crate::session::probe::has_valid_token;

/// Outcome of the route gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Serve the page untouched
    Allow,
    /// Anonymous visitor on a protected page
    RedirectToLogin,
    /// Signed-in visitor on a login/signup page
    RedirectToDashboard,
    /// Serve the page, expiring the listed cookies on the way out
    AllowAndClear { cookies: Vec<&'static str> },
}

impl GateDecision {
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            GateDecision::RedirectToLogin => Some(LOGIN_PATH),
            GateDecision::RedirectToDashboard => Some(DASHBOARD_PATH),
            _ => None,
        }
    }

    /// Cookies the response must expire
    pub fn cookies_to_clear(&self) -> &[&'static str] {
        match self {
            GateDecision::AllowAndClear { cookies } => cookies,
            _ => &[],
        }
    }
}

/// Evaluate the gate for `path`.
///
/// Session *presence* alone keeps anonymous visitors out of protected pages.
/// Only the auth-only branch decodes tokens, and an undecodable token counts
/// as expired there.
pub fn evaluate<C: CookieSource + ?Sized>(
    routes: &RouteTable,
    path: &str,
    cookies: &C,
    now_ms: i64,
) -> GateDecision {
    let class = routes.classify(path);
    let has_session = cookies.has_session();

    match (class, has_session) {
        (RouteClass::Public, false) => GateDecision::Allow,
        (RouteClass::Protected, false) => GateDecision::RedirectToLogin,
        (RouteClass::AuthOnly, true) => {
            if has_valid_token(cookies, now_ms) {
                GateDecision::RedirectToDashboard
            } else {
                GateDecision::AllowAndClear {
                    cookies: SESSION_COOKIES.to_vec(),
                }
            }
        }
        _ => GateDecision::Allow,
    }
}
