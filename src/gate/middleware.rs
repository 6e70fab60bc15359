//! Route Gate Middleware
//!
//! Runs [`evaluate`](super::decision::evaluate) for every page request and
//! turns the decision into a redirect, a pass-through, or a pass-through with
//! the session cookies expired.

use super::decision::{evaluate, GateDecision};
use super::routes::RouteTable;
use crate::session::cookies::{clear_from_jar, DocumentCookies};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::{debug, info};

/// Shared state for the gate layer
#[derive(Debug, Clone)]
pub struct GateState {
    pub routes: RouteTable,
    /// Mark removal cookies `Secure` (HTTPS deployments)
    pub secure_cookies: bool,
}

impl GateState {
    pub fn new(routes: RouteTable, secure_cookies: bool) -> Self {
        Self {
            routes,
            secure_cookies,
        }
    }
}

impl Default for GateState {
    fn default() -> Self {
        Self::new(RouteTable::default(), false)
    }
}

/// Route gate middleware
pub async fn route_gate(
    State(state): State<Arc<GateState>>,
    cookies: DocumentCookies,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let decision = evaluate(
        &state.routes,
        &path,
        &cookies,
        chrono::Utc::now().timestamp_millis(),
    );

    debug!(path = %path, ?decision, "Route gate decision");

    if let Some(target) = decision.redirect_target() {
        return Redirect::temporary(target).into_response();
    }

    match decision {
        GateDecision::AllowAndClear { cookies: names } => {
            info!(path = %path, "Clearing stale session cookies");
            let response = next.run(req).await;
            let jar = clear_from_jar(jar, &names, state.secure_cookies);
            (jar, response).into_response()
        }
        _ => next.run(req).await,
    }
}
