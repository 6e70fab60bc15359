//! Web Server API Endpoints
//!
//! Health probes, the session probe/logout pair, and the dashboard data
//! routes that relay to the backend API.

pub mod data;
pub mod health;
pub mod session;

use crate::api::{ApiClient, ApiConfig, ApiError};
use std::sync::Arc;
use std::time::Instant;

pub use data::data_router;
pub use health::health_router;
pub use session::session_router;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Backend client without caller cookies
    pub api: ApiClient,
    /// Mark cookies the server writes as `Secure`
    pub secure_cookies: bool,
    pub start_time: Instant,
    pub version: &'static str,
}

impl AppState {
    pub fn new(api: &ApiConfig, secure_cookies: bool) -> Result<Self, ApiError> {
        Ok(Self {
            api: ApiClient::new(api)?,
            secure_cookies,
            start_time: Instant::now(),
            version: env!("CARGO_PKG_VERSION"),
        })
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Health and session routes at the root, data routes under `/dashboard/api`
pub fn api_router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .merge(health_router(state.clone()))
        .merge(session_router(state.clone()))
        .nest("/dashboard/api", data_router(state))
}
