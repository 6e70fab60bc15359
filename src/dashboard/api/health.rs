//! Health Check API
//!
//! Liveness and readiness endpoints for load balancers and monitoring.

use super::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Backend path probed by the readiness check
pub const BACKEND_HEALTH_PATH: &str = "/health";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
    /// Timestamp (ISO 8601)
    pub timestamp: String,
}

/// Health check handler
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: state.version,
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Liveness probe
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe: ready once the backend API answers its health check
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.api.get::<Value>(BACKEND_HEALTH_PATH).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            warn!("Backend not ready: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Create health check router
pub fn health_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(liveness))
        .route("/readyz", get(readiness))
        .with_state(state)
}
