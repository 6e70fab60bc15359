//! Backend API Errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors from a backend API call
#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend answered with a non-success status
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        /// Response body, if it was JSON
        payload: Option<Value>,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Request aborted")]
    Aborted,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Build a status error from a failed response body
    pub fn from_status(status: u16, payload: Option<Value>) -> Self {
        let message = payload
            .as_ref()
            .and_then(extract_message)
            .unwrap_or_else(|| format!("Request failed with status {}", status));

        ApiError::Status {
            status,
            message,
            payload,
        }
    }

    /// HTTP status of the backend response, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            ApiError::Status { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

/// Pull a human-readable message out of an error body.
///
/// Looks at `error.message`, `detail.message`, `message`, then a string
/// `detail` or `error`.
pub fn extract_message(payload: &Value) -> Option<String> {
    let nested = ["error", "detail"]
        .iter()
        .find_map(|key| payload.get(key)?.get("message")?.as_str());

    nested
        .or_else(|| payload.get("message")?.as_str())
        .or_else(|| payload.get("detail")?.as_str())
        .or_else(|| payload.get("error")?.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Error body sent to browser callers
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Status { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Network(_) | ApiError::Decode(_) => StatusCode::BAD_GATEWAY,
            ApiError::Aborted => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        match &self {
            ApiError::Status { .. } => tracing::warn!(%status, "Backend error: {}", self),
            _ => tracing::error!(%status, "Backend call failed: {}", self),
        }

        let body = Json(ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
