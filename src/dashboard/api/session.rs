//! Session API
//!
//! `GET /session` answers the optimistic "signed in?" question for page
//! scripts; `POST /logout` ends the session on the backend and clears the
//! cookies here regardless of how the backend call went.

use super::AppState;
use crate::session::{clear_from_jar, is_authenticated, DocumentCookies, SESSION_COOKIES};
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// Session probe handler
pub async fn session_handler(cookies: DocumentCookies) -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: is_authenticated(Some(&cookies)),
    })
}

/// Logout handler
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    let api = match headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) {
        Some(cookies) => state.api.with_cookies(cookies),
        None => state.api.clone(),
    };

    if let Err(e) = api.logout().await {
        warn!("Backend logout failed, clearing cookies anyway: {}", e);
    } else {
        info!("Session ended");
    }

    let jar = clear_from_jar(jar, &SESSION_COOKIES, state.secure_cookies);
    (jar, Json(LogoutResponse { success: true }))
}

pub fn session_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/session", get(session_handler))
        .route("/logout", post(logout_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        // unreachable backend: logout must still clear cookies
        let state = AppState::new(&ApiConfig::new("http://127.0.0.1:9"), false).unwrap();
        session_router(Arc::new(state))
    }

    #[tokio::test]
    async fn test_logout_clears_cookies_when_backend_fails() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logout")
                    .header(header::COOKIE, "access_token=abc; refresh_token=def")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cleared: Vec<_> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();
        assert_eq!(cleared.len(), 2);
        assert!(cleared.iter().all(|c| c.contains("Max-Age=0")));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], true);
    }

    #[tokio::test]
    async fn test_session_probe_repeated_cookie_uses_first_value() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        let now = chrono::Utc::now().timestamp();
        let token = |exp: i64| {
            format!("h.{}.s", URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp)))
        };
        let raw = format!("access_token={}; access_token={}", token(now - 60), token(now + 3600));

        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/session")
                    .header(header::COOKIE, raw.as_str())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["authenticated"], false);
        assert!(!is_authenticated(Some(&DocumentCookies::parse(&raw))));
    }

    #[tokio::test]
    async fn test_session_probe_with_garbage_token() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/session")
                    .header(header::COOKIE, "access_token=garbage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["authenticated"], false);
    }
}
