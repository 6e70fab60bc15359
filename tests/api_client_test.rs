use axum::body::{to_bytes, Body};
use axum::extract::{Path, Query};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Json};
use axum::routing::{delete, get, post};
use axum::Router;
use driftcheck_web::api::{PageQuery, RequestOptions};
use driftcheck_web::{ApiClient, ApiConfig, ApiError, Config, DashboardServer};
use futures_util::future::AbortHandle;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use tower::ServiceExt;

fn cookie_header(headers: &HeaderMap) -> String {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn me(headers: HeaderMap) -> axum::response::Response {
    let cookies = cookie_header(&headers);
    if cookies.contains("access_token=") {
        Json(json!({
            "id": "u1",
            "email": "dev@example.com",
            "name": "Dev",
            "cookie": cookies,
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Not authenticated"})),
        )
            .into_response()
    }
}

async fn echo(headers: HeaderMap, body: String) -> Json<Value> {
    Json(json!({
        "content_type": headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        "body": body,
    }))
}

async fn traces(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "items": [{"id": "t1", "model": "gpt-4o", "latency_ms": 120, "prompt": "hi"}],
        "total": 41,
        "page": params.get("page").and_then(|p| p.parse::<u32>().ok()).unwrap_or(0),
        "page_size": params.get("page_size").and_then(|p| p.parse::<u32>().ok()).unwrap_or(0),
    }))
}

async fn revoke(Path(_id): Path<String>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn broken() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": {"message": "database unavailable"}})),
    )
}

async fn plain_error() -> impl IntoResponse {
    (StatusCode::BAD_GATEWAY, "upstream hiccup")
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(10)).await;
    Json(json!({}))
}

/// Start a stand-in backend on an ephemeral port and return its base URL
async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/traces", get(traces))
        .route("/api/api-keys/{id}", delete(revoke))
        .route("/echo", post(echo))
        .route("/broken", get(broken))
        .route("/plain-error", get(plain_error))
        .route("/slow", get(slow));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn client() -> ApiClient {
    ApiClient::new(&ApiConfig::new(spawn_backend().await)).unwrap()
}

#[tokio::test]
async fn test_cookies_are_forwarded() {
    let api = client().await.with_cookies("access_token=abc; refresh_token=def");

    let user = api.current_user().await.unwrap();
    assert_eq!(user.email, "dev@example.com");
    assert_eq!(user.extra["cookie"], "access_token=abc; refresh_token=def");
}

#[tokio::test]
async fn test_unauthorized_uses_detail_message() {
    let err = client().await.current_user().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Not authenticated");
    assert_eq!(err.payload().unwrap()["detail"], "Not authenticated");
}

#[tokio::test]
async fn test_nested_error_message() {
    let err = client().await.get::<Value>("/broken").await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "database unavailable");
}

#[tokio::test]
async fn test_non_json_error_falls_back_to_status_message() {
    let err = client().await.get::<Value>("/plain-error").await.unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert!(err.payload().is_none());
    assert_eq!(err.to_string(), "Request failed with status 502");
}

#[tokio::test]
async fn test_json_content_type_by_default() {
    let echoed: Value = client()
        .await
        .post("/echo", &json!({"name": "ci"}))
        .await
        .unwrap();

    assert_eq!(echoed["content_type"], "application/json");
    assert_eq!(echoed["body"], r#"{"name":"ci"}"#);
}

#[tokio::test]
async fn test_caller_content_type_wins() {
    let opts = RequestOptions::post("/echo")
        .text("a,b")
        .header(header::CONTENT_TYPE, header::HeaderValue::from_static("text/csv"));

    let echoed: Value = client().await.request(opts).await.unwrap();

    assert_eq!(echoed["content_type"], "text/csv");
    assert_eq!(echoed["body"], "a,b");
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let result = client().await.revoke_api_key("key_1").await.unwrap();
    assert!(result.is_null());
}

#[tokio::test]
async fn test_list_traces_clamps_page_size() {
    let page = client()
        .await
        .list_traces(PageQuery {
            page: 0,
            page_size: 500,
        })
        .await
        .unwrap();

    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 100);
    assert_eq!(page.items[0].id, "t1");
    assert_eq!(page.items[0].extra["prompt"], "hi");
}

#[tokio::test]
async fn test_abort_cancels_request() {
    let api = client().await;
    let (handle, registration) = AbortHandle::new_pair();

    let call = tokio::spawn(async move {
        api.request_abortable::<Value>(RequestOptions::get("/slow"), registration)
            .await
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.abort();

    let result = tokio::time::timeout(Duration::from_secs(2), call)
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(result, Err(ApiError::Aborted)));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let api = ApiClient::new(&ApiConfig::new("http://127.0.0.1:9")).unwrap();

    let err = api.get::<Value>("/api/auth/me").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_dashboard_api_relays_with_cookies() {
    let config = Config {
        api: ApiConfig::new(spawn_backend().await),
        ..Default::default()
    };
    let app = DashboardServer::new(config).unwrap().router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/dashboard/api/me")
                .header(header::COOKIE, "access_token=abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["id"], "u1");
    assert_eq!(json["cookie"], "access_token=abc");
}

#[tokio::test]
async fn test_dashboard_api_passes_backend_status_through() {
    let config = Config {
        api: ApiConfig::new(spawn_backend().await),
        ..Default::default()
    };
    let app = DashboardServer::new(config).unwrap().router();

    // a refresh cookie alone gets past the gate, the stand-in backend wants an access token
    let response = app
        .oneshot(
            Request::builder()
                .uri("/dashboard/api/me")
                .header(header::COOKIE, "refresh_token=stale")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["message"], "Not authenticated");
}
