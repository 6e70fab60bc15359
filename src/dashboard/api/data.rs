//! Dashboard Data API
//!
//! JSON endpoints the dashboard pages load their tables and charts from.
//! Each call forwards the browser's cookies to the backend unchanged; the
//! backend decides whether the session is good.

use super::AppState;
use crate::api::{
    ApiClient, ApiError, ApiKey, CreatedApiKey, CurrentUser, Invite, InviteRole, Page, PageQuery,
    TestRun, Trace,
};
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
    routing::{delete, get},
    Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Client for the backend carrying the caller's cookies
fn backend(state: &AppState, headers: &HeaderMap) -> ApiClient {
    match headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) {
        Some(cookies) => state.api.with_cookies(cookies),
        None => state.api.clone(),
    }
}

pub async fn list_traces(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Trace>>, ApiError> {
    Ok(Json(backend(&state, &headers).list_traces(query).await?))
}

pub async fn get_trace(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Trace>, ApiError> {
    Ok(Json(backend(&state, &headers).get_trace(&id).await?))
}

pub async fn list_test_runs(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<TestRun>>, ApiError> {
    Ok(Json(backend(&state, &headers).list_test_runs(query).await?))
}

pub async fn get_test_run(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<TestRun>, ApiError> {
    Ok(Json(backend(&state, &headers).get_test_run(&id).await?))
}

pub async fn list_api_keys(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<ApiKey>>, ApiError> {
    Ok(Json(backend(&state, &headers).list_api_keys().await?))
}

#[derive(Debug, Deserialize)]
pub struct CreateApiKeyBody {
    pub name: String,
}

pub async fn create_api_key(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateApiKeyBody>,
) -> Result<(StatusCode, Json<CreatedApiKey>), ApiError> {
    let created = backend(&state, &headers).create_api_key(&body.name).await?;
    tracing::info!(key_id = %created.api_key.id, "API key created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn revoke_api_key(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let result = backend(&state, &headers).revoke_api_key(&id).await?;
    tracing::info!(key_id = %id, "API key revoked");
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct InviteBody {
    pub email: String,
    #[serde(default)]
    pub role: InviteRole,
}

pub async fn create_invite(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<InviteBody>,
) -> Result<(StatusCode, Json<Invite>), ApiError> {
    let invite = backend(&state, &headers)
        .create_invite(&body.email, body.role)
        .await?;
    Ok((StatusCode::CREATED, Json(invite)))
}

pub async fn current_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<CurrentUser>, ApiError> {
    Ok(Json(backend(&state, &headers).current_user().await?))
}

/// Dashboard data routes, mounted under `/dashboard/api`
pub fn data_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/traces", get(list_traces))
        .route("/traces/{id}", get(get_trace))
        .route("/test-runs", get(list_test_runs))
        .route("/test-runs/{id}", get(get_test_run))
        .route("/api-keys", get(list_api_keys).post(create_api_key))
        .route("/api-keys/{id}", delete(revoke_api_key))
        .route("/invites", axum::routing::post(create_invite))
        .route("/me", get(current_user))
        .with_state(state)
}
