//! Typed Backend Endpoints
//!
//! The calls the dashboard views make. Paths are relative to the backend base
//! URL; session cookies travel via [`ApiClient::with_cookies`].

use super::client::{ApiClient, RequestOptions};
use super::error::ApiError;
use super::types::{
    ApiKey, CreateApiKeyRequest, CreateInviteRequest, CreatedApiKey, CurrentUser, Invite,
    InviteRole, Page, PageQuery, TestRun, Trace,
};
use futures_util::future::AbortRegistration;
use serde_json::Value;

pub const TRACES_PATH: &str = "/api/traces";
pub const TEST_RUNS_PATH: &str = "/api/test-runs";
pub const API_KEYS_PATH: &str = "/api/api-keys";
pub const INVITES_PATH: &str = "/api/invites";
pub const CURRENT_USER_PATH: &str = "/api/auth/me";
pub const LOGOUT_PATH: &str = "/api/auth/logout";

/// Reject ids that would escape their path segment
fn segment(id: &str) -> Result<&str, ApiError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(id)
    } else {
        Err(ApiError::InvalidRequest(format!("Invalid id: {:?}", id)))
    }
}

impl ApiClient {
    pub async fn list_traces(&self, query: PageQuery) -> Result<Page<Trace>, ApiError> {
        self.get(&format!("{}?{}", TRACES_PATH, query.to_query_string()))
            .await
    }

    /// Trace listing that stops when the view loses interest
    pub async fn list_traces_abortable(
        &self,
        query: PageQuery,
        registration: AbortRegistration,
    ) -> Result<Page<Trace>, ApiError> {
        let path = format!("{}?{}", TRACES_PATH, query.to_query_string());
        self.request_abortable(RequestOptions::get(path), registration)
            .await
    }

    pub async fn get_trace(&self, id: &str) -> Result<Trace, ApiError> {
        self.get(&format!("{}/{}", TRACES_PATH, segment(id)?)).await
    }

    pub async fn list_test_runs(&self, query: PageQuery) -> Result<Page<TestRun>, ApiError> {
        self.get(&format!("{}?{}", TEST_RUNS_PATH, query.to_query_string()))
            .await
    }

    pub async fn get_test_run(&self, id: &str) -> Result<TestRun, ApiError> {
        self.get(&format!("{}/{}", TEST_RUNS_PATH, segment(id)?))
            .await
    }

    pub async fn list_api_keys(&self) -> Result<Vec<ApiKey>, ApiError> {
        self.get(API_KEYS_PATH).await
    }

    pub async fn create_api_key(&self, name: &str) -> Result<CreatedApiKey, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidRequest("API key name is required".into()));
        }

        self.post(
            API_KEYS_PATH,
            &CreateApiKeyRequest {
                name: name.to_string(),
            },
        )
        .await
    }

    pub async fn revoke_api_key(&self, id: &str) -> Result<Value, ApiError> {
        self.delete(&format!("{}/{}", API_KEYS_PATH, segment(id)?))
            .await
    }

    pub async fn create_invite(&self, email: &str, role: InviteRole) -> Result<Invite, ApiError> {
        let email = email.trim();
        if !email.contains('@') {
            return Err(ApiError::InvalidRequest(format!(
                "Invalid email address: {}",
                email
            )));
        }

        self.post(
            INVITES_PATH,
            &CreateInviteRequest {
                email: email.to_string(),
                role,
            },
        )
        .await
    }

    pub async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        self.get(CURRENT_USER_PATH).await
    }

    /// Ask the backend to end the session
    pub async fn logout(&self) -> Result<Value, ApiError> {
        self.request(RequestOptions::post(LOGOUT_PATH)).await
    }
}
