//! Backend API
//!
//! The backend is the system of record for users, organizations, API keys,
//! traces and test runs. This module only talks to it over HTTP/JSON.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod types;

pub use client::{
    ApiClient, ApiConfig, RequestBody, RequestOptions, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS,
};
pub use error::{extract_message, ApiError, ErrorResponse};
pub use types::{
    ApiKey, CreateApiKeyRequest, CreateInviteRequest, CreatedApiKey, CurrentUser, Invite,
    InviteRole, Page, PageQuery, TestRun, TestRunStatus, Trace,
};
