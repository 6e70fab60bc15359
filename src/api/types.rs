//! Backend Data Models
//!
//! Shapes of the records the dashboard displays. Fields the web front does
//! not interpret are kept in `extra` so responses pass through unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One page of a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        (self.page as u64) * (self.page_size as u64) < self.total
    }
}

/// Paging query for listings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

/// Largest page the web front will ask for
pub const MAX_PAGE_SIZE: u32 = 100;

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PageQuery {
    /// Query string with page clamped to >= 1 and size to 1..=MAX_PAGE_SIZE
    pub fn to_query_string(&self) -> String {
        format!(
            "page={}&page_size={}",
            self.page.max(1),
            self.page_size.clamp(1, MAX_PAGE_SIZE)
        )
    }
}

/// A captured LLM call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    pub id: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub latency_ms: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Status of a regression test run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TestRunStatus {
    Pending,
    Running,
    Passed,
    Failed,
    Error,
    #[serde(other)]
    Unknown,
}

/// A regression test run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRun {
    pub id: String,
    pub status: TestRunStatus,
    #[serde(default)]
    pub passed: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TestRun {
    /// Pass rate in percent, `None` before any case finished
    pub fn pass_rate(&self) -> Option<f64> {
        let total = u64::from(self.passed) + u64::from(self.failed);
        (total > 0).then(|| self.passed as f64 / total as f64 * 100.0)
    }
}

/// API key metadata (the secret is never listed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_used_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Freshly created key; `key` is shown once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedApiKey {
    pub key: String,
    #[serde(flatten)]
    pub api_key: ApiKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApiKeyRequest {
    pub name: String,
}

/// Organization role granted by an invite
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InviteRole {
    #[default]
    Member,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInviteRequest {
    pub email: String,
    #[serde(default)]
    pub role: InviteRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invite {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub role: InviteRole,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Signed-in user as reported by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
