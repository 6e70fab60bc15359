//! Backend API Client
//!
//! Thin wrapper over `reqwest` used by every dashboard view. One attempt per
//! call: failures come back as [`ApiError`] for the caller to display, and
//! nothing is retried.

use super::error::ApiError;
use futures_util::future::{AbortRegistration, Abortable};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, COOKIE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Backend used when `API_BASE_URL` is unset
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend API, without trailing slash
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// Request payload
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(Value),
    Text(String),
}

/// One backend call
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub path: String,
    pub body: Option<RequestBody>,
    pub headers: HeaderMap,
}

impl RequestOptions {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let value =
            serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    /// Attach a raw text body (pair with a `Content-Type` override)
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    /// Set a header, replacing any default of the same name
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Backend API client
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    /// `Cookie` header forwarded on every request
    cookies: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cookies: None,
        })
    }

    /// Clone of this client that forwards the caller's cookies
    pub fn with_cookies(&self, cookie_header: impl Into<String>) -> Self {
        let cookies = cookie_header.into();
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            cookies: (!cookies.is_empty()).then_some(cookies),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Send a request and decode the JSON response into `T`.
    ///
    /// Bodies default to `Content-Type: application/json` unless the options
    /// set their own. An empty success body decodes as JSON `null`.
    pub async fn request<T: DeserializeOwned>(&self, opts: RequestOptions) -> Result<T, ApiError> {
        let url = self.url(&opts.path);
        debug!(method = %opts.method, url = %url, "Backend request");

        let mut headers = opts.headers;
        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if !headers.contains_key(ACCEPT) {
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }
        if let Some(cookies) = &self.cookies {
            let value = HeaderValue::from_str(cookies)
                .map_err(|e| ApiError::InvalidRequest(format!("Invalid cookie header: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let mut builder = self.client.request(opts.method.clone(), &url).headers(headers);
        builder = match opts.body {
            Some(RequestBody::Json(value)) => builder.body(
                serde_json::to_vec(&value).map_err(|e| ApiError::InvalidRequest(e.to_string()))?,
            ),
            Some(RequestBody::Text(text)) => builder.body(text),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let payload = serde_json::from_slice::<Value>(&bytes).ok();
            let err = ApiError::from_status(status.as_u16(), payload);
            warn!(method = %opts.method, url = %url, status = status.as_u16(), "Backend error: {}", err);
            return Err(err);
        }

        if bytes.is_empty() {
            return serde_json::from_value(Value::Null).map_err(|e| ApiError::Decode(e.to_string()));
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// [`request`](Self::request) that stops when the paired
    /// [`AbortHandle`](futures_util::future::AbortHandle) fires
    pub async fn request_abortable<T: DeserializeOwned>(
        &self,
        opts: RequestOptions,
        registration: AbortRegistration,
    ) -> Result<T, ApiError> {
        match Abortable::new(self.request(opts), registration).await {
            Ok(result) => result,
            Err(_) => {
                debug!("Backend request aborted");
                Err(ApiError::Aborted)
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(RequestOptions::get(path)).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(RequestOptions::post(path).json(body)?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(RequestOptions::delete(path)).await
    }
}
