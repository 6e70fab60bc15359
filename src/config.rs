//! Configuration management
//!
//! Everything is read from the environment once at startup (after `dotenvy`
//! has loaded `.env`) and handed to the components that need it.

use crate::api::{ApiConfig, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::dashboard::DashboardConfig;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: String, value: String },
}

/// Full application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub dashboard: DashboardConfig,
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api = api_config_from_lookup(&lookup)?;
        let dashboard = DashboardConfig::from_lookup(&lookup)?;
        Ok(Self { dashboard, api })
    }
}

/// `API_BASE_URL` and `API_TIMEOUT_SECS`
pub fn api_config_from_lookup<F>(lookup: F) -> Result<ApiConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let base_url = lookup("API_BASE_URL")
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(invalid("API_BASE_URL", &base_url));
    }

    let timeout_secs = match lookup("API_TIMEOUT_SECS") {
        Some(raw) => parse_var("API_TIMEOUT_SECS", &raw)?,
        None => DEFAULT_TIMEOUT_SECS,
    };

    Ok(ApiConfig {
        base_url,
        timeout_secs,
    })
}

fn invalid(var: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        var: var.to_string(),
        value: value.to_string(),
    }
}

pub(crate) fn parse_var<T: FromStr>(var: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| invalid(var, raw))
}

/// Accepts `true`/`1`/`yes` and `false`/`0`/`no`
pub(crate) fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(invalid(var, raw)),
    }
}
