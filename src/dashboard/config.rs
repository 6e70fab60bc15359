//! Web Server Configuration
//!
//! Bind address, CORS and cookie settings for the web front.

use crate::config::{parse_bool, parse_var, ConfigError};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Web server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Bind address (default: 127.0.0.1)
    pub bind_addr: IpAddr,
    /// Port number (default: 3000)
    pub port: u16,
    /// Enable CORS for the listed origins
    pub cors_enabled: bool,
    pub cors_origins: Vec<String>,
    /// Enable request logging
    pub log_requests: bool,
    /// Mark cookies the server writes as `Secure` (HTTPS deployments)
    pub secure_cookies: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            cors_enabled: true,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            log_requests: true,
            secure_cookies: false,
        }
    }
}

impl DashboardConfig {
    /// Read `WEB_*` variables through `lookup`, keeping defaults for unset ones
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("WEB_BIND_ADDR") {
            config.bind_addr = parse_var("WEB_BIND_ADDR", &addr)?;
        }

        if let Some(port) = lookup("WEB_PORT") {
            config.port = parse_var("WEB_PORT", &port)?;
        }

        if let Some(val) = lookup("WEB_LOG_REQUESTS") {
            config.log_requests = parse_bool("WEB_LOG_REQUESTS", &val)?;
        }

        if let Some(val) = lookup("WEB_SECURE_COOKIES") {
            config.secure_cookies = parse_bool("WEB_SECURE_COOKIES", &val)?;
        }

        if let Some(origins) = lookup("WEB_CORS_ORIGINS") {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
            config.cors_enabled = !config.cors_origins.is_empty();
        }

        if !config.is_localhost() && !config.secure_cookies {
            tracing::warn!(
                "Web server binding to {} without secure cookies",
                config.bind_addr
            );
        }

        Ok(config)
    }

    /// Check if bound to localhost only
    pub fn is_localhost(&self) -> bool {
        self.bind_addr.is_loopback()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Base URL for this server
    pub fn base_url(&self) -> String {
        // HTTPS terminates at the reverse proxy
        format!("http://{}:{}", self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_is_localhost() {
        let config = DashboardConfig::default();
        assert!(config.is_localhost());
        assert_eq!(config.port, 3000);
        assert!(!config.secure_cookies);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = DashboardConfig::from_lookup(lookup(&[
            ("WEB_BIND_ADDR", "0.0.0.0"),
            ("WEB_PORT", "8080"),
            ("WEB_SECURE_COOKIES", "true"),
            ("WEB_CORS_ORIGINS", "https://app.example.com, https://example.com"),
        ]))
        .unwrap();

        assert!(!config.is_localhost());
        assert_eq!(config.port, 8080);
        assert!(config.secure_cookies);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.cors_origins[0], "https://app.example.com");
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let result = DashboardConfig::from_lookup(lookup(&[("WEB_PORT", "eighty")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_socket_addr_and_base_url() {
        let config = DashboardConfig::default();
        assert_eq!(config.socket_addr().port(), 3000);
        assert_eq!(config.base_url(), "http://127.0.0.1:3000");
    }
}
