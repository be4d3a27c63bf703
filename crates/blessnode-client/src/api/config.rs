// ============================================
// File: crates/blessnode-client/src/api/config.rs
// ============================================
//! # Gateway API Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Remote endpoints and HTTP settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Gateway API base URL (without trailing `/nodes`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Public IP lookup endpoint returning `{"ip": "..."}`.
    #[serde(default = "default_ip_service_url")]
    pub ip_service_url: String,

    /// HTTP request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "https://gateway-run.bls.dev/api/v1".to_string()
}

fn default_ip_service_url() -> String {
    "https://tight-block-2413.txlabs.workers.dev".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            ip_service_url: default_ip_service_url(),
            request_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !is_http_url(&self.base_url) {
            return Err("base_url must be an http(s) URL".to_string());
        }
        if !is_http_url(&self.ip_service_url) {
            return Err("ip_service_url must be an http(s) URL".to_string());
        }
        if self.request_timeout_secs == Some(0) {
            return Err("request_timeout_secs must be > 0 when set".to_string());
        }
        Ok(())
    }

    /// Returns the request timeout, if configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Builds `{base_url}/nodes/{node_id}[/{suffix}]`.
    pub fn node_url(&self, node_id: &str, suffix: Option<&str>) -> String {
        let base = self.base_url.trim_end_matches('/');
        match suffix {
            Some(suffix) => format!("{base}/nodes/{node_id}/{suffix}"),
            None => format!("{base}/nodes/{node_id}"),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}
