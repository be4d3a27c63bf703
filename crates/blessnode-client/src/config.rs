// ============================================
// File: crates/blessnode-client/src/config.rs
// ============================================
//! # Client Configuration
//!
//! ## Creation Reason
//! Provides configuration management for the node client, loaded from
//! an optional TOML file with per-field defaults.
//!
//! ## Main Functionality
//! - `ClientConfig`: Main configuration structure
//! - TOML file loading and parsing
//! - Configuration validation
//!
//! ## Configuration Sections
//! - `api`: Gateway base URL, IP lookup URL, request timeout
//! - `files`: Identity, token and proxy list paths
//! - `proxy`: Proxy selection policy
//! - `liveness`: Ping interval and shutdown behaviour
//! - `logging`: Log level
//!
//! ## Example Configuration
//! ```toml
//! [api]
//! base_url = "https://gateway-run.bls.dev/api/v1"
//! ip_service_url = "https://tight-block-2413.txlabs.workers.dev"
//!
//! [files]
//! identity_file = "id.txt"
//! token_file = "user.txt"
//! proxy_file = "proxy.txt"
//!
//! [proxy]
//! selection = "per-request"
//!
//! [liveness]
//! ping_interval_secs = 60
//! stop_session_on_shutdown = false
//!
//! [logging]
//! level = "info"
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Every field has a default; an absent file yields `ClientConfig::default()`
//! - Whether proxies are used at all is decided at startup (CLI/prompt),
//!   not here; this file only chooses how they are selected
//!
//! ## Last Modified
//! v0.1.0 - Initial configuration implementation

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::ApiConfig;
use crate::error::{ClientError, Result};

// ============================================
// ClientConfig
// ============================================

/// Main client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Remote endpoints.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local credential files.
    #[serde(default)]
    pub files: FilesConfig,

    /// Proxy selection policy.
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// Liveness loop settings.
    #[serde(default)]
    pub liveness: LivenessConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        info!("Loading configuration from: {}", path_str);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ClientError::config_load(&path_str, e.to_string()))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ClientError::config_load(&path_str, e.to_string()))?;

        config.validate()?;

        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns defaults.
    ///
    /// # Errors
    /// Returns error if the file exists but is invalid.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            Self::load(path).await
        } else {
            info!("Config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Loads configuration from a string (useful for testing).
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ClientError::config_load("<string>", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        self.api
            .validate()
            .map_err(|e| ClientError::config_invalid("api", e))?;
        self.files.validate()?;
        self.liveness.validate()?;
        Ok(())
    }

    /// Serializes configuration to TOML string.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

// ============================================
// FilesConfig
// ============================================

/// Paths of the local credential files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesConfig {
    /// `nodeId:hardwareId` file.
    #[serde(default = "default_identity_file")]
    pub identity_file: PathBuf,

    /// Bearer token file.
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,

    /// Proxy list, one URI per line.
    #[serde(default = "default_proxy_file")]
    pub proxy_file: PathBuf,
}

fn default_identity_file() -> PathBuf {
    PathBuf::from("id.txt")
}

fn default_token_file() -> PathBuf {
    PathBuf::from("user.txt")
}

fn default_proxy_file() -> PathBuf {
    PathBuf::from("proxy.txt")
}

impl FilesConfig {
    fn validate(&self) -> Result<()> {
        for (field, path) in [
            ("files.identity_file", &self.identity_file),
            ("files.token_file", &self.token_file),
            ("files.proxy_file", &self.proxy_file),
        ] {
            if path.as_os_str().is_empty() {
                return Err(ClientError::config_invalid(field, "cannot be empty"));
            }
        }
        Ok(())
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            identity_file: default_identity_file(),
            token_file: default_token_file(),
            proxy_file: default_proxy_file(),
        }
    }
}

// ============================================
// ProxyConfig
// ============================================

/// When a proxy is picked from the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProxySelection {
    /// Re-read the list and pick a proxy for every call.
    #[default]
    PerRequest,
    /// Pick once on the first call and keep it for the whole run.
    PerRun,
}

/// Proxy configuration section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Selection policy.
    #[serde(default)]
    pub selection: ProxySelection,
}

// ============================================
// LivenessConfig
// ============================================

/// Liveness loop configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivenessConfig {
    /// Seconds between steady-state pings.
    #[serde(default = "default_ping_interval")]
    pub ping_interval_secs: u64,

    /// Call stop-session when the client shuts down gracefully.
    #[serde(default)]
    pub stop_session_on_shutdown: bool,
}

/// Longest accepted ping interval (one day).
pub const MAX_PING_INTERVAL_SECS: u64 = 86_400;

fn default_ping_interval() -> u64 {
    60
}

impl LivenessConfig {
    fn validate(&self) -> Result<()> {
        if self.ping_interval_secs == 0 {
            return Err(ClientError::config_invalid(
                "liveness.ping_interval_secs",
                "must be greater than 0",
            ));
        }
        if self.ping_interval_secs > MAX_PING_INTERVAL_SECS {
            return Err(ClientError::config_invalid(
                "liveness.ping_interval_secs",
                format!("must be at most {MAX_PING_INTERVAL_SECS}"),
            ));
        }
        Ok(())
    }

    /// Returns the ping interval.
    #[must_use]
    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_interval_secs)
    }
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            ping_interval_secs: default_ping_interval(),
            stop_session_on_shutdown: false,
        }
    }
}

// ============================================
// LoggingConfig
// ============================================

/// Logging configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.base_url, "https://gateway-run.bls.dev/api/v1");
        assert_eq!(config.liveness.ping_interval(), Duration::from_secs(60));
        assert_eq!(config.files.identity_file, PathBuf::from("id.txt"));
        assert_eq!(config.proxy.selection, ProxySelection::PerRequest);
    }

    #[test]
    fn test_full_config_format() {
        let toml = r#"
            [api]
            base_url = "http://127.0.0.1:8080/api/v1"
            ip_service_url = "http://127.0.0.1:8081"
            request_timeout_secs = 15

            [files]
            identity_file = "/var/lib/blessnode/id.txt"
            token_file = "/var/lib/blessnode/user.txt"
            proxy_file = "/var/lib/blessnode/proxy.txt"

            [proxy]
            selection = "per-run"

            [liveness]
            ping_interval_secs = 30
            stop_session_on_shutdown = true

            [logging]
            level = "debug"
        "#;

        let config = ClientConfig::from_str(toml).unwrap();
        assert_eq!(config.api.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.proxy.selection, ProxySelection::PerRun);
        assert_eq!(config.liveness.ping_interval_secs, 30);
        assert!(config.liveness.stop_session_on_shutdown);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = ClientConfig::from_str("[liveness]\nping_interval_secs = 5\n").unwrap();
        assert_eq!(config.liveness.ping_interval_secs, 5);
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.files, FilesConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(ClientConfig::from_str("[liveness]\nping_interval_secs = 0\n").is_err());
        assert!(ClientConfig::from_str("[proxy]\nselection = \"sometimes\"\n").is_err());
        assert!(ClientConfig::from_str("[files]\ntoken_file = \"\"\n").is_err());
    }

    #[test]
    fn test_ping_interval_upper_bound() {
        let day = ClientConfig::from_str("[liveness]\nping_interval_secs = 86400\n").unwrap();
        assert_eq!(day.liveness.ping_interval_secs, MAX_PING_INTERVAL_SECS);

        for toml in [
            "[liveness]\nping_interval_secs = 86401\n",
            "[liveness]\nping_interval_secs = 9223372036854775807\n",
        ] {
            let err = ClientConfig::from_str(toml).unwrap_err();
            assert!(matches!(err, ClientError::ConfigInvalid { ref field, .. } if field == "liveness.ping_interval_secs"));
        }
    }

    #[test]
    fn test_toml_roundtrip_keeps_selection() {
        let mut config = ClientConfig::default();
        config.proxy.selection = ProxySelection::PerRun;
        let parsed = ClientConfig::from_str(&config.to_toml()).unwrap();
        assert_eq!(parsed, config);
    }

    #[tokio::test]
    async fn test_load_or_default_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load_or_default(dir.path().join("missing.toml"))
            .await
            .unwrap();
        assert_eq!(config, ClientConfig::default());
    }
}
