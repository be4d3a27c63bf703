// ============================================
// File: crates/blessnode-client/src/error.rs
// ============================================
//! # Client Error Types
//!
//! ## Error Taxonomy
//! - Config: bad or missing local files and settings
//! - Network: transport failures (wrapped `TransportError`)
//! - Parse: non-JSON or unexpectedly shaped responses (raw body kept)
//! - Api: error status from the gateway where a typed payload is required
//!
//! ## ⚠️ Important Note for Next Developer
//! - Nothing here is retried; callers decide what is fatal
//! - `Registration` wraps whatever stopped the registration call
//!
//! ## Last Modified
//! v0.1.0 - Initial client error types

use std::path::Path;

use thiserror::Error;

use blessnode_common::error::CommonError;
use blessnode_common::NodeId;
use blessnode_transport::error::TransportError;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client error types.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to load configuration from '{path}': {reason}")]
    ConfigLoad {
        path: String,
        reason: String,
    },

    #[error("Invalid configuration: {field} - {reason}")]
    ConfigInvalid {
        field: String,
        reason: String,
    },

    #[error("Failed to read '{path}': {reason}")]
    CredentialFile {
        path: String,
        reason: String,
    },

    #[error("Invalid content in '{path}': {source}")]
    Credentials {
        path: String,
        #[source]
        source: CommonError,
    },

    #[error("Proxy list '{path}' is empty")]
    EmptyProxyList {
        path: String,
    },

    #[error("Invalid proxy on line {line} of '{path}': {source}")]
    InvalidProxyLine {
        path: String,
        line: usize,
        #[source]
        source: TransportError,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to parse {context} response: {reason}")]
    Parse {
        context: String,
        reason: String,
        body: String,
    },

    #[error("{context} response is missing field '{field}'")]
    MissingField {
        context: String,
        field: String,
        body: String,
    },

    #[error("{context} request rejected with status {status}")]
    Api {
        context: String,
        status: u16,
        body: String,
    },

    #[error("Ping response for node {node_id} contains no pings")]
    EmptyPingHistory {
        node_id: NodeId,
    },

    #[error("Registration of node {node_id} failed: {source}")]
    Registration {
        node_id: NodeId,
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    /// Creates a `ConfigLoad` error.
    pub fn config_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `ConfigInvalid` error.
    pub fn config_invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `CredentialFile` error for `path`.
    pub fn credential_file(path: &Path, reason: impl Into<String>) -> Self {
        Self::CredentialFile {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a `Credentials` error for `path`.
    pub fn credentials(path: &Path, source: CommonError) -> Self {
        Self::Credentials {
            path: path.display().to_string(),
            source,
        }
    }

    /// Creates a `Parse` error keeping the raw body.
    pub fn parse(context: impl Into<String>, reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
            reason: reason.into(),
            body: body.into(),
        }
    }

    /// Creates a `MissingField` error keeping the raw body.
    pub fn missing_field(context: impl Into<String>, field: impl Into<String>, body: impl Into<String>) -> Self {
        Self::MissingField {
            context: context.into(),
            field: field.into(),
            body: body.into(),
        }
    }

    /// Creates an `Api` error.
    pub fn api(context: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            context: context.into(),
            status,
            body: body.into(),
        }
    }

    /// Wraps a failure of the registration step.
    pub fn registration(node_id: NodeId, source: ClientError) -> Self {
        Self::Registration {
            node_id,
            source: Box::new(source),
        }
    }

    /// Unwraps `Registration` to the error that caused it.
    #[must_use]
    pub fn root(&self) -> &ClientError {
        match self {
            Self::Registration { source, .. } => source.root(),
            other => other,
        }
    }

    /// Raw response text attached to parse and API errors.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self.root() {
            Self::Parse { body, .. } | Self::MissingField { body, .. } | Self::Api { body, .. } => {
                Some(body)
            }
            _ => None,
        }
    }

    /// Returns `true` for local configuration and credential problems.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        match self.root() {
            Self::ConfigLoad { .. }
            | Self::ConfigInvalid { .. }
            | Self::CredentialFile { .. }
            | Self::Credentials { .. }
            | Self::EmptyProxyList { .. }
            | Self::InvalidProxyLine { .. } => true,
            Self::Transport(e) => e.is_config_error(),
            _ => false,
        }
    }

    /// Returns `true` if the request never got a response.
    #[must_use]
    pub fn is_network_error(&self) -> bool {
        matches!(self.root(), Self::Transport(e) if e.is_network_error())
    }

    /// Returns `true` if a response arrived but could not be used.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self.root(),
            Self::Parse { .. } | Self::MissingField { .. } | Self::EmptyPingHistory { .. }
        )
    }

    /// Errors that no amount of waiting for the next tick will fix.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.is_config_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> NodeId {
        "n1".parse().unwrap()
    }

    #[test]
    fn test_error_display() {
        let err = ClientError::config_load("/etc/blessnode.toml", "file not found");
        assert!(err.to_string().contains("/etc/blessnode.toml"));
    }

    #[test]
    fn test_registration_wraps_root_cause() {
        let inner = ClientError::Transport(TransportError::request("https://ip.test", "refused"));
        let err = ClientError::registration(node(), inner);

        assert!(err.to_string().contains("n1"));
        assert!(err.is_network_error());
        assert!(!err.is_config_error());
        assert!(matches!(err.root(), ClientError::Transport(_)));
    }

    #[test]
    fn test_response_body_is_kept() {
        let err = ClientError::registration(node(), ClientError::parse("registration", "expected value", "<html>502</html>"));
        assert_eq!(err.response_body(), Some("<html>502</html>"));
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_error_classification() {
        let config_err = ClientError::EmptyProxyList {
            path: "proxy.txt".into(),
        };
        assert!(config_err.is_config_error());
        assert!(config_err.is_fatal());

        let ping_err = ClientError::EmptyPingHistory { node_id: node() };
        assert!(ping_err.is_parse_error());
        assert!(!ping_err.is_fatal());
    }
}
