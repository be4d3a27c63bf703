// ============================================
// File: crates/blessnode-transport/src/error.rs
// ============================================
//! # Transport Error Types
//!
//! ## Creation Reason
//! Defines error types specific to HTTP transport operations,
//! including proxy parsing and connection failures.
//!
//! ## Main Functionality
//! - `TransportError`: Primary error enum for transport operations
//! - Conversion from `reqwest::Error`
//! - Categorization of network vs configuration errors
//!
//! ## Error Categories
//! 1. **Network Errors**: connect/send/receive failures, timeouts
//! 2. **Proxy Errors**: malformed proxy URIs, unsupported schemes
//! 3. **Setup Errors**: HTTP client construction failures
//!
//! ## ⚠️ Important Note for Next Developer
//! - Non-2xx responses are NOT transport errors; the caller decides
//! - Proxy credentials must never appear in error messages
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

// ============================================
// Result Type Alias
// ============================================

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

// ============================================
// TransportError
// ============================================

/// Transport layer error types.
#[derive(Error, Debug)]
pub enum TransportError {
    // ========================================
    // Network Errors
    // ========================================

    /// Request could not be completed (connect, TLS, proxy tunnel, body read).
    #[error("Request to {url} failed: {reason}")]
    Request {
        /// Target URL
        url: String,
        /// Why the request failed
        reason: String,
    },

    /// Request exceeded the configured timeout.
    #[error("Request to {url} timed out")]
    Timeout {
        /// Target URL
        url: String,
    },

    // ========================================
    // Proxy Errors
    // ========================================

    /// Proxy line could not be parsed.
    #[error("Invalid proxy '{proxy}': {reason}")]
    InvalidProxy {
        /// Proxy line with credentials stripped
        proxy: String,
        /// Why it's invalid
        reason: String,
    },

    // ========================================
    // Setup Errors
    // ========================================

    /// HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {reason}")]
    ClientBuild {
        /// Why construction failed
        reason: String,
    },

    /// Request could not be built (bad URL, header, method).
    #[error("Invalid request: {reason}")]
    InvalidRequest {
        /// Why the request is invalid
        reason: String,
    },
}

impl TransportError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates a `Request` error.
    pub fn request(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Request {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates an `InvalidProxy` error.
    pub fn invalid_proxy(proxy: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidProxy {
            proxy: proxy.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `ClientBuild` error.
    pub fn client_build(reason: impl Into<String>) -> Self {
        Self::ClientBuild {
            reason: reason.into(),
        }
    }

    /// Maps a `reqwest::Error` raised while talking to `url`.
    #[must_use]
    pub fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { url: url.to_string() }
        } else if err.is_builder() {
            Self::InvalidRequest {
                reason: err.to_string(),
            }
        } else {
            Self::request(url, err.to_string())
        }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if this is a network-related error.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Request { .. } | Self::Timeout { .. })
    }

    /// Returns `true` if this error comes from local configuration.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidProxy { .. } | Self::ClientBuild { .. } | Self::InvalidRequest { .. }
        )
    }
}

// ============================================
// Tests
// ============================================
