// ============================================
// File: crates/blessnode-common/src/types.rs
// ============================================
//! # Core Type Definitions
//!
//! ## Creation Reason
//! Centralizes the identity types the client presents to the gateway,
//! ensuring the node identifier, hardware identifier and bearer token
//! are validated once and never confused with each other.
//!
//! ## Main Functionality
//! - `NodeId`: Identifier of the node registered with the gateway
//! - `NodeIdentity`: `nodeId:hardwareId` pair read from the identity file
//! - `AuthToken`: Opaque bearer token, redacted and zeroized
//!
//! ## Main Logical Flow
//! 1. Identity and token text is read from local files at startup
//! 2. Parsed here with `FromStr` into validated types
//! 3. Injected into the lifecycle client and never mutated afterwards
//!
//! ## ⚠️ Important Note for Next Developer
//! - `AuthToken` zeroizes its buffer in `Drop`
//! - `AuthToken` must not implement `Display`; use `bearer_header()`
//! - Identity format is exactly one `:`; extra separators are rejected
//!
//! ## Last Modified
//! v0.1.0 - Initial identity types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::CommonError;

// ============================================
// Constants
// ============================================

/// Separator between node ID and hardware ID in the identity file.
pub const IDENTITY_SEPARATOR: char = ':';

// ============================================
// NodeId
// ============================================

/// Identifier of a node as known by the remote gateway.
///
/// Used verbatim as a URL path segment (`/nodes/{node_id}`), so it
/// must be non-empty and free of whitespace and `/`.
///
/// # Example
/// ```
/// use blessnode_common::types::NodeId;
///
/// let id: NodeId = "12D3KooWabc".parse().unwrap();
/// assert_eq!(id.as_str(), "12D3KooWabc");
/// assert!("".parse::<NodeId>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NodeId {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(CommonError::empty("node_id"));
        }
        if s.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(CommonError::invalid_input(
                "node_id",
                "must not contain whitespace or '/'",
            ));
        }
        Ok(Self(s.to_string()))
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================
// NodeIdentity
// ============================================

/// Node identity as stored in the identity file (`nodeId:hardwareId`).
///
/// # Example
/// ```
/// use blessnode_common::types::NodeIdentity;
///
/// let identity: NodeIdentity = "n1:h1\n".parse().unwrap();
/// assert_eq!(identity.node_id.as_str(), "n1");
/// assert_eq!(identity.hardware_id, "h1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeIdentity {
    /// Node identifier used in every API path.
    pub node_id: NodeId,
    /// Hardware fingerprint sent once during registration.
    pub hardware_id: String,
}

impl NodeIdentity {
    /// Creates an identity from already-validated parts.
    #[must_use]
    pub fn new(node_id: NodeId, hardware_id: impl Into<String>) -> Self {
        Self {
            node_id,
            hardware_id: hardware_id.into(),
        }
    }
}

impl FromStr for NodeIdentity {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let content = s.trim();
        if content.is_empty() {
            return Err(CommonError::empty("identity"));
        }

        let mut parts = content.split(IDENTITY_SEPARATOR);
        let (Some(node_id), Some(hardware_id), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(CommonError::malformed("identity", "a single nodeId:hardwareId pair"));
        };

        let hardware_id = hardware_id.trim();
        if hardware_id.is_empty() {
            return Err(CommonError::empty("hardware_id"));
        }

        Ok(Self {
            node_id: node_id.trim().parse()?,
            hardware_id: hardware_id.to_string(),
        })
    }
}

// ============================================
// AuthToken
// ============================================

/// Opaque bearer token attached to every authenticated request.
///
/// # Security Properties
/// - `Debug` output is redacted
/// - No `Display` implementation, so it cannot leak through `{}` formatting
/// - Zeroized on drop
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl Drop for AuthToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl AuthToken {
    /// Returns the `Authorization` header value (`Bearer <token>`).
    #[must_use]
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Exposes the raw token. Avoid logging the result.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken(<redacted, {} chars>)", self.0.len())
    }
}

impl FromStr for AuthToken {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err(CommonError::empty("auth_token"));
        }
        Ok(Self(token.to_string()))
    }
}

// ============================================
// Tests
// ============================================
