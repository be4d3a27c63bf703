// ============================================
// File: crates/blessnode-common/src/error.rs
// ============================================
//! # Common Error Types
//!
//! ## Creation Reason
//! Provides the error type raised while parsing and validating the
//! node identity and auth token, shared by every bless-node crate.
//!
//! ## Main Functionality
//! - `CommonError`: Base error enum for identity validation
//! - `Result<T>`: Type alias using `CommonError`
//!
//! ## ⚠️ Important Note for Next Developer
//! - Never include the bearer token in error messages
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

// ============================================
// Result Type Alias
// ============================================

/// Common result type for operations that may fail.
pub type Result<T> = std::result::Result<T, CommonError>;

// ============================================
// CommonError
// ============================================

/// Common error types shared across bless-node crates.
///
/// # Example
/// ```
/// use blessnode_common::error::{CommonError, Result};
///
/// fn validate_node_id(id: &str) -> Result<()> {
///     if id.is_empty() {
///         return Err(CommonError::invalid_input("node_id", "cannot be empty"));
///     }
///     Ok(())
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    /// Invalid input data provided.
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput {
        /// Name of the field or parameter
        field: String,
        /// Description of what's wrong
        reason: String,
    },

    /// Input was empty where content is required.
    #[error("Empty value for '{field}'")]
    Empty {
        /// Name of the field
        field: String,
    },

    /// Input did not match the expected textual format.
    #[error("Malformed '{field}': expected {expected}")]
    Malformed {
        /// Name of the field
        field: String,
        /// Human-readable description of the expected format
        expected: String,
    },
}

impl CommonError {
    /// Creates an `InvalidInput` error.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an `Empty` error.
    pub fn empty(field: impl Into<String>) -> Self {
        Self::Empty {
            field: field.into(),
        }
    }

    /// Creates a `Malformed` error.
    pub fn malformed(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::Malformed {
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// Returns the name of the offending field.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidInput { field, .. } | Self::Empty { field } | Self::Malformed { field, .. } => {
                field
            }
        }
    }
}

// ============================================
// Tests
// ============================================
