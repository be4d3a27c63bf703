// ============================================
// File: crates/blessnode-common/src/lib.rs
// ============================================
//! # bless-node Common - Shared Types Library
//!
//! ## Creation Reason
//! Provides the identity types and error definitions shared by the
//! transport layer and the node lifecycle client.
//!
//! ## Main Functionality
//! - [`types`]: Node identity and bearer token types
//! - [`error`]: Common error types and result aliases
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              blessnode-client                       │
//! │                    │                                │
//! │                    ▼                                │
//! │            blessnode-transport                      │
//! │                    │                                │
//! │                    ▼                                │
//! │             blessnode-common  ◄── You are here     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - This crate is the foundation - changes affect everything
//! - `AuthToken` must never be printed; its `Debug` is redacted
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{CommonError, Result};
pub use types::{AuthToken, NodeId, NodeIdentity};
