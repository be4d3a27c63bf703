// ============================================
// File: crates/blessnode-client/src/lib.rs
// ============================================
//! # Bless Node Client Library
//!
//! ## Creation Reason
//! Keeps a node registered and alive on the Bless network gateway:
//! register, open a session, then ping on a fixed interval, optionally
//! through forward proxies.
//!
//! ## Main Functionality
//!
//! ### Modules
//! - [`config`]: TOML client configuration
//! - [`credentials`]: identity, token and proxy list files
//! - [`api`]: gateway client, IP resolver and proxy routing
//! - [`liveness`]: periodic ping loop
//! - [`logging`]: tracing subscriber with a reloadable level
//! - [`runner`]: startup sequence and shutdown
//! - [`banner`] / [`prompt`]: terminal output and input
//! - [`error`]: client error types
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Bless Node Client                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌─────────────┐     ┌─────────────┐     ┌─────────────────┐   │
//! │  │   Config    │────►│   Runner    │────►│    Liveness     │   │
//! │  │ Credentials │     │             │     │   Scheduler     │   │
//! │  └─────────────┘     └──────┬──────┘     └────────┬────────┘   │
//! │                             │                     │            │
//! │                             ▼                     ▼            │
//! │                      ┌─────────────────────────────────┐       │
//! │                      │  NodeClient ─► IpResolver        │       │
//! │                      │      └──────► ProxyRouter        │       │
//! │                      └────────────────┬────────────────┘       │
//! ├───────────────────────────────────────┼─────────────────────────┤
//! │                     Transport Layer   ▼                         │
//! │           HttpTransport (reqwest, per-proxy clients)           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - No call is ever retried; the next liveness tick is the only retry
//! - Identity and token are loaded once per run
//! - Transport is injected so tests run against `MockTransport`
//!
//! ## Last Modified
//! v0.1.0 - Initial client library

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod banner;
pub mod config;
pub mod credentials;
pub mod error;
pub mod liveness;
pub mod logging;
pub mod prompt;
pub mod runner;

// Re-export primary types
pub use api::{NodeClient, ProxyMode, ProxyRouter};
pub use config::ClientConfig;
pub use credentials::CredentialStore;
pub use error::{ClientError, Result};
pub use liveness::{LivenessHandle, LivenessScheduler, LivenessStats};
pub use runner::NodeRunner;
