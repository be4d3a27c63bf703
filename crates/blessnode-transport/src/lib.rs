// ============================================
// File: crates/blessnode-transport/src/lib.rs
// ============================================
//! # bless-node Transport - HTTP I/O Layer
//!
//! ## Creation Reason
//! Provides the HTTP transport abstraction used to talk to the node
//! gateway and the IP lookup service, optionally through forward proxies.
//!
//! ## Main Functionality
//!
//! ### Modules
//! - [`traits`]: `HttpTransport` trait and request/response types
//! - [`http`]: `reqwest`-backed implementation
//! - [`proxy`]: Proxy endpoint parsing and random selection
//! - [`error`]: Transport-specific error types
//! - `mock`: Scripted transport for tests (feature `mock`)
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              blessnode-client                       │
//! │                    │                                │
//! │                    ▼                                │
//! │            blessnode-transport  ◄── You are here   │
//! │                    │                                │
//! │                    ▼                                │
//! │             blessnode-common                        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//! ```text
//! NodeClient ──HttpRequest──► HttpTransport ──► [proxy] ──► gateway
//! NodeClient ◄─HttpResponse── HttpTransport ◄──────────────── gateway
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Always depend on the trait, not `ReqwestTransport`, for testability
//! - Mock implementation available with `mock` feature
//!
//! ## Last Modified
//! v0.1.0 - Initial transport layer implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod http;
pub mod proxy;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export primary types
pub use error::{Result, TransportError};
pub use http::ReqwestTransport;
pub use proxy::{choose_proxy, choose_proxy_with, ProxyCredentials, ProxyEndpoint, ProxyScheme};
pub use traits::{HttpRequest, HttpResponse, HttpTransport, Method};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
