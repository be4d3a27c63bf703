// ============================================
// File: crates/blessnode-client/src/api/mod.rs
// ============================================
//! # Gateway API Module
//!
//! ## Creation Reason
//! Provides communication with the node gateway for registration,
//! session control and liveness pings.
//!
//! ## Main Functionality
//! - `NodeClient`: HTTP client for the `/nodes/{id}` endpoints
//! - `IpResolver`: public IP lookup used during registration
//! - `ProxyRouter`: per-call proxy selection
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        API Module                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐  │
//! │  │  Register    │  │  Session     │  │  Ping            │  │
//! │  │  (+ IP)      │  │  start/stop  │  │  (liveness)      │  │
//! │  └──────┬───────┘  └──────┬───────┘  └────────┬─────────┘  │
//! │         │                 │                    │            │
//! │         └─────────────────┼────────────────────┘            │
//! │                           ▼                                 │
//! │         ┌──────────────────┐    ┌──────────────┐            │
//! │         │    NodeClient    │◄───│ ProxyRouter  │            │
//! │         │ (Bearer + JSON)  │    └──────────────┘            │
//! │         └────────┬─────────┘                                │
//! │                  │                                          │
//! └──────────────────┼──────────────────────────────────────────┘
//!                    ▼
//!             HttpTransport ──► [proxy] ──► gateway
//! ```
//!
//! ## Endpoints
//! ```text
//! POST /nodes/{id}                 { ipAddress, hardwareId }
//! POST /nodes/{id}/start-session
//! POST /nodes/{id}/stop-session
//! POST /nodes/{id}/ping            -> { _id, nodeId, pings: [...] }
//!
//! Header on every call:  Authorization: Bearer <token>
//! ```
//!
//! ## Last Modified
//! v0.1.0 - Initial API module

pub mod client;
pub mod config;
pub mod models;
pub mod resolver;
pub mod routing;

pub use client::NodeClient;
pub use config::ApiConfig;
pub use models::{PingEntry, PingRecord, RegistrationResponse, SessionResponse};
pub use resolver::IpResolver;
pub use routing::{ProxyMode, ProxyRouter};
