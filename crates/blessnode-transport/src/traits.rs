// ============================================
// File: crates/blessnode-transport/src/traits.rs
// ============================================
//! # Transport Traits
//!
//! ## Creation Reason
//! Defines the abstract HTTP interface used by the IP resolver and the
//! node lifecycle client, enabling mock implementations in tests.
//!
//! ## Main Functionality
//! - `HttpTransport`: request/response interface with optional proxy
//! - `HttpRequest` / `HttpResponse`: transport-neutral messages
//! - `Method`: the subset of HTTP methods the client needs
//!
//! ## Design Philosophy
//! - Responses carry the raw body text; JSON decoding is the caller's job
//!   so a failed decode can still report what the server sent
//! - Async-first design with `async_trait`
//!
//! ## ⚠️ Important Note for Next Developer
//! - Implementations must be Send + Sync for use in spawned ping tasks
//! - A non-2xx status is a successful `send`; inspect `status`
//!
//! ## Last Modified
//! v0.1.0 - Initial trait definitions

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::proxy::ProxyEndpoint;

// ============================================
// Method
// ============================================

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
}

impl Method {
    /// Returns the canonical method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================
// HttpRequest
// ============================================

/// Transport-neutral HTTP request.
///
/// # Example
/// ```
/// use blessnode_transport::traits::{HttpRequest, Method};
///
/// let req = HttpRequest::post("https://api.example.com/nodes/n1/ping")
///     .header("Authorization", "Bearer tok");
/// assert_eq!(req.method, Method::Post);
/// assert_eq!(req.header_value("authorization"), Some("Bearer tok"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Header name/value pairs, in insertion order.
    pub headers: Vec<(String, String)>,
    /// Optional JSON body. Sets `Content-Type: application/json` when sent.
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Creates a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Creates a POST request without a body.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Looks up a header value (case-insensitive name match).
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// ============================================
// HttpResponse
// ============================================

/// Response status and raw body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

// ============================================
// HttpTransport Trait
// ============================================

/// Abstract interface for HTTP request/response exchange.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks.
///
/// # Example
/// ```ignore
/// async fn fetch<T: HttpTransport>(transport: &T, proxy: Option<&ProxyEndpoint>) -> Result<String> {
///     let response = transport.send(HttpRequest::get("https://example.com"), proxy).await?;
///     Ok(response.body)
/// }
/// ```
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends a request, optionally through a forward proxy.
    ///
    /// # Arguments
    /// * `request` - Request to send
    /// * `proxy` - Proxy to relay the connection through, if any
    ///
    /// # Errors
    /// Returns error if the exchange fails at the network level or the
    /// proxy cannot be applied. HTTP error statuses are not errors.
    async fn send(&self, request: HttpRequest, proxy: Option<&ProxyEndpoint>) -> Result<HttpResponse>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    async fn send(&self, request: HttpRequest, proxy: Option<&ProxyEndpoint>) -> Result<HttpResponse> {
        (**self).send(request, proxy).await
    }
}

// ============================================
// Tests
// ============================================
