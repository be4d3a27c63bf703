// ============================================
// File: crates/blessnode-transport/src/mock.rs
// ============================================
//! # Mock HTTP Transport
//!
//! ## Creation Reason
//! Provides a scripted `HttpTransport` for testing the resolver,
//! lifecycle client and liveness loop without network access.
//!
//! ## Main Functionality
//! - Per-route canned responses (method + exact URL)
//! - Injected transport failures
//! - Optional per-route delay (honours paused tokio time)
//! - Request capture for verification, including the proxy used
//!
//! ## Usage in Tests
//! ```ignore
//! use blessnode_transport::mock::MockTransport;
//! use blessnode_transport::traits::{HttpRequest, HttpTransport, Method};
//!
//! #[tokio::test]
//! async fn test_with_mock_transport() {
//!     let transport = MockTransport::new();
//!     transport.on(Method::Get, "https://ip.test", 200, r#"{"ip":"1.2.3.4"}"#);
//!
//!     let res = transport.send(HttpRequest::get("https://ip.test"), None).await.unwrap();
//!     assert_eq!(res.body, r#"{"ip":"1.2.3.4"}"#);
//!     assert_eq!(transport.count(Method::Get, "https://ip.test"), 1);
//! }
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - This is for testing only - do not use in production
//! - Unscripted routes fail with a transport `Request` error
//! - Requests are recorded before the delay, so in-flight calls count
//!
//! ## Last Modified
//! v0.1.0 - Initial mock implementation

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Result, TransportError};
use crate::proxy::ProxyEndpoint;
use crate::traits::{HttpRequest, HttpResponse, HttpTransport, Method};

// ============================================
// Types
// ============================================

/// Scripted outcome for a route.
#[derive(Debug, Clone)]
enum Reply {
    Respond(HttpResponse),
    Fail(String),
}

#[derive(Debug, Clone)]
struct Route {
    reply: Reply,
    delay: Option<Duration>,
}

/// A request captured by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// The request as sent.
    pub request: HttpRequest,
    /// Proxy the caller asked for.
    pub proxy: Option<ProxyEndpoint>,
}

// ============================================
// MockTransport
// ============================================

/// Mock HTTP transport for testing.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Scripted routes keyed by (method, url)
    routes: Mutex<HashMap<(Method, String), Route>>,
    /// Every request received, in order
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Creates an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a response for `method url`, replacing any previous script.
    pub fn on(&self, method: Method, url: impl Into<String>, status: u16, body: impl Into<String>) {
        self.set_reply(method, url.into(), Reply::Respond(HttpResponse::new(status, body)));
    }

    /// Scripts a transport failure for `method url`.
    pub fn fail(&self, method: Method, url: impl Into<String>, reason: impl Into<String>) {
        self.set_reply(method, url.into(), Reply::Fail(reason.into()));
    }

    /// Delays the reply of an already scripted route.
    ///
    /// # Panics
    /// Panics if the route has not been scripted.
    pub fn delay(&self, method: Method, url: &str, delay: Duration) {
        let mut routes = self.routes.lock();
        let route = routes
            .get_mut(&(method, url.to_string()))
            .unwrap_or_else(|| panic!("no mock route for {method} {url}"));
        route.delay = Some(delay);
    }

    fn set_reply(&self, method: Method, url: String, reply: Reply) {
        let mut routes = self.routes.lock();
        let delay = routes.get(&(method, url.clone())).and_then(|r| r.delay);
        routes.insert((method, url), Route { reply, delay });
    }

    /// Returns a snapshot of all captured requests.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Returns how many requests hit `method url`.
    #[must_use]
    pub fn count(&self, method: Method, url: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|r| r.request.method == method && r.request.url == url)
            .count()
    }

    /// Clears captured requests, keeping the scripted routes.
    pub fn clear_requests(&self) {
        self.requests.lock().clear();
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest, proxy: Option<&ProxyEndpoint>) -> Result<HttpResponse> {
        let key = (request.method, request.url.clone());
        self.requests.lock().push(RecordedRequest {
            request,
            proxy: proxy.cloned(),
        });

        let route = self.routes.lock().get(&key).cloned();
        let Some(route) = route else {
            return Err(TransportError::request(key.1, "no mock route"));
        };

        if let Some(delay) = route.delay {
            tokio::time::sleep(delay).await;
        }

        match route.reply {
            Reply::Respond(response) => Ok(response),
            Reply::Fail(reason) => Err(TransportError::request(key.1, reason)),
        }
    }
}

// ============================================
// Tests
// ============================================
