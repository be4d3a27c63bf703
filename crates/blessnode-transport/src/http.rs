// ============================================
// File: crates/blessnode-transport/src/http.rs
// ============================================
//! # Reqwest HTTP Transport
//!
//! ## Creation Reason
//! Provides the production `HttpTransport` over HTTPS, wrapping
//! `reqwest::Client` and applying forward proxies per request.
//!
//! ## Main Functionality
//! - `ReqwestTransport`: main transport implementation
//! - One `reqwest::Client` per distinct proxy, built lazily and cached
//! - Optional request timeout
//!
//! ## Design Choices
//! - reqwest binds proxies at client construction, so each proxy URI
//!   gets its own client; connection pools stay per proxy
//! - The body is always read as text so callers can report it verbatim
//!
//! ## ⚠️ Important Note for Next Developer
//! - No timeout unless configured: a hung call stalls only that call
//! - The cache grows with the number of distinct proxies in the list
//!
//! ## Last Modified
//! v0.1.0 - Initial HTTP transport implementation

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::{Result, TransportError};
use crate::proxy::ProxyEndpoint;
use crate::traits::{HttpRequest, HttpResponse, HttpTransport, Method};

// ============================================
// ReqwestTransport
// ============================================

/// HTTPS transport backed by `reqwest`.
///
/// # Example
/// ```ignore
/// use blessnode_transport::{HttpRequest, HttpTransport, ReqwestTransport};
///
/// let transport = ReqwestTransport::new(None)?;
/// let response = transport
///     .send(HttpRequest::get("https://tight-block-2413.txlabs.workers.dev"), None)
///     .await?;
/// println!("{}", response.body);
/// ```
pub struct ReqwestTransport {
    /// Per-request timeout, if any.
    timeout: Option<Duration>,
    /// Client without proxy.
    direct: reqwest::Client,
    /// Clients keyed by proxy URI.
    proxied: Mutex<HashMap<String, reqwest::Client>>,
}

impl ReqwestTransport {
    /// Creates a new transport.
    ///
    /// # Arguments
    /// * `timeout` - Optional per-request timeout
    ///
    /// # Errors
    /// Returns `ClientBuild` if the TLS backend cannot be initialised.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let direct = Self::builder(timeout)
            .build()
            .map_err(|e| TransportError::client_build(e.to_string()))?;

        Ok(Self {
            timeout,
            direct,
            proxied: Mutex::new(HashMap::new()),
        })
    }

    fn builder(timeout: Option<Duration>) -> reqwest::ClientBuilder {
        let builder = reqwest::Client::builder()
            .user_agent(concat!("blessnode/", env!("CARGO_PKG_VERSION")));
        match timeout {
            Some(t) => builder.timeout(t),
            None => builder,
        }
    }

    /// Returns the client to use for `proxy`, building it on first use.
    fn client_for(&self, proxy: Option<&ProxyEndpoint>) -> Result<reqwest::Client> {
        let Some(proxy) = proxy else {
            return Ok(self.direct.clone());
        };

        let uri = proxy.to_uri();
        let mut cache = self.proxied.lock();
        if let Some(client) = cache.get(&uri) {
            return Ok(client.clone());
        }

        debug!("Building HTTP client for proxy {}", proxy);
        let reqwest_proxy = reqwest::Proxy::all(&uri)
            .map_err(|e| TransportError::invalid_proxy(proxy.to_string(), e.to_string()))?;
        let client = Self::builder(self.timeout)
            .proxy(reqwest_proxy)
            .build()
            .map_err(|e| TransportError::client_build(e.to_string()))?;

        cache.insert(uri, client.clone());
        Ok(client)
    }

    /// Returns the number of cached proxied clients.
    #[must_use]
    pub fn cached_proxy_clients(&self) -> usize {
        self.proxied.lock().len()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest, proxy: Option<&ProxyEndpoint>) -> Result<HttpResponse> {
        let client = self.client_for(proxy)?;

        let mut builder = match request.method {
            Method::Get => client.get(&request.url),
            Method::Post => client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        trace!("{} {}", request.method, request.url);

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&request.url, &e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(&request.url, &e))?;

        trace!("{} {} -> {} ({} bytes)", request.method, request.url, status, body.len());
        Ok(HttpResponse { status, body })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("timeout", &self.timeout)
            .field("cached_proxy_clients", &self.cached_proxy_clients())
            .finish_non_exhaustive()
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::ProxyScheme;

    #[test]
    fn test_proxy_clients_are_cached() {
        let transport = ReqwestTransport::new(Some(Duration::from_secs(5))).unwrap();
        let a = ProxyEndpoint::new(ProxyScheme::Http, "10.0.0.1", 8080);
        let b = ProxyEndpoint::new(ProxyScheme::Socks5, "10.0.0.2", 1080);

        transport.client_for(Some(&a)).unwrap();
        transport.client_for(Some(&a)).unwrap();
        assert_eq!(transport.cached_proxy_clients(), 1);

        transport.client_for(Some(&b)).unwrap();
        assert_eq!(transport.cached_proxy_clients(), 2);

        transport.client_for(None).unwrap();
        assert_eq!(transport.cached_proxy_clients(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let transport = ReqwestTransport::new(Some(Duration::from_secs(2))).unwrap();
        // Port 9 on localhost: nothing listens there in CI containers.
        let err = transport
            .send(HttpRequest::get("http://127.0.0.1:9/"), None)
            .await
            .unwrap_err();
        assert!(err.is_network_error());
    }
}
