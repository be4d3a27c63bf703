// ============================================
// File: crates/blessnode-client/src/api/resolver.rs
// ============================================
//! # Public IP Resolver
//!
//! Asks an external lookup service which address the gateway will see
//! us connecting from. The lookup goes through the same proxy as the
//! call that needs it, so the reported IP is the proxy's exit address.

use std::sync::Arc;

use tracing::info;

use blessnode_transport::{HttpRequest, HttpTransport, ProxyEndpoint};

use super::client::decode_json;
use super::models::IpLookupResponse;
use crate::error::{ClientError, Result};

/// Resolves the client's public IP.
#[derive(Clone)]
pub struct IpResolver {
    url: String,
    transport: Arc<dyn HttpTransport>,
}

impl IpResolver {
    /// Creates a resolver for the lookup endpoint at `url`.
    pub fn new(url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            url: url.into(),
            transport,
        }
    }

    /// Looks up the public IP, optionally through `proxy`.
    ///
    /// # Errors
    /// `Transport` on network failure, `Parse` on non-JSON bodies and
    /// `MissingField` when the body has no usable `ip`.
    pub async fn resolve_public_ip(&self, proxy: Option<&ProxyEndpoint>) -> Result<String> {
        let response = self.transport.send(HttpRequest::get(&self.url), proxy).await?;
        let lookup: IpLookupResponse = decode_json("IP lookup", &response)?;

        info!("IP fetch response: {}", response.body.trim());

        match lookup.ip {
            Some(ip) if !ip.trim().is_empty() => Ok(ip.trim().to_string()),
            _ => Err(ClientError::missing_field("IP lookup", "ip", response.body)),
        }
    }
}

impl std::fmt::Debug for IpResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpResolver").field("url", &self.url).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blessnode_transport::{Method, MockTransport, ProxyScheme};

    const IP_URL: &str = "https://ip.test";

    fn resolver() -> (Arc<MockTransport>, IpResolver) {
        let mock = Arc::new(MockTransport::new());
        let resolver = IpResolver::new(IP_URL, mock.clone());
        (mock, resolver)
    }

    #[tokio::test]
    async fn test_resolves_ip_through_proxy() {
        let (mock, resolver) = resolver();
        mock.on(Method::Get, IP_URL, 200, r#"{"ip":"203.0.113.7"}"#);
        let proxy = ProxyEndpoint::new(ProxyScheme::Http, "10.0.0.1", 8080);

        let ip = resolver.resolve_public_ip(Some(&proxy)).await.unwrap();

        assert_eq!(ip, "203.0.113.7");
        assert_eq!(mock.requests()[0].proxy.as_ref(), Some(&proxy));
    }

    #[tokio::test]
    async fn test_non_json_body_is_parse_error_with_text() {
        let (mock, resolver) = resolver();
        mock.on(Method::Get, IP_URL, 502, "Bad Gateway");

        let err = resolver.resolve_public_ip(None).await.unwrap_err();
        assert!(err.is_parse_error());
        assert_eq!(err.response_body(), Some("Bad Gateway"));
    }

    #[tokio::test]
    async fn test_missing_ip_field() {
        let (mock, resolver) = resolver();
        mock.on(Method::Get, IP_URL, 200, r#"{"ip":""}"#);

        let err = resolver.resolve_public_ip(None).await.unwrap_err();
        assert!(matches!(err, ClientError::MissingField { ref field, .. } if field == "ip"));
    }

    #[tokio::test]
    async fn test_network_failure() {
        let (mock, resolver) = resolver();
        mock.fail(Method::Get, IP_URL, "dns failure");

        let err = resolver.resolve_public_ip(None).await.unwrap_err();
        assert!(err.is_network_error());
    }
}
