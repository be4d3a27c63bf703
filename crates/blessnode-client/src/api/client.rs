//! # Node Gateway Client

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use blessnode_common::{AuthToken, NodeId, NodeIdentity};
use blessnode_transport::{HttpRequest, HttpResponse, HttpTransport, ProxyEndpoint};

use super::config::ApiConfig;
use super::models::{PingRecord, RegisterNodeRequest, RegistrationResponse, SessionResponse};
use super::resolver::IpResolver;
use super::routing::ProxyRouter;
use crate::error::{ClientError, Result};

/// Client for the node lifecycle endpoints of the gateway.
///
/// Every call is attempted exactly once; errors go to the caller.
pub struct NodeClient {
    config: ApiConfig,
    transport: Arc<dyn HttpTransport>,
    resolver: IpResolver,
    token: AuthToken,
    proxies: ProxyRouter,
}

impl NodeClient {
    /// Creates a client. The IP resolver shares `transport`.
    pub fn new(
        config: ApiConfig,
        transport: Arc<dyn HttpTransport>,
        token: AuthToken,
        proxies: ProxyRouter,
    ) -> Self {
        let resolver = IpResolver::new(config.ip_service_url.clone(), Arc::clone(&transport));
        Self { config, transport, resolver, token, proxies }
    }

    /// Registers the node with its current public IP.
    ///
    /// The IP lookup and the registration share one proxy pick. If the
    /// lookup fails nothing is posted.
    pub async fn register(&self, identity: &NodeIdentity) -> Result<RegistrationResponse> {
        self.try_register(identity)
            .await
            .map_err(|e| ClientError::registration(identity.node_id.clone(), e))
    }

    async fn try_register(&self, identity: &NodeIdentity) -> Result<RegistrationResponse> {
        let proxy = self.proxies.next().await?;
        let url = self.config.node_url(identity.node_id.as_str(), None);
        let ip_address = self.resolver.resolve_public_ip(proxy.as_ref()).await?;

        info!("Registering node with IP: {}, Hardware ID: {}", ip_address, identity.hardware_id);

        let body = serde_json::to_value(RegisterNodeRequest {
            ip_address,
            hardware_id: identity.hardware_id.clone(),
        })
        .map_err(|e| ClientError::parse("registration request", e.to_string(), ""))?;

        let request = HttpRequest::post(url)
            .header("Content-Type", "application/json")
            .header("Authorization", self.token.bearer_header())
            .json(body);
        let response = self.send(request, proxy.as_ref(), "registration").await?;
        let payload: RegistrationResponse = decode_json("registration", &response)?;

        info!("Registration response: {}", payload);
        Ok(payload)
    }

    /// Opens a session for the node. The gateway may take a while.
    pub async fn start_session(&self, node_id: &NodeId) -> Result<SessionResponse> {
        let proxy = self.proxies.next().await?;
        let url = self.config.node_url(node_id.as_str(), Some("start-session"));

        info!("Starting session for node {}, it might take a while...", node_id);

        let response = self.post_authorized(url, proxy.as_ref(), "start session").await?;
        let payload: SessionResponse = decode_json("start session", &response)?;

        info!("Start session response: {}", payload);
        Ok(payload)
    }

    /// Closes the node's session.
    pub async fn stop_session(&self, node_id: &NodeId) -> Result<SessionResponse> {
        let proxy = self.proxies.next().await?;
        let url = self.config.node_url(node_id.as_str(), Some("stop-session"));

        info!("Stopping session for node {}", node_id);

        let response = self.post_authorized(url, proxy.as_ref(), "stop session").await?;
        let payload: SessionResponse = decode_json("stop session", &response)?;

        info!("Stop session response: {}", payload);
        Ok(payload)
    }

    /// Sends one liveness ping and returns the node's ping record.
    ///
    /// # Errors
    /// `Api` on an error status, `EmptyPingHistory` if the record has no
    /// pings to confirm the round trip.
    pub async fn ping(&self, node_id: &NodeId) -> Result<PingRecord> {
        let proxy = self.proxies.next().await?;
        let url = self.config.node_url(node_id.as_str(), Some("ping"));

        info!("Pinging node {}", node_id);

        let response = self.post_authorized(url, proxy.as_ref(), "ping").await?;
        if !response.is_success() {
            return Err(ClientError::api("ping", response.status, response.body));
        }

        let record: PingRecord = decode_json("ping", &response)?;
        let Some(last) = record.last_ping() else {
            warn!("Ping response for node {} has an empty ping history", node_id);
            return Err(ClientError::EmptyPingHistory { node_id: node_id.clone() });
        };

        info!(
            "Ping response, ID: {}, NodeID: {}, Last Ping: {}",
            record.id.as_deref().unwrap_or("-"),
            record.node_id.as_deref().unwrap_or("-"),
            last.timestamp
        );
        Ok(record)
    }

    async fn post_authorized(
        &self,
        url: String,
        proxy: Option<&ProxyEndpoint>,
        context: &str,
    ) -> Result<HttpResponse> {
        let request = HttpRequest::post(url).header("Authorization", self.token.bearer_header());
        self.send(request, proxy, context).await
    }

    async fn send(
        &self,
        request: HttpRequest,
        proxy: Option<&ProxyEndpoint>,
        context: &str,
    ) -> Result<HttpResponse> {
        let response = self.transport.send(request, proxy).await?;
        if !response.is_success() {
            warn!("{} returned status {}", context, response.status);
        }
        Ok(response)
    }

    /// Endpoint configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Proxy router used for every call.
    #[must_use]
    pub fn proxies(&self) -> &ProxyRouter {
        &self.proxies
    }
}

impl std::fmt::Debug for NodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeClient")
            .field("base_url", &self.config.base_url)
            .field("proxy_mode", &self.proxies.mode())
            .finish()
    }
}

/// Decodes a JSON body, logging the raw text when it is not JSON.
pub(crate) fn decode_json<T: DeserializeOwned>(context: &str, response: &HttpResponse) -> Result<T> {
    serde_json::from_str(&response.body).map_err(|e| {
        error!("Failed to parse JSON. Response text: {}", response.body);
        ClientError::parse(context, e.to_string(), response.body.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blessnode_transport::{Method, MockTransport};
    use serde_json::json;

    const BASE: &str = "https://api.test/api/v1";
    const IP_URL: &str = "https://ip.test";

    fn client() -> (Arc<MockTransport>, NodeClient) {
        let mock = Arc::new(MockTransport::new());
        let config = ApiConfig {
            base_url: BASE.to_string(),
            ip_service_url: IP_URL.to_string(),
            request_timeout_secs: None,
        };
        let client = NodeClient::new(config, mock.clone(), "tok".parse().unwrap(), ProxyRouter::direct());
        (mock, client)
    }

    fn identity() -> NodeIdentity {
        "n1:h1".parse().unwrap()
    }

    #[tokio::test]
    async fn test_register_posts_resolved_ip() {
        let (mock, client) = client();
        mock.on(Method::Get, IP_URL, 200, r#"{"ip":"198.51.100.4"}"#);
        mock.on(Method::Post, format!("{BASE}/nodes/n1"), 200, r#"{"_id":"r1"}"#);

        let payload = client.register(&identity()).await.unwrap();
        assert_eq!(payload.0, json!({ "_id": "r1" }));

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].request.method, Method::Get);

        let post = &requests[1].request;
        assert_eq!(post.url, format!("{BASE}/nodes/n1"));
        assert_eq!(post.header_value("Authorization"), Some("Bearer tok"));
        assert_eq!(
            post.body,
            Some(json!({ "ipAddress": "198.51.100.4", "hardwareId": "h1" }))
        );
    }

    #[tokio::test]
    async fn test_register_stops_when_ip_lookup_fails() {
        let (mock, client) = client();
        mock.fail(Method::Get, IP_URL, "connection refused");
        mock.on(Method::Post, format!("{BASE}/nodes/n1"), 200, "{}");

        let err = client.register(&identity()).await.unwrap_err();

        assert!(matches!(err, ClientError::Registration { .. }));
        assert!(err.is_network_error());
        assert_eq!(mock.count(Method::Post, &format!("{BASE}/nodes/n1")), 0);
    }

    #[tokio::test]
    async fn test_register_keeps_raw_text_on_bad_json() {
        let (mock, client) = client();
        mock.on(Method::Get, IP_URL, 200, r#"{"ip":"198.51.100.4"}"#);
        mock.on(Method::Post, format!("{BASE}/nodes/n1"), 503, "upstream unavailable");

        let err = client.register(&identity()).await.unwrap_err();
        assert!(err.is_parse_error());
        assert_eq!(err.response_body(), Some("upstream unavailable"));
    }

    #[tokio::test]
    async fn test_error_status_with_json_is_returned_as_is() {
        let (mock, client) = client();
        mock.on(
            Method::Post,
            format!("{BASE}/nodes/n1/start-session"),
            409,
            r#"{"message":"session already active"}"#,
        );

        let node_id: NodeId = "n1".parse().unwrap();
        let payload = client.start_session(&node_id).await.unwrap();
        assert_eq!(payload.0["message"], "session already active");
    }

    #[tokio::test]
    async fn test_session_endpoints() {
        let (mock, client) = client();
        mock.on(Method::Post, format!("{BASE}/nodes/n1/start-session"), 200, r#"{"ok":true}"#);
        mock.on(Method::Post, format!("{BASE}/nodes/n1/stop-session"), 200, r#"{"ok":false}"#);
        let node_id: NodeId = "n1".parse().unwrap();

        client.start_session(&node_id).await.unwrap();
        client.stop_session(&node_id).await.unwrap();

        let requests = mock.requests();
        assert!(requests.iter().all(|r| r.request.body.is_none()));
        assert!(requests
            .iter()
            .all(|r| r.request.header_value("Authorization") == Some("Bearer tok")));
    }

    #[tokio::test]
    async fn test_ping_returns_last_ping() {
        let (mock, client) = client();
        mock.on(
            Method::Post,
            format!("{BASE}/nodes/n1/ping"),
            200,
            r#"{"_id":"p1","nodeId":"n1","pings":[{"timestamp":"t1"},{"timestamp":"t2"}]}"#,
        );

        let record = client.ping(&"n1".parse().unwrap()).await.unwrap();
        assert_eq!(record.last_ping().unwrap().timestamp, "t2");
    }

    #[tokio::test]
    async fn test_ping_with_empty_history_is_named_error() {
        let (mock, client) = client();
        mock.on(Method::Post, format!("{BASE}/nodes/n1/ping"), 200, r#"{"_id":"p1","pings":[]}"#);

        let err = client.ping(&"n1".parse().unwrap()).await.unwrap_err();
        assert!(matches!(err, ClientError::EmptyPingHistory { .. }));
    }

    #[tokio::test]
    async fn test_ping_error_status() {
        let (mock, client) = client();
        mock.on(Method::Post, format!("{BASE}/nodes/n1/ping"), 401, r#"{"error":"unauthorized"}"#);

        let err = client.ping(&"n1".parse().unwrap()).await.unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 401, .. }));
    }
}
