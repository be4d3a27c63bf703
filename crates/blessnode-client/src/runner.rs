// ============================================
// File: crates/blessnode-client/src/runner.rs
// ============================================
//! # Node Runner
//!
//! ## Creation Reason
//! Wires configuration, credentials and transport into a `NodeClient` and
//! drives the node through its lifecycle.
//!
//! ## Main Functionality
//! - `NodeRunner::bootstrap`: load credentials, build transport and client
//! - `NodeRunner::start`: register, start session, first ping, then hand
//!   over to the liveness loop
//! - `NodeRunner::shutdown`: stop the loop, optionally close the session
//!
//! ## Lifecycle
//! ```text
//! bootstrap ──► register ──► start-session ──► ping ──► [ping every N s]
//!                  │               │             │
//!                  └── error ──────┴── abort     └── logged, loop still starts
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Identity and token are read once here; later edits to the files are
//!   not picked up. The proxy list is re-read according to the router mode.
//! - The result of the initial ping never prevents the loop from starting
//!
//! ## Last Modified
//! v0.1.0 - Initial runner implementation

use std::sync::Arc;

use tracing::{error, info};

use blessnode_common::NodeIdentity;
use blessnode_transport::{HttpTransport, ReqwestTransport};

use crate::api::{NodeClient, ProxyMode, ProxyRouter};
use crate::config::{ClientConfig, LivenessConfig};
use crate::credentials::CredentialStore;
use crate::error::{ClientError, Result};
use crate::liveness::{LivenessHandle, LivenessScheduler, LivenessStats};

/// Orchestrates one node's lifecycle.
pub struct NodeRunner {
    client: Arc<NodeClient>,
    identity: NodeIdentity,
    liveness: LivenessConfig,
}

impl NodeRunner {
    /// Creates a runner over an already built client.
    #[must_use]
    pub fn new(client: Arc<NodeClient>, identity: NodeIdentity, liveness: LivenessConfig) -> Self {
        Self { client, identity, liveness }
    }

    /// Builds a runner with the real HTTP transport.
    ///
    /// # Errors
    /// Credential and proxy list errors, or a transport that cannot be built.
    pub async fn bootstrap(config: &ClientConfig, use_proxy: bool) -> Result<Self> {
        let transport = ReqwestTransport::new(config.api.request_timeout())?;
        Self::with_transport(config, use_proxy, Arc::new(transport)).await
    }

    /// Builds a runner over the given transport.
    ///
    /// When proxying is enabled the list is parsed up front so a bad file
    /// fails startup instead of the first call.
    ///
    /// # Errors
    /// Credential and proxy list errors.
    pub async fn with_transport(
        config: &ClientConfig,
        use_proxy: bool,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self> {
        let store = CredentialStore::from_config(&config.files);
        let identity = store.load_identity().await?;
        let token = store.load_auth_token().await?;

        let mode = ProxyMode::resolve(use_proxy, config.proxy.selection);
        if mode != ProxyMode::Direct && store.load_proxies().await?.is_empty() {
            return Err(ClientError::EmptyProxyList {
                path: store.proxy_file().display().to_string(),
            });
        }
        info!("Proxy mode: {:?}", mode);

        let client = NodeClient::new(config.api.clone(), transport, token, ProxyRouter::new(mode, store));
        Ok(Self::new(Arc::new(client), identity, config.liveness.clone()))
    }

    /// Runs the startup sequence and starts the liveness loop.
    ///
    /// # Errors
    /// Registration and session start failures. Ping failures are logged only.
    pub async fn start(&self) -> Result<LivenessHandle> {
        let node_id = &self.identity.node_id;
        info!("Read Node ID: {}, Hardware ID: {}", node_id, self.identity.hardware_id);

        self.client.register(&self.identity).await?;
        info!("Node registration completed");

        self.client.start_session(node_id).await?;

        info!("Sending initial ping...");
        if let Err(e) = self.client.ping(node_id).await {
            error!("Initial ping failed: {}", e);
        }

        let scheduler = LivenessScheduler::new(
            Arc::clone(&self.client),
            node_id.clone(),
            self.liveness.ping_interval(),
        );
        Ok(scheduler.spawn())
    }

    /// Stops the liveness loop and closes the session if configured to.
    ///
    /// # Errors
    /// Failure of the closing stop-session call.
    pub async fn shutdown(&self, handle: LivenessHandle) -> Result<LivenessStats> {
        let stats = handle.shutdown().await;
        info!(
            "Liveness stopped after {} pings ({} ok, {} failed)",
            stats.ticks, stats.succeeded, stats.failed
        );

        if self.liveness.stop_session_on_shutdown {
            self.client.stop_session(&self.identity.node_id).await?;
        }
        Ok(stats)
    }

    /// The node being run.
    #[must_use]
    pub fn identity(&self) -> &NodeIdentity {
        &self.identity
    }

    /// The shared gateway client.
    #[must_use]
    pub fn client(&self) -> &Arc<NodeClient> {
        &self.client
    }
}

impl std::fmt::Debug for NodeRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRunner")
            .field("node_id", &self.identity.node_id)
            .field("ping_interval", &self.liveness.ping_interval())
            .finish()
    }
}
