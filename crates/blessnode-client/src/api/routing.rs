// ============================================
// File: crates/blessnode-client/src/api/routing.rs
// ============================================
//! # Proxy Routing
//!
//! Decides which proxy, if any, each gateway call goes through.
//!
//! Modes:
//!   - Direct: no proxy
//!   - PerRequest: re-read the proxy list and pick at random on every call
//!   - PerRun: pick once on first use and reuse for the rest of the run
//!
//! ⚠️ Important Note for Next Developer:
//!   - An empty list is reported as `EmptyProxyList`; callers never fall
//!     back to a direct connection when proxying was requested

use parking_lot::Mutex;
use tracing::info;

use blessnode_transport::{choose_proxy, ProxyEndpoint};

use crate::config::ProxySelection;
use crate::credentials::CredentialStore;
use crate::error::{ClientError, Result};

/// How proxies are applied to outgoing calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyMode {
    /// Connect directly.
    Direct,
    /// Fresh random pick per call.
    PerRequest,
    /// One random pick for the whole run.
    PerRun,
}

impl ProxyMode {
    /// Maps the startup answer and the configured policy to a mode.
    #[must_use]
    pub const fn resolve(use_proxy: bool, selection: ProxySelection) -> Self {
        match (use_proxy, selection) {
            (false, _) => Self::Direct,
            (true, ProxySelection::PerRequest) => Self::PerRequest,
            (true, ProxySelection::PerRun) => Self::PerRun,
        }
    }
}

/// Picks the proxy for each call according to a [`ProxyMode`].
#[derive(Debug)]
pub struct ProxyRouter {
    mode: ProxyMode,
    store: CredentialStore,
    pinned: Mutex<Option<ProxyEndpoint>>,
}

impl ProxyRouter {
    /// Creates a router.
    #[must_use]
    pub fn new(mode: ProxyMode, store: CredentialStore) -> Self {
        Self {
            mode,
            store,
            pinned: Mutex::new(None),
        }
    }

    /// Router that never uses a proxy.
    #[must_use]
    pub fn direct() -> Self {
        Self::new(ProxyMode::Direct, CredentialStore::new("", "", ""))
    }

    /// Returns the active mode.
    #[must_use]
    pub const fn mode(&self) -> ProxyMode {
        self.mode
    }

    /// Returns the proxy for the next call.
    ///
    /// # Errors
    /// Propagates proxy list load errors; `EmptyProxyList` if the list
    /// has no entries.
    pub async fn next(&self) -> Result<Option<ProxyEndpoint>> {
        match self.mode {
            ProxyMode::Direct => Ok(None),
            ProxyMode::PerRequest => self.pick().await.map(Some),
            ProxyMode::PerRun => {
                if let Some(proxy) = self.pinned.lock().clone() {
                    return Ok(Some(proxy));
                }
                let proxy = self.pick().await?;
                *self.pinned.lock() = Some(proxy.clone());
                Ok(Some(proxy))
            }
        }
    }

    async fn pick(&self) -> Result<ProxyEndpoint> {
        let proxies = self.store.load_proxies().await?;
        let proxy = choose_proxy(&proxies)
            .cloned()
            .ok_or_else(|| ClientError::EmptyProxyList {
                path: self.store.proxy_file().display().to_string(),
            })?;
        info!("Using proxy: {}", proxy);
        Ok(proxy)
    }
}
