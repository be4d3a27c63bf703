// ============================================
// File: crates/blessnode-client/src/credentials.rs
// ============================================
//! # Credential Store
//!
//! ## Creation Reason
//! Reads the node identity, the bearer token and the proxy list from
//! local text files.
//!
//! ## File Formats
//! ```text
//! id.txt     nodeId:hardwareId
//! user.txt   <bearer token>
//! proxy.txt  one proxy URI per line, blank lines ignored
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Nothing is cached; every call reads the file again
//! - Error messages carry file paths, never file contents
//!
//! ## Last Modified
//! v0.1.0 - Initial credential loader

use std::path::{Path, PathBuf};

use tracing::debug;

use blessnode_common::{AuthToken, NodeIdentity};
use blessnode_transport::ProxyEndpoint;

use crate::config::FilesConfig;
use crate::error::{ClientError, Result};

/// Locations of the local credential files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStore {
    identity_file: PathBuf,
    token_file: PathBuf,
    proxy_file: PathBuf,
}

impl CredentialStore {
    /// Creates a store over explicit paths.
    pub fn new(
        identity_file: impl Into<PathBuf>,
        token_file: impl Into<PathBuf>,
        proxy_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            identity_file: identity_file.into(),
            token_file: token_file.into(),
            proxy_file: proxy_file.into(),
        }
    }

    /// Creates a store from the `[files]` configuration section.
    #[must_use]
    pub fn from_config(files: &FilesConfig) -> Self {
        Self::new(&files.identity_file, &files.token_file, &files.proxy_file)
    }

    /// Path of the proxy list.
    #[must_use]
    pub fn proxy_file(&self) -> &Path {
        &self.proxy_file
    }

    /// Loads the `nodeId:hardwareId` pair.
    ///
    /// # Errors
    /// `CredentialFile` if unreadable, `Credentials` if empty or malformed.
    pub async fn load_identity(&self) -> Result<NodeIdentity> {
        let content = read(&self.identity_file).await?;
        content
            .parse()
            .map_err(|e| ClientError::credentials(&self.identity_file, e))
    }

    /// Loads the bearer token.
    ///
    /// # Errors
    /// `CredentialFile` if unreadable, `Credentials` if empty.
    pub async fn load_auth_token(&self) -> Result<AuthToken> {
        let content = read(&self.token_file).await?;
        content
            .parse()
            .map_err(|e| ClientError::credentials(&self.token_file, e))
    }

    /// Loads the raw proxy lines, trimmed, blank lines removed.
    ///
    /// # Errors
    /// `CredentialFile` if the list cannot be read.
    pub async fn load_proxy_list(&self) -> Result<Vec<String>> {
        let content = read(&self.proxy_file).await?;
        Ok(proxy_lines(&content).map(|(_, line)| line.to_string()).collect())
    }

    /// Loads and parses the proxy list.
    ///
    /// # Errors
    /// `CredentialFile` if unreadable, `InvalidProxyLine` naming the first
    /// line that does not parse.
    pub async fn load_proxies(&self) -> Result<Vec<ProxyEndpoint>> {
        let content = read(&self.proxy_file).await?;
        let proxies = proxy_lines(&content)
            .map(|(line, text)| {
                text.parse().map_err(|source| ClientError::InvalidProxyLine {
                    path: self.proxy_file.display().to_string(),
                    line,
                    source,
                })
            })
            .collect::<Result<Vec<ProxyEndpoint>>>()?;

        debug!("Loaded {} proxies from {}", proxies.len(), self.proxy_file.display());
        Ok(proxies)
    }
}

/// Non-blank trimmed lines with their 1-based line numbers.
fn proxy_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

async fn read(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ClientError::credential_file(path, e.to_string()))
}
