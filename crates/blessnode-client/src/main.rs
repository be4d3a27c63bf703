// ============================================
// File: crates/blessnode-client/src/main.rs
// ============================================
//! # Bless Node Client Entry Point
//!
//! ## Creation Reason
//! Main entry point for the `blessnode` binary.
//! Handles CLI parsing, logging setup and the node lifecycle.
//!
//! ## Main Functionality
//! - CLI argument parsing with clap
//! - Logging initialization with tracing
//! - Configuration loading
//! - Long-running liveness mode and one-shot gateway calls
//!
//! ## Usage
//! ```bash
//! # Register, start a session and ping every minute
//! blessnode start
//! blessnode start --proxy yes
//!
//! # One-shot calls
//! blessnode ping
//! blessnode stop-session
//! blessnode ip --proxy yes
//!
//! # Check config and credential files without network access
//! blessnode validate
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - `--proxy ask` (the default) blocks on stdin before any network call
//! - Exit code 1 on any startup error; steady-state ping errors never exit
//!
//! ## Last Modified
//! v0.1.0 - Initial CLI implementation

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info, warn};

use blessnode_client::api::{IpResolver, ProxyMode, ProxyRouter};
use blessnode_client::{banner, logging, prompt, ClientConfig, CredentialStore, NodeRunner};
use blessnode_transport::ReqwestTransport;

// ============================================
// CLI Definition
// ============================================

/// Bless network node client
///
/// Reads `id.txt` (nodeId:hardwareId) and `user.txt` (bearer token) from
/// the working directory unless the config file says otherwise.
#[derive(Parser, Debug)]
#[command(name = "blessnode")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register the node, start a session and keep it alive
    Start {
        /// Path to configuration file
        #[arg(short, long, default_value = "blessnode.toml")]
        config: PathBuf,

        /// Route calls through a proxy from the proxy list
        #[arg(long, value_enum, default_value_t = ProxyChoice::Ask)]
        proxy: ProxyChoice,
    },

    /// Stop the node's current session
    StopSession {
        /// Path to configuration file
        #[arg(short, long, default_value = "blessnode.toml")]
        config: PathBuf,

        /// Route calls through a proxy from the proxy list
        #[arg(long, value_enum, default_value_t = ProxyChoice::Ask)]
        proxy: ProxyChoice,
    },

    /// Send a single liveness ping
    Ping {
        /// Path to configuration file
        #[arg(short, long, default_value = "blessnode.toml")]
        config: PathBuf,

        /// Route calls through a proxy from the proxy list
        #[arg(long, value_enum, default_value_t = ProxyChoice::Ask)]
        proxy: ProxyChoice,
    },

    /// Show the public IP the gateway would see
    Ip {
        /// Path to configuration file
        #[arg(short, long, default_value = "blessnode.toml")]
        config: PathBuf,

        /// Route calls through a proxy from the proxy list
        #[arg(long, value_enum, default_value_t = ProxyChoice::Ask)]
        proxy: ProxyChoice,
    },

    /// Validate configuration and credential files
    Validate {
        /// Path to configuration file
        #[arg(short, long, default_value = "blessnode.toml")]
        config: PathBuf,
    },
}

impl Commands {
    fn config_path(&self) -> &Path {
        match self {
            Self::Start { config, .. }
            | Self::StopSession { config, .. }
            | Self::Ping { config, .. }
            | Self::Ip { config, .. }
            | Self::Validate { config } => config,
        }
    }
}

/// Whether to use the proxy list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProxyChoice {
    /// Always use a proxy
    Yes,
    /// Connect directly
    No,
    /// Ask on the terminal
    Ask,
}

impl ProxyChoice {
    async fn decide(self) -> anyhow::Result<bool> {
        match self {
            Self::Yes => Ok(true),
            Self::No => Ok(false),
            Self::Ask => Ok(prompt::ask_use_proxy().await?),
        }
    }
}

// ============================================
// Main
// ============================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let log = logging::init_logging();

    let config = match ClientConfig::load_or_default(cli.command.config_path()).await {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = log.set_level(&config.logging.level) {
        warn!("Failed to apply log level {}: {}", config.logging.level, e);
    }

    let result = match cli.command {
        Commands::Start { proxy, .. } => cmd_start(config, proxy).await,
        Commands::StopSession { proxy, .. } => cmd_stop_session(config, proxy).await,
        Commands::Ping { proxy, .. } => cmd_ping(config, proxy).await,
        Commands::Ip { proxy, .. } => cmd_ip(config, proxy).await,
        Commands::Validate { config: path } => cmd_validate(config, &path).await,
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}

// ============================================
// Commands
// ============================================

/// Runs the node until Ctrl-C.
async fn cmd_start(config: ClientConfig, proxy: ProxyChoice) -> anyhow::Result<()> {
    banner::print_banner();

    let use_proxy = proxy.decide().await?;
    let runner = NodeRunner::bootstrap(&config, use_proxy).await?;
    let handle = runner.start().await?;

    tokio::signal::ctrl_c().await?;
    info!("Received Ctrl-C, shutting down");

    runner.shutdown(handle).await?;
    Ok(())
}

/// Stops the node's session once.
async fn cmd_stop_session(config: ClientConfig, proxy: ProxyChoice) -> anyhow::Result<()> {
    let use_proxy = proxy.decide().await?;
    let runner = NodeRunner::bootstrap(&config, use_proxy).await?;
    runner.client().stop_session(&runner.identity().node_id).await?;
    Ok(())
}

/// Sends one ping.
async fn cmd_ping(config: ClientConfig, proxy: ProxyChoice) -> anyhow::Result<()> {
    let use_proxy = proxy.decide().await?;
    let runner = NodeRunner::bootstrap(&config, use_proxy).await?;
    runner.client().ping(&runner.identity().node_id).await?;
    Ok(())
}

/// Resolves and prints the public IP.
async fn cmd_ip(config: ClientConfig, proxy: ProxyChoice) -> anyhow::Result<()> {
    let use_proxy = proxy.decide().await?;
    let store = CredentialStore::from_config(&config.files);
    let router = ProxyRouter::new(ProxyMode::resolve(use_proxy, config.proxy.selection), store);

    let transport = Arc::new(ReqwestTransport::new(config.api.request_timeout())?);
    let resolver = IpResolver::new(config.api.ip_service_url.clone(), transport);

    let proxy = router.next().await?;
    let ip = resolver.resolve_public_ip(proxy.as_ref()).await?;
    println!("{ip}");
    Ok(())
}

/// Validates configuration and local files without network access.
async fn cmd_validate(config: ClientConfig, path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        println!("⚠️  Config file not found: {}", path.display());
        println!("   Defaults will be used.");
    } else {
        println!("✅ Configuration is valid");
    }
    println!();

    let store = CredentialStore::from_config(&config.files);
    let identity = store.load_identity().await?;
    store.load_auth_token().await?;

    println!("Node:");
    println!("   Node ID:      {}", identity.node_id);
    println!("   Hardware ID:  {}", identity.hardware_id);
    println!("   Token:        ✅ present");
    println!();

    println!("Proxies:");
    if store.proxy_file().exists() {
        let proxies = store.load_proxies().await?;
        println!("   File:         {}", store.proxy_file().display());
        println!("   Entries:      {}", proxies.len());
        println!("   Selection:    {:?}", config.proxy.selection);
    } else {
        println!("   File:         {} (missing, direct only)", store.proxy_file().display());
    }
    println!();

    println!("Gateway:");
    println!("   Base URL:     {}", config.api.base_url);
    println!("   IP service:   {}", config.api.ip_service_url);
    println!("   Ping every:   {}s", config.liveness.ping_interval_secs);
    println!();

    Ok(())
}
