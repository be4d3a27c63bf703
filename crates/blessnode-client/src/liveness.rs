// ============================================
// File: crates/blessnode-client/src/liveness.rs
// ============================================
//! # Liveness Scheduler
//!
//! Background task that keeps the node's session alive with periodic
//! pings once startup has completed.
//!
//! Main Components:
//!   - LivenessScheduler: configures and spawns the ping loop
//!   - LivenessHandle: cancellation handle returned by `spawn`
//!   - LivenessStats: tick and outcome counters reported on shutdown
//!
//! ⚠️ Important Note for Next Developer:
//!   - The first steady ping fires one full interval after `spawn`; the
//!     anchor is taken in `spawn`, not when the task is first polled
//!   - Missed ticks (suspended host, stalled runtime) are not replayed; the
//!     schedule restarts one interval after the late tick
//!   - Each tick spawns its ping; a slow ping never delays the next tick,
//!     so pings can overlap when a round trip exceeds the interval
//!   - Ping errors are logged and the loop continues; nothing is retried
//!     outside the regular ticks
//!
//! Last Modified: v0.1.0 - Initial liveness loop
// ============================================

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info, warn};

use blessnode_common::NodeId;

use crate::api::NodeClient;

/// Consecutive failures after which ping errors are logged at `error`.
const FAILURE_ESCALATION: u32 = 3;

/// Counters collected by the ping loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LivenessStats {
    /// Ticks fired, one ping spawned per tick.
    pub ticks: u64,
    /// Pings that completed successfully.
    pub succeeded: u64,
    /// Pings that failed or panicked.
    pub failed: u64,
}

/// Periodic ping loop for one node.
pub struct LivenessScheduler {
    client: Arc<NodeClient>,
    node_id: NodeId,
    interval: Duration,
}

impl LivenessScheduler {
    /// Creates a scheduler.
    ///
    /// # Arguments
    /// * `client` - Shared client used for every ping
    /// * `node_id` - Node to ping
    /// * `interval` - Time between pings
    pub fn new(client: Arc<NodeClient>, node_id: NodeId, interval: Duration) -> Self {
        Self { client, node_id, interval }
    }

    /// Starts the loop on the runtime and returns its handle.
    pub fn spawn(self) -> LivenessHandle {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let first_tick = Instant::now() + self.interval;
        let task = tokio::spawn(self.run(first_tick, shutdown_rx));
        LivenessHandle { shutdown_tx, task }
    }

    /// Runs the ping loop until shutdown signal received.
    async fn run(self, first_tick: Instant, mut shutdown: broadcast::Receiver<()>) -> LivenessStats {
        info!("Liveness loop started ({}s)", self.interval.as_secs());
        let mut ticker = interval_at(first_tick, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut inflight = JoinSet::new();
        let mut stats = LivenessStats::default();
        let mut failures = 0u32;

        loop {
            tokio::select! {
                _ = shutdown.recv() => { info!("Liveness loop stopping"); break; }
                _ = ticker.tick() => {
                    stats.ticks += 1;
                    info!("Sending ping...");
                    let client = Arc::clone(&self.client);
                    let node_id = self.node_id.clone();
                    inflight.spawn(async move { client.ping(&node_id).await });
                }
                Some(joined) = inflight.join_next(), if !inflight.is_empty() => {
                    match joined {
                        Ok(Ok(_)) => { failures = 0; stats.succeeded += 1; }
                        Ok(Err(e)) => {
                            failures += 1;
                            stats.failed += 1;
                            if failures >= FAILURE_ESCALATION { error!("Ping failed ({} in a row): {}", failures, e); }
                            else { warn!("Ping failed: {}", e); }
                        }
                        Err(e) if e.is_cancelled() => {}
                        Err(e) => { stats.failed += 1; error!("Ping task panicked: {}", e); }
                    }
                }
            }
        }

        inflight.shutdown().await;
        stats
    }
}

/// Handle to a running liveness loop.
///
/// Dropping the handle also stops the loop.
pub struct LivenessHandle {
    shutdown_tx: broadcast::Sender<()>,
    task: JoinHandle<LivenessStats>,
}

impl LivenessHandle {
    /// Stops the loop, aborting in-flight pings, and returns its counters.
    pub async fn shutdown(self) -> LivenessStats {
        let _ = self.shutdown_tx.send(());
        match self.task.await {
            Ok(stats) => stats,
            Err(e) => {
                error!("Liveness loop ended abnormally: {}", e);
                LivenessStats::default()
            }
        }
    }

    /// Returns `true` once the loop has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl std::fmt::Debug for LivenessHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LivenessHandle")
            .field("finished", &self.is_finished())
            .finish()
    }
}
