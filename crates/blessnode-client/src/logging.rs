// ============================================
// File: crates/blessnode-client/src/logging.rs
// ============================================
//! # Logging Setup
//!
//! The subscriber is installed before the configuration is read, so
//! config loading itself is logged. The level from `[logging]` is applied
//! afterwards through a reload handle.
//!
//! ⚠️ Important Note for Next Developer:
//!   - `RUST_LOG` always takes precedence over the configured level
//!
//! Last Modified: v0.1.0 - Reloadable filter
// ============================================

use tracing::Subscriber;
use tracing_subscriber::{fmt, prelude::*, reload, EnvFilter, Registry};

/// Level used until the configuration has been read.
pub const DEFAULT_LEVEL: &str = "info";

/// Handle for changing the active filter after installation.
#[derive(Clone)]
pub struct LogHandle(reload::Handle<EnvFilter, Registry>);

impl LogHandle {
    /// Switches to `level`, unless `RUST_LOG` is set.
    ///
    /// # Errors
    /// Returns error if the subscriber has been dropped.
    pub fn set_level(&self, level: &str) -> Result<(), reload::Error> {
        self.set_filter(filter_for(level))
    }

    /// Replaces the active filter.
    ///
    /// # Errors
    /// Returns error if the subscriber has been dropped.
    pub fn set_filter(&self, filter: EnvFilter) -> Result<(), reload::Error> {
        self.0.reload(filter)
    }
}

impl std::fmt::Debug for LogHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogHandle").finish_non_exhaustive()
    }
}

/// Filter for `level`, overridden by `RUST_LOG` when present.
#[must_use]
pub fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Builds the subscriber without installing it.
pub fn subscriber(filter: EnvFilter) -> (impl Subscriber + Send + Sync + 'static, LogHandle) {
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true));
    (subscriber, LogHandle(handle))
}

/// Installs the global subscriber at [`DEFAULT_LEVEL`].
///
/// A second call leaves the first subscriber in place.
pub fn init_logging() -> LogHandle {
    let (subscriber, handle) = subscriber(filter_for(DEFAULT_LEVEL));
    subscriber.try_init().ok();
    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_level_applies_after_install() {
        let (subscriber, handle) = subscriber(EnvFilter::new("info"));

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(Level::INFO));
            assert!(!tracing::enabled!(Level::DEBUG));

            handle.set_filter(EnvFilter::new("debug")).unwrap();
            assert!(tracing::enabled!(Level::DEBUG));

            handle.set_filter(EnvFilter::new("warn")).unwrap();
            assert!(!tracing::enabled!(Level::INFO));
        });
    }

    #[test]
    fn test_handle_outliving_subscriber() {
        let (subscriber, handle) = subscriber(EnvFilter::new("info"));
        drop(subscriber);
        assert!(handle.set_filter(EnvFilter::new("debug")).is_err());
    }
}
