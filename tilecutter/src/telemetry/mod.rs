//! Logging bootstrap.
//!
//! The library logs through `tracing`; binaries call [`init_logging`] once
//! at startup to install a formatted subscriber. `RUST_LOG` overrides the
//! default `info` filter.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
