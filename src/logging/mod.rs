//! Logging setup

use tracing_subscriber::{fmt, EnvFilter};

/// Install a `fmt` subscriber at `level`, unless `RUST_LOG` says otherwise.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logging(level: &str) -> bool {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .try_init()
        .is_ok()
}
