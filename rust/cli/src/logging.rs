//! Diagnostic logging for the `hilo` binary.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Install a stderr fmt subscriber filtered by `RUST_LOG` (default `warn`),
/// so stdout carries nothing but command output. A second call is a no-op.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let result = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
    if result.is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
