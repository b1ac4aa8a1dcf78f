//! Logging init: tracing subscriber with env-filter control.

use tracing_subscriber::EnvFilter;

/// Initialize structured logging to stderr.
///
/// Safe to call more than once; later calls are no-ops. Binaries and
/// tests call this; library code only emits `tracing` events.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bangumi_client=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
