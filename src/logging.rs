//! Opt-in diagnostics on stderr.
//!
//! The hook runs silently: nothing is emitted unless `SESSION_MEMORY_LOG`
//! holds an `EnvFilter` directive such as `debug` or `session_memory=trace`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SESSION_MEMORY_LOG";

/// Install the stderr subscriber. Safe to call more than once; later calls
/// are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
