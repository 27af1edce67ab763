//! Logging setup for the server
//!
//! The filter comes from `BIOLINK_LOG`, then `RUST_LOG`, then a default
//! based on the verbosity flag.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let default_filter = format!("biolink_core={},biolink_server={}", level, level);

    let env_filter = std::env::var("BIOLINK_LOG")
        .ok()
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}
