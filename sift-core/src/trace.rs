//! Tracing bootstrap for hosts and tests.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber with env-filter support.
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
