//! Bootstrap utilities for the rbstep binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LOG_ENV_VAR;

/// Initialize tracing with the RBSTEP_LOG environment variable.
///
/// Defaults to "info" level if RBSTEP_LOG is not set. Logs go to stderr so
/// they never interleave with traces printed on stdout.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(default_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"))
}
