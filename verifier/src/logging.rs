//! Tracing setup for the CLI. Output goes to stderr so stdout carries only
//! command results. Records, salts and keys are never passed to the logger.

use tracing_subscriber::EnvFilter;

/// Builds the filter from `RUST_LOG`, falling back to `default_level`.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Installs the global subscriber. Returns `false` if one was already set.
pub fn init(default_level: &str) -> bool {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(default_level))
        .try_init()
        .is_ok()
}
