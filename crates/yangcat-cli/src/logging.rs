//! Tracing subscriber setup

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter for the requested verbosity
#[must_use]
pub fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    }
}

/// Install the global subscriber
pub fn setup_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(env_filter(verbose))
        .init();
}
