//! Logging setup
//!
//! `RUST_LOG` wins over the configured level when set.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingSection;

/// Build the log filter for `section`
pub fn build_filter(section: &LoggingSection) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&section.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber
///
/// Returns false if a subscriber was already installed, e.g. by the host
/// application or an earlier call.
pub fn init_logging(section: &LoggingSection) -> bool {
    fmt()
        .with_env_filter(build_filter(section))
        .with_target(false)
        .try_init()
        .is_ok()
}
