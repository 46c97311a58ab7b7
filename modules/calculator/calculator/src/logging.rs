//! Tracing subscriber setup for the server process.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::config::{LogFormat, LoggingConfig};

/// Build the filter: `RUST_LOG` when set, the configured level otherwise.
fn build_filter(cfg: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level))
}

/// Install the global subscriber.
///
/// # Errors
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let filter = build_filter(cfg);
    let registry = tracing_subscriber::registry().with(filter);

    match cfg.format {
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()?,
    }

    Ok(())
}
