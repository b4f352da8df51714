//! Tracing subscriber setup.
//!
//! Logs go to stderr so that reports and JSON written to stdout stay
//! machine-readable.

use crate::config::{LogFormat, LoggingConfig};
use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    let initialised = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };
    initialised.map_err(|e| anyhow!("failed to initialise logging: {}", e))?;

    tracing::debug!(level = %config.level, "logging initialised");
    Ok(())
}
