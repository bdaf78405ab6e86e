//! Logging setup and output directories

use anyhow::{Context, Result};
use std::fs;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::config::Config;

pub const LOG_FILE_PREFIX: &str = "yield-prophet.log";
const DEFAULT_DIRECTIVE: &str = "info";

pub struct LoggingGuard {
    pub _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Console layer plus an hourly rolling file under `config.log_dir`.
///
/// `RUST_LOG` replaces the `info` default when set.
pub fn setup_logging(config: &Config) -> Result<Arc<LoggingGuard>> {
    let file_appender = tracing_appender::rolling::hourly(&config.log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(true)
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_ansi(false)
                .compact()
        )
        .with(filter)
        .try_init()
        .context("Logging already initialised")?;

    debug!(log_dir = %config.log_dir.display(), "Logging initialised");
    Ok(Arc::new(LoggingGuard { _guard: guard }))
}

/// Create the log and state directories named by `config`.
pub fn setup_output_directories(config: &Config) -> Result<()> {
    for dir in [&config.log_dir, &config.state_dir] {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    Ok(())
}
