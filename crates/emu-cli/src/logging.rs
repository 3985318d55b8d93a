//! Logging setup with file rotation.

use crate::error::{CliError, CliResult};

use emu_config::LogLevel;

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

pub const LOG_FILE_PREFIX: &str = "emu";

/// Setup logging with stderr and rotating file output.
///
/// # Log Layers
/// - Console: stderr, warnings only unless `verbose`, so stdout stays clean for `--json`
/// - File: plain text, daily rotation, 7-day retention
///
/// `RUST_LOG` overrides the configured level when set.
pub fn setup_logging(log_dir: &Path, level: LogLevel, verbose: bool) -> CliResult<()> {
    std::fs::create_dir_all(log_dir).map_err(|e| {
        CliError::logging(format!("cannot create {}: {e}", log_dir.display()))
    })?;

    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_filter(console_filter(level, verbose));

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(7)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| CliError::logging(e.to_string()))?;

    let file_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::logging(e.to_string()))
}

/// Level echoed to stderr; the file always gets the configured level.
pub fn console_filter(level: LogLevel, verbose: bool) -> LevelFilter {
    if !verbose {
        return LevelFilter::WARN;
    }
    level.as_directive().parse().unwrap_or(LevelFilter::INFO)
}
