use crate::{DEFAULT_LOG_DIRECTORY, LogLevel};

use serde::Deserialize;

/// Where and how verbosely the CLI writes its logs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    /// Directory for rotated log files, relative to the config directory
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            dir: String::from(DEFAULT_LOG_DIRECTORY),
        }
    }
}
