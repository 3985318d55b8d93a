mod api_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod notification_config;
mod poller_config;

#[cfg(test)]
mod tests;

pub use api_config::ApiConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use notification_config::NotificationConfig;
pub use poller_config::PollerConfig;

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const CONFIG_DIR_ENV: &str = "EMU_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".emu";
const CONFIG_FILENAME: &str = "config.toml";
