use crate::{
    ApiConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    LoggingConfig, NotificationConfig, PollerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub poller: PollerConfig,
    pub notifications: NotificationConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config from the default config directory.
    ///
    /// Loading order:
    /// 1. Check for EMU_CONFIG_DIR env var, else use ./.emu/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply EMU_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;
        Self::load_from(&config_dir)
    }

    /// Load config from an explicit directory (same rules as [`Config::load`]).
    pub fn load_from(config_dir: &Path) -> ConfigErrorResult<Self> {
        if !config_dir.exists() {
            std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.to_path_buf(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: EMU_CONFIG_DIR env var > ./.emu/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.api.validate()?;
        self.poller.validate()?;
        self.notifications.validate()?;

        let log_dir = Path::new(&self.logging.dir);
        if log_dir.is_absolute() || self.logging.dir.contains("..") {
            return Err(ConfigError::config(
                "logging.dir must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Absolute log directory for a given config directory.
    pub fn log_dir(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.logging.dir)
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  api: {} (timeout {}s)",
            self.api.base_url, self.api.request_timeout_secs
        );
        info!(
            "  poller: every {}ms, probe from attempt {}, give up at {} (probe timeout {}ms)",
            self.poller.interval_ms,
            self.poller.warmup_attempts,
            self.poller.max_attempts,
            self.poller.probe_timeout_ms
        );
        info!("  notifications: {}ms", self.notifications.display_ms);
        info!(
            "  logging: {} (dir: {})",
            self.logging.level, self.logging.dir
        );
    }

    fn apply_env_overrides(&mut self) {
        // Api
        Self::apply_env_string("EMU_API_BASE_URL", &mut self.api.base_url);
        Self::apply_env_parse(
            "EMU_API_REQUEST_TIMEOUT_SECS",
            &mut self.api.request_timeout_secs,
        );

        // Poller
        Self::apply_env_parse("EMU_POLL_INTERVAL_MS", &mut self.poller.interval_ms);
        Self::apply_env_parse(
            "EMU_POLL_WARMUP_ATTEMPTS",
            &mut self.poller.warmup_attempts,
        );
        Self::apply_env_parse("EMU_POLL_MAX_ATTEMPTS", &mut self.poller.max_attempts);
        Self::apply_env_parse(
            "EMU_POLL_PROBE_TIMEOUT_MS",
            &mut self.poller.probe_timeout_ms,
        );

        // Notifications
        Self::apply_env_parse(
            "EMU_NOTIFICATION_DISPLAY_MS",
            &mut self.notifications.display_ms,
        );

        // Logging
        Self::apply_env_parse("EMU_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_string("EMU_LOG_DIR", &mut self.logging.dir);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }
}
