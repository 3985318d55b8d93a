use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_DISPLAY_MS: u64 = 100;
pub const MAX_DISPLAY_MS: u64 = 60_000;
pub const DEFAULT_DISPLAY_MS: u64 = 3_000;

/// Toast notification settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// How long a notification stays visible before it is dismissed
    pub display_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            display_ms: DEFAULT_DISPLAY_MS,
        }
    }
}

impl NotificationConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.display_ms < MIN_DISPLAY_MS || self.display_ms > MAX_DISPLAY_MS {
            return Err(ConfigError::notification(format!(
                "notifications.display_ms must be {}-{}, got {}",
                MIN_DISPLAY_MS, MAX_DISPLAY_MS, self.display_ms
            )));
        }

        Ok(())
    }
}
