use emu_config::PollerConfig;

use std::time::Duration;

/// Cadence and budget of a readiness poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerSettings {
    pub interval: Duration,
    /// First attempt on which the endpoint is probed
    pub warmup_attempts: u32,
    /// Attempt on which the poll gives up
    pub max_attempts: u32,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self::from(&PollerConfig::default())
    }
}

impl From<&PollerConfig> for PollerSettings {
    fn from(config: &PollerConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.interval_ms),
            warmup_attempts: config.warmup_attempts,
            max_attempts: config.max_attempts,
        }
    }
}

impl PollerSettings {
    pub(crate) fn is_warm(&self, attempt: u32) -> bool {
        attempt >= self.warmup_attempts
    }
}
