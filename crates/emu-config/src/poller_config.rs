use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Poller constraints
pub const MIN_INTERVAL_MS: u64 = 10;
pub const MAX_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_INTERVAL_MS: u64 = 1_000;

pub const DEFAULT_WARMUP_ATTEMPTS: u32 = 30;

pub const MIN_MAX_ATTEMPTS: u32 = 1;
pub const MAX_MAX_ATTEMPTS: u32 = 3_600;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 120;

pub const MIN_PROBE_TIMEOUT_MS: u64 = 50;
pub const MAX_PROBE_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2_000;

/// Boot readiness polling.
///
/// The emulator needs a predictable minimum time before its display
/// endpoint accepts connections, so probing is withheld for
/// `warmup_attempts` ticks and then attempted on every tick until
/// `max_attempts` is reached.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Tick interval in milliseconds
    pub interval_ms: u64,
    /// First tick on which a reachability probe is attempted
    pub warmup_attempts: u32,
    /// Tick on which the boot is declared timed out
    pub max_attempts: u32,
    /// Timeout for a single reachability probe in milliseconds
    pub probe_timeout_ms: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            warmup_attempts: DEFAULT_WARMUP_ATTEMPTS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
        }
    }
}

impl PollerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.interval_ms < MIN_INTERVAL_MS || self.interval_ms > MAX_INTERVAL_MS {
            return Err(ConfigError::poller(format!(
                "poller.interval_ms must be {}-{}, got {}",
                MIN_INTERVAL_MS, MAX_INTERVAL_MS, self.interval_ms
            )));
        }

        if self.max_attempts < MIN_MAX_ATTEMPTS || self.max_attempts > MAX_MAX_ATTEMPTS {
            return Err(ConfigError::poller(format!(
                "poller.max_attempts must be {}-{}, got {}",
                MIN_MAX_ATTEMPTS, MAX_MAX_ATTEMPTS, self.max_attempts
            )));
        }

        if self.warmup_attempts > self.max_attempts {
            return Err(ConfigError::poller(format!(
                "poller.warmup_attempts ({}) cannot exceed poller.max_attempts ({})",
                self.warmup_attempts, self.max_attempts
            )));
        }

        if self.probe_timeout_ms < MIN_PROBE_TIMEOUT_MS
            || self.probe_timeout_ms > MAX_PROBE_TIMEOUT_MS
        {
            return Err(ConfigError::poller(format!(
                "poller.probe_timeout_ms must be {}-{}, got {}",
                MIN_PROBE_TIMEOUT_MS, MAX_PROBE_TIMEOUT_MS, self.probe_timeout_ms
            )));
        }

        Ok(())
    }
}
