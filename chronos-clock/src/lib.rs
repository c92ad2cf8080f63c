//! Chronos Clock - operating-system clock for Chronos
//!
//! `SystemClock` implements [`chronos_core::Clock`] on top of the real-time
//! clock (`std::time::SystemTime`) and the operating system's local zone
//! (`chrono::Local`). The offset can be pinned with [`ClockConfig`], e.g.
//! from the `CHRONOS_LOCAL_OFFSET` environment variable.

mod config;
pub mod logging;

pub use config::{parse_offset, ClockConfig, LOCAL_OFFSET_ENV};

use chronos_core::{Clock, ClockError, Timestamp};
use std::time::{SystemTime, UNIX_EPOCH};

/// Clock backed by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    config: ClockConfig,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ClockConfig) -> Self {
        Self { config }
    }

    /// Build from the process environment
    pub fn from_env() -> Result<Self, ClockError> {
        Ok(Self::with_config(ClockConfig::from_env()?))
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }
}

impl Clock for SystemClock {
    fn wall_clock_time(&self) -> Result<Timestamp, ClockError> {
        let now = SystemTime::now();
        let nanos = match now.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => i128::try_from(elapsed.as_nanos()),
            // System clock set before 1970
            Err(err) => i128::try_from(err.duration().as_nanos()).map(|n| -n),
        }
        .map_err(|_| ClockError::Unavailable("system time out of range".to_string()))?;

        let ts = Timestamp::from_nanoseconds(nanos)
            .ok_or_else(|| ClockError::Unavailable("system time out of range".to_string()))?;
        tracing::trace!(%ts, "read system clock");
        Ok(ts)
    }

    fn local_offset_seconds(&self) -> Result<i32, ClockError> {
        if let Some(offset) = self.config.local_offset_override {
            return Ok(offset);
        }
        let offset = chrono::Local::now().offset().local_minus_utc();
        tracing::trace!(offset, "read local offset");
        Ok(offset)
    }
}
