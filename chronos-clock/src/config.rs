//! Configuration for [`SystemClock`](crate::SystemClock)

use chronos_core::ClockError;

/// Environment variable holding a fixed local offset
///
/// Accepts signed seconds (`3600`, `-18000`) or `+HH:MM` / `-HH:MM`.
pub const LOCAL_OFFSET_ENV: &str = "CHRONOS_LOCAL_OFFSET";

/// Offsets must stay strictly within one day of UTC
const MAX_OFFSET_SECONDS: i32 = 86_400;

/// Configuration for the system clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockConfig {
    /// Fixed local offset used instead of the operating system's zone
    pub local_offset_override: Option<i32>,
}

impl ClockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: pin the local offset (seconds east of UTC)
    pub fn with_local_offset(mut self, offset_seconds: i32) -> Self {
        self.local_offset_override = Some(offset_seconds);
        self
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ClockError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClockError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(LOCAL_OFFSET_ENV) {
            let offset = parse_offset(&raw)?;
            tracing::debug!(offset, "local offset pinned by {}", LOCAL_OFFSET_ENV);
            config.local_offset_override = Some(offset);
        }
        Ok(config)
    }
}

/// Parse `"3600"`, `"-18000"`, `"+05:30"` or `"-08:00"` into seconds east of UTC
pub fn parse_offset(raw: &str) -> Result<i32, ClockError> {
    let text = raw.trim();
    let invalid = || ClockError::OffsetUnavailable(format!("invalid {LOCAL_OFFSET_ENV} value '{raw}'"));

    let seconds = match text.split_once(':') {
        Some((hours, minutes)) => {
            let (sign, hours) = match hours.as_bytes().first() {
                Some(b'+') => (1, &hours[1..]),
                Some(b'-') => (-1, &hours[1..]),
                _ => return Err(invalid()),
            };
            if hours.len() != 2 || minutes.len() != 2 {
                return Err(invalid());
            }
            if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let hours: i32 = hours.parse().map_err(|_| invalid())?;
            let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
            if minutes > 59 {
                return Err(invalid());
            }
            sign * (hours * 3600 + minutes * 60)
        }
        None => text.parse::<i32>().map_err(|_| invalid())?,
    };

    if seconds.abs() >= MAX_OFFSET_SECONDS {
        return Err(invalid());
    }
    Ok(seconds)
}
