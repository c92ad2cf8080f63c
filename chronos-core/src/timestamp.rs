//! Linear points in time relative to the Unix epoch

use crate::duration::{Duration, NANOS_PER_MILLI, NANOS_PER_SECOND};
use crate::error::DateTimeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A point in time as seconds and nanoseconds since 1970-01-01T00:00:00Z
///
/// `nanoseconds` is always in `[0, 1_000_000_000)`, whatever the sign of
/// `seconds`: one nanosecond before the epoch is `(-1, 999_999_999)`.
/// Ordering is lexicographic on `(seconds, nanoseconds)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimestampParts")]
pub struct Timestamp {
    seconds: i64,
    nanoseconds: u32,
}

#[derive(Deserialize)]
struct TimestampParts {
    seconds: i64,
    nanoseconds: u32,
}

impl TryFrom<TimestampParts> for Timestamp {
    type Error = DateTimeError;

    fn try_from(parts: TimestampParts) -> Result<Self, Self::Error> {
        if parts.nanoseconds as i128 >= NANOS_PER_SECOND {
            return Err(DateTimeError::InvalidNanosecond(parts.nanoseconds));
        }
        Ok(Self { seconds: parts.seconds, nanoseconds: parts.nanoseconds })
    }
}

impl Timestamp {
    /// 1970-01-01T00:00:00Z
    pub const EPOCH: Timestamp = Timestamp { seconds: 0, nanoseconds: 0 };

    /// Earliest representable instant
    pub const MIN: Timestamp = Timestamp { seconds: i64::MIN, nanoseconds: 0 };

    /// Latest representable instant
    pub const MAX: Timestamp = Timestamp { seconds: i64::MAX, nanoseconds: 999_999_999 };

    // ========== Construction ==========

    /// Create from seconds and a nanosecond component
    ///
    /// A nanosecond component of one second or more is carried into
    /// `seconds`.
    ///
    /// # Panics
    ///
    /// Panics if carrying pushes `seconds` past `i64::MAX`.
    pub fn new(seconds: i64, nanoseconds: u32) -> Self {
        let carry = (nanoseconds / NANOS_PER_SECOND as u32) as i64;
        Self {
            seconds: seconds + carry,
            nanoseconds: nanoseconds % NANOS_PER_SECOND as u32,
        }
    }

    /// Create from whole seconds since the epoch
    pub const fn from_seconds(seconds: i64) -> Self {
        Self { seconds, nanoseconds: 0 }
    }

    /// Create from milliseconds since the epoch
    pub fn from_milliseconds(millis: i64) -> Self {
        Self {
            seconds: millis.div_euclid(1_000),
            nanoseconds: (millis.rem_euclid(1_000) as i128 * NANOS_PER_MILLI) as u32,
        }
    }

    /// Create from a signed nanosecond total, using floor division so the
    /// nanosecond component stays non-negative
    ///
    /// Returns `None` if the seconds component does not fit in an `i64`.
    pub fn from_nanoseconds(nanos: i128) -> Option<Self> {
        let seconds = i64::try_from(nanos.div_euclid(NANOS_PER_SECOND)).ok()?;
        Some(Self {
            seconds,
            nanoseconds: nanos.rem_euclid(NANOS_PER_SECOND) as u32,
        })
    }

    // ========== Accessors ==========

    /// Seconds since the epoch (floor, negative before 1970)
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Sub-second component in `[0, 1_000_000_000)`
    pub const fn nanoseconds(&self) -> u32 {
        self.nanoseconds
    }

    /// Signed nanoseconds since the epoch
    pub fn as_nanoseconds(&self) -> i128 {
        self.seconds as i128 * NANOS_PER_SECOND + self.nanoseconds as i128
    }

    // ========== Arithmetic ==========

    /// Add a duration, or `None` if the result leaves the representable range
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        let total = self.as_nanoseconds().checked_add(duration.as_nanoseconds())?;
        Self::from_nanoseconds(total)
    }

    /// Subtract a duration, or `None` if the result leaves the representable range
    pub fn checked_sub(&self, duration: Duration) -> Option<Self> {
        let total = self.as_nanoseconds().checked_sub(duration.as_nanoseconds())?;
        Self::from_nanoseconds(total)
    }

    /// Get duration from `other` to `self` (negative if `other` is later)
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        Duration::from_nanoseconds(self.as_nanoseconds() - other.as_nanoseconds())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.seconds, self.nanoseconds)
    }
}

/// # Panics
///
/// Panics if the result overflows, like `std::time::SystemTime`.
/// Use [`Timestamp::checked_add`] otherwise.
impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        match self.checked_add(rhs) {
            Some(ts) => ts,
            None => panic!("overflow when adding duration to timestamp"),
        }
    }
}

/// # Panics
///
/// Panics if the result overflows. Use [`Timestamp::checked_sub`] otherwise.
impl Sub<Duration> for Timestamp {
    type Output = Timestamp;

    fn sub(self, rhs: Duration) -> Timestamp {
        match self.checked_sub(rhs) {
            Some(ts) => ts,
            None => panic!("overflow when subtracting duration from timestamp"),
        }
    }
}

impl Sub for Timestamp {
    type Output = Duration;

    fn sub(self, rhs: Timestamp) -> Duration {
        self.duration_since(&rhs)
    }
}
