//! Signed elapsed time with nanosecond precision

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

pub const NANOS_PER_MILLI: i128 = 1_000_000;
pub const NANOS_PER_SECOND: i128 = 1_000_000_000;
pub const NANOS_PER_MINUTE: i128 = 60 * NANOS_PER_SECOND;
pub const NANOS_PER_HOUR: i128 = 60 * NANOS_PER_MINUTE;
pub const NANOS_PER_DAY: i128 = 24 * NANOS_PER_HOUR;

/// A duration with nanosecond precision
///
/// Can be positive (forward in time) or negative (backward). The total is
/// kept as an `i128`, so every constructor taking an `i64` count is exact.
/// Arithmetic past the `i128` range panics in debug builds; use the
/// `checked_*` methods where magnitudes are not bounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Duration {
    /// Signed nanoseconds
    nanos: i128,
}

impl Duration {
    pub const ZERO: Duration = Duration { nanos: 0 };

    // ========== Construction ==========

    /// Create from nanoseconds
    pub const fn from_nanoseconds(nanos: i128) -> Self {
        Self { nanos }
    }

    /// Create from milliseconds
    pub const fn from_milliseconds(millis: i64) -> Self {
        Self { nanos: millis as i128 * NANOS_PER_MILLI }
    }

    /// Create from seconds
    pub const fn from_seconds(secs: i64) -> Self {
        Self { nanos: secs as i128 * NANOS_PER_SECOND }
    }

    /// Create from minutes
    pub const fn from_minutes(minutes: i64) -> Self {
        Self { nanos: minutes as i128 * NANOS_PER_MINUTE }
    }

    /// Create from hours
    pub const fn from_hours(hours: i64) -> Self {
        Self { nanos: hours as i128 * NANOS_PER_HOUR }
    }

    /// Create from days (a day is always 24 hours)
    pub const fn from_days(days: i64) -> Self {
        Self { nanos: days as i128 * NANOS_PER_DAY }
    }

    // ========== Accessors ==========

    /// Get total nanoseconds
    pub const fn as_nanoseconds(&self) -> i128 {
        self.nanos
    }

    /// Get total milliseconds (truncated toward zero)
    pub fn as_milliseconds(&self) -> i128 {
        self.nanos / NANOS_PER_MILLI
    }

    /// Get total seconds (truncated toward zero)
    pub fn as_seconds(&self) -> i128 {
        self.nanos / NANOS_PER_SECOND
    }

    /// Get total minutes (truncated toward zero)
    pub fn as_minutes(&self) -> i128 {
        self.nanos / NANOS_PER_MINUTE
    }

    /// Get total hours (truncated toward zero)
    pub fn as_hours(&self) -> i128 {
        self.nanos / NANOS_PER_HOUR
    }

    /// Get total days (truncated toward zero)
    pub fn as_days(&self) -> i128 {
        self.nanos / NANOS_PER_DAY
    }

    pub const fn is_zero(&self) -> bool {
        self.nanos == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.nanos > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.nanos < 0
    }

    /// Get absolute value
    pub fn abs(&self) -> Self {
        Self { nanos: self.nanos.abs() }
    }

    // ========== Checked Arithmetic ==========

    pub fn checked_add(&self, other: Duration) -> Option<Self> {
        self.nanos.checked_add(other.nanos).map(Self::from_nanoseconds)
    }

    pub fn checked_sub(&self, other: Duration) -> Option<Self> {
        self.nanos.checked_sub(other.nanos).map(Self::from_nanoseconds)
    }

    pub fn checked_mul(&self, scalar: i64) -> Option<Self> {
        self.nanos.checked_mul(scalar as i128).map(Self::from_nanoseconds)
    }

    /// Divide by an integer, truncating toward zero
    ///
    /// Returns `None` when `divisor` is zero.
    pub fn checked_div(&self, divisor: i64) -> Option<Self> {
        self.nanos.checked_div(divisor as i128).map(Self::from_nanoseconds)
    }

    // ========== Formatting ==========

    /// Render as space-separated units, e.g. `1d 1h`, `1h 1m 1s`, `500ms`
    ///
    /// Magnitudes of one second or more are split into days, hours,
    /// minutes and whole seconds, and zero components are left out.
    /// Anything shorter than a second is a single `ms` token, or `ns`
    /// below one millisecond. Zero is `0s`.
    pub fn to_human_string(&self) -> String {
        if self.nanos == 0 {
            return "0s".to_string();
        }

        let sign = if self.nanos < 0 { "-" } else { "" };
        let abs = self.nanos.unsigned_abs();

        if abs < NANOS_PER_SECOND as u128 {
            return if abs >= NANOS_PER_MILLI as u128 {
                format!("{}{}ms", sign, abs / NANOS_PER_MILLI as u128)
            } else {
                format!("{}{}ns", sign, abs)
            };
        }

        let units = [
            (NANOS_PER_DAY as u128, "d"),
            (NANOS_PER_HOUR as u128, "h"),
            (NANOS_PER_MINUTE as u128, "m"),
            (NANOS_PER_SECOND as u128, "s"),
        ];

        let mut remaining = abs;
        let mut parts = Vec::with_capacity(units.len());
        for (size, suffix) in units {
            let count = remaining / size;
            remaining %= size;
            if count > 0 {
                parts.push(format!("{}{}", count, suffix));
            }
        }

        format!("{}{}", sign, parts.join(" "))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_human_string())
    }
}

// ============================================================================
// Operators
// ============================================================================

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration { nanos: self.nanos + rhs.nanos }
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        Duration { nanos: self.nanos - rhs.nanos }
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        Duration { nanos: -self.nanos }
    }
}

impl Mul<i64> for Duration {
    type Output = Duration;

    fn mul(self, rhs: i64) -> Duration {
        Duration { nanos: self.nanos * rhs as i128 }
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Duration) {
        self.nanos += rhs.nanos;
    }
}

impl SubAssign for Duration {
    fn sub_assign(&mut self, rhs: Duration) {
        self.nanos -= rhs.nanos;
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Duration {
        iter.fold(Duration::ZERO, Add::add)
    }
}
