//! Clock capability
//!
//! The only way this crate observes the outside world. Implementations
//! read the real clock (see the `chronos-clock` crate) or return fixed
//! values so that calendar code stays deterministic under test.

use crate::error::ClockError;
use crate::timestamp::Timestamp;

/// Source of the current time and of the local UTC offset
///
/// Each call is a single blocking read that either returns a value or
/// fails. Callers own any retry policy.
pub trait Clock: Send + Sync {
    /// Current wall-clock time
    fn wall_clock_time(&self) -> Result<Timestamp, ClockError>;

    /// Local offset from UTC in seconds, positive east of Greenwich
    fn local_offset_seconds(&self) -> Result<i32, ClockError>;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn wall_clock_time(&self) -> Result<Timestamp, ClockError> {
        (**self).wall_clock_time()
    }

    fn local_offset_seconds(&self) -> Result<i32, ClockError> {
        (**self).local_offset_seconds()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn wall_clock_time(&self) -> Result<Timestamp, ClockError> {
        (**self).wall_clock_time()
    }

    fn local_offset_seconds(&self) -> Result<i32, ClockError> {
        (**self).local_offset_seconds()
    }
}

/// A clock frozen at one instant and one offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: Timestamp,
    offset_seconds: i32,
}

impl FixedClock {
    /// A clock reading `now` in UTC (offset 0)
    pub fn new(now: Timestamp) -> Self {
        Self { now, offset_seconds: 0 }
    }

    /// Builder: set the local offset
    pub fn with_offset(mut self, offset_seconds: i32) -> Self {
        self.offset_seconds = offset_seconds;
        self
    }
}

impl Clock for FixedClock {
    fn wall_clock_time(&self) -> Result<Timestamp, ClockError> {
        Ok(self.now)
    }

    fn local_offset_seconds(&self) -> Result<i32, ClockError> {
        Ok(self.offset_seconds)
    }
}
