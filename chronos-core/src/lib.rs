//! Chronos Core - calendar and duration engine
//!
//! This crate provides the value types and algorithms of Chronos:
//! - `Duration`: signed elapsed time with nanosecond precision
//! - `Timestamp`: seconds + nanoseconds since the Unix epoch
//! - `DateTime`: broken-down proleptic Gregorian date and time with
//!   calendar-aware arithmetic (month-end clamping) and ISO 8601 text
//! - `Weekday`: Sunday-first day of the week
//! - `Clock`: the injected capability that supplies the current time and
//!   the local UTC offset
//!
//! Everything except the `Clock` calls is a pure function of its inputs.
//! Leap seconds are not modeled.

pub mod calendar;
mod clock;
mod datetime;
mod duration;
mod error;
mod parse;
mod timestamp;
mod weekday;

pub use calendar::{days_in_month, days_in_year, is_leap_year};
pub use clock::{Clock, FixedClock};
pub use datetime::DateTime;
pub use duration::{Duration, NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MINUTE, NANOS_PER_SECOND};
pub use error::{codes, ClockError, DateTimeError, Error, ParseError};
pub use parse::{parse_date, parse_iso8601, parse_time};
pub use timestamp::Timestamp;
pub use weekday::Weekday;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Clock, DateTime, Duration, Error, Timestamp, Weekday};
    pub use crate::{parse_date, parse_iso8601, parse_time};
}
