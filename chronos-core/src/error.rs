//! Structured errors
//!
//! Errors never crash the caller. Every fallible operation returns one of
//! the enums below; [`Error`] gathers them with a machine-readable code.

use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_DATE: &str = "INVALID_DATE";
    pub const INVALID_TIME: &str = "INVALID_TIME";
    pub const DATE_PARSE_ERROR: &str = "DATE_PARSE_ERROR";
    pub const CLOCK_ERROR: &str = "CLOCK_ERROR";
}

/// A calendar or clock component outside its valid range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeError {
    #[error("invalid month: {0} (must be 1-12)")]
    InvalidMonth(u32),

    #[error("invalid day: {day} for {year:04}-{month:02} (must be 1-{max_day})")]
    InvalidDay {
        year: i64,
        month: u32,
        day: u32,
        max_day: u32,
    },

    #[error("invalid hour: {0} (must be 0-23)")]
    InvalidHour(u32),

    #[error("invalid minute: {0} (must be 0-59)")]
    InvalidMinute(u32),

    #[error("invalid second: {0} (must be 0-59)")]
    InvalidSecond(u32),

    #[error("invalid nanosecond: {0} (must be below 1000000000)")]
    InvalidNanosecond(u32),

    #[error("date outside the range of Timestamp")]
    OutOfRange,
}

impl DateTimeError {
    /// Whether the error concerns the date part (year, month, day)
    pub fn is_date_error(&self) -> bool {
        matches!(self, Self::InvalidMonth(_) | Self::InvalidDay { .. } | Self::OutOfRange)
    }
}

/// Text that is not an accepted ISO 8601 date or time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("expected {expected} at position {position}")]
    Syntax {
        position: usize,
        expected: &'static str,
    },

    #[error("unexpected trailing input at position {position}")]
    TrailingInput { position: usize },

    #[error(transparent)]
    Invalid(#[from] DateTimeError),
}

/// The clock capability could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("wall clock unavailable: {0}")]
    Unavailable(String),

    #[error("local offset unavailable: {0}")]
    OffsetUnavailable(String),
}

/// Any error produced by this crate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    DateTime(#[from] DateTimeError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Clock(#[from] ClockError),
}

impl Error {
    /// Machine-readable code, one of [`codes`]
    pub fn code(&self) -> &'static str {
        match self {
            Self::DateTime(e) | Self::Parse(ParseError::Invalid(e)) => {
                if e.is_date_error() {
                    codes::INVALID_DATE
                } else {
                    codes::INVALID_TIME
                }
            }
            Self::Parse(_) => codes::DATE_PARSE_ERROR,
            Self::Clock(_) => codes::CLOCK_ERROR,
        }
    }

    /// Suggestion for fixing the error
    pub fn suggestion(&self) -> &'static str {
        match self.code() {
            codes::INVALID_DATE => "Check date components (month 1-12, day within the month, year within Timestamp range)",
            codes::INVALID_TIME => "Check time components (hour 0-23, minute 0-59, second 0-59)",
            codes::DATE_PARSE_ERROR => "Use ISO 8601 format (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS[.fraction])",
            _ => "Retry reading the clock or supply a fixed clock",
        }
    }
}
