//! Broken-down calendar values
//!
//! A [`DateTime`] holds year, month, day, hour, minute, second and
//! nanosecond fields on the proleptic Gregorian calendar. Conversion to and
//! from [`Timestamp`] goes through the day-count functions in
//! [`calendar`](crate::calendar).
//!
//! Design principles:
//! - Fields are always valid at rest; every constructor validates and every
//!   arithmetic operation clamps or normalizes
//! - No leap seconds: every minute has exactly 60 seconds
//! - UTC fields by default; local fields only through an explicit offset or
//!   a [`Clock`]
//! - The range is exactly that of [`Timestamp`], from [`DateTime::MIN`] to
//!   [`DateTime::MAX`], so the two convert into each other without loss

use crate::calendar::{
    civil_from_days, days_from_civil, days_in_month, days_in_year, split_day_seconds,
    SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
use crate::clock::Clock;
use crate::duration::{Duration, NANOS_PER_SECOND};
use crate::error::{ClockError, DateTimeError, Error, ParseError};
use crate::timestamp::Timestamp;
use crate::weekday::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

const MAX_NANOSECOND: u32 = NANOS_PER_SECOND as u32 - 1;

/// A calendar date and time of day with nanosecond precision
///
/// Ordering is lexicographic over `(year, month, day, hour, minute, second,
/// nanosecond)`, which matches chronological order for values in the same
/// offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateTimeFields")]
pub struct DateTime {
    year: i64,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    nanosecond: u32,
}

/// Unvalidated field set, used only to validate deserialized input
#[derive(Deserialize)]
struct DateTimeFields {
    year: i64,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    nanosecond: u32,
}

impl TryFrom<DateTimeFields> for DateTime {
    type Error = DateTimeError;

    fn try_from(f: DateTimeFields) -> Result<Self, Self::Error> {
        DateTime::new(f.year, f.month, f.day, f.hour, f.minute, f.second, f.nanosecond)
    }
}

impl DateTime {
    /// UTC fields of [`Timestamp::MIN`]
    pub const MIN: DateTime = DateTime {
        year: -292_277_022_657,
        month: 1,
        day: 27,
        hour: 8,
        minute: 29,
        second: 52,
        nanosecond: 0,
    };

    /// UTC fields of [`Timestamp::MAX`]
    pub const MAX: DateTime = DateTime {
        year: 292_277_026_596,
        month: 12,
        day: 4,
        hour: 15,
        minute: 30,
        second: 7,
        nanosecond: MAX_NANOSECOND,
    };

    // ========== Construction ==========

    /// Create a datetime from components with nanoseconds
    ///
    /// Fails with [`DateTimeError::OutOfRange`] outside
    /// [`DateTime::MIN`]..=[`DateTime::MAX`].
    pub fn new(
        year: i64,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        nanosecond: u32,
    ) -> Result<Self, DateTimeError> {
        if !(1..=12).contains(&month) {
            return Err(DateTimeError::InvalidMonth(month));
        }
        let max_day = days_in_month(year, month);
        if day < 1 || day > max_day {
            return Err(DateTimeError::InvalidDay { year, month, day, max_day });
        }
        if hour > 23 {
            return Err(DateTimeError::InvalidHour(hour));
        }
        if minute > 59 {
            return Err(DateTimeError::InvalidMinute(minute));
        }
        if second > 59 {
            return Err(DateTimeError::InvalidSecond(second));
        }
        if nanosecond > MAX_NANOSECOND {
            return Err(DateTimeError::InvalidNanosecond(nanosecond));
        }

        let dt = Self { year, month, day, hour, minute, second, nanosecond };
        if dt < Self::MIN || dt > Self::MAX {
            return Err(DateTimeError::OutOfRange);
        }
        Ok(dt)
    }

    /// Create a date (time = 00:00:00)
    pub fn from_ymd(year: i64, month: u32, day: u32) -> Result<Self, DateTimeError> {
        Self::new(year, month, day, 0, 0, 0, 0)
    }

    /// Create a datetime from components
    pub fn from_ymd_hms(
        year: i64,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, DateTimeError> {
        Self::new(year, month, day, hour, minute, second, 0)
    }

    /// Create a time-only value (date = 1970-01-01)
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self, DateTimeError> {
        Self::new(1970, 1, 1, hour, minute, second, 0)
    }

    /// Rebuild from a day count and an in-range time of day
    fn from_day_count(days: i64, seconds_of_day: i64, nanosecond: u32) -> Self {
        let (year, month, day) = civil_from_days(days);
        Self {
            year,
            month,
            day,
            hour: (seconds_of_day / SECONDS_PER_HOUR) as u32,
            minute: (seconds_of_day % SECONDS_PER_HOUR / SECONDS_PER_MINUTE) as u32,
            second: (seconds_of_day % SECONDS_PER_MINUTE) as u32,
            nanosecond,
        }
    }

    /// Same date with a different time of day; callers pass valid fields
    /// and restore the range
    fn with_time(&self, hour: u32, minute: u32, second: u32, nanosecond: u32) -> Self {
        Self { hour, minute, second, nanosecond, ..*self }
    }

    /// Same time of day on a different date, or `None` outside the range
    fn with_date(&self, year: i64, month: u32, day: u32) -> Option<Self> {
        Self::new(year, month, day, self.hour, self.minute, self.second, self.nanosecond).ok()
    }

    /// Like `with_date`, clamping the day to the end of the month
    fn with_clamped_date(&self, year: i64, month: u32, day: u32) -> Option<Self> {
        self.with_date(year, month, day.min(days_in_month(year, month)))
    }

    // ========== Accessors ==========

    pub fn year(&self) -> i64 {
        self.year
    }

    /// Month component (1-12)
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Day component (1-31)
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Hour component (0-23)
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Minute component (0-59)
    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Second component (0-59)
    pub fn second(&self) -> u32 {
        self.second
    }

    /// Nanosecond component (0-999_999_999)
    pub fn nanosecond(&self) -> u32 {
        self.nanosecond
    }

    /// Millisecond component (0-999)
    pub fn millisecond(&self) -> u32 {
        self.nanosecond / 1_000_000
    }

    /// Days since 1970-01-01 (negative before)
    pub fn days_since_epoch(&self) -> i64 {
        days_from_civil(self.year, self.month, self.day)
    }

    fn seconds_of_day(&self) -> i64 {
        self.hour as i64 * SECONDS_PER_HOUR
            + self.minute as i64 * SECONDS_PER_MINUTE
            + self.second as i64
    }

    // ========== Timestamp Conversion ==========

    /// UTC fields of a timestamp
    pub fn from_timestamp_utc(ts: Timestamp) -> Self {
        let (days, seconds_of_day) = split_day_seconds(ts.seconds());
        Self::from_day_count(days, seconds_of_day, ts.nanoseconds())
    }

    /// Fields of a timestamp as seen at `offset_seconds` east of UTC
    ///
    /// Fails with [`DateTimeError::OutOfRange`] when the shifted instant
    /// leaves the [`Timestamp`] range.
    pub fn from_timestamp_with_offset(ts: Timestamp, offset_seconds: i32) -> Result<Self, DateTimeError> {
        let seconds = shift_seconds(ts.seconds(), i64::from(offset_seconds))?;
        Ok(Self::from_timestamp_utc(Timestamp::new(seconds, ts.nanoseconds())))
    }

    /// Local fields of a timestamp, using the clock's local offset
    pub fn from_timestamp_local<C: Clock + ?Sized>(ts: Timestamp, clock: &C) -> Result<Self, Error> {
        let offset = local_offset(clock)?;
        Ok(Self::from_timestamp_with_offset(ts, offset)?)
    }

    /// Timestamp of these fields read as UTC
    pub fn to_timestamp(&self) -> Timestamp {
        let days = self.days_since_epoch();
        let seconds_of_day = self.seconds_of_day();
        // On the first day of the range `days * 86400` alone is below i64::MIN
        let seconds = if days < 0 {
            (days + 1) * SECONDS_PER_DAY + (seconds_of_day - SECONDS_PER_DAY)
        } else {
            days * SECONDS_PER_DAY + seconds_of_day
        };
        Timestamp::new(seconds, self.nanosecond)
    }

    /// Timestamp of these fields read at `offset_seconds` east of UTC
    ///
    /// Fails with [`DateTimeError::OutOfRange`] when the result leaves the
    /// [`Timestamp`] range.
    pub fn to_timestamp_with_offset(&self, offset_seconds: i32) -> Result<Timestamp, DateTimeError> {
        let utc = self.to_timestamp();
        let seconds = shift_seconds(utc.seconds(), -i64::from(offset_seconds))?;
        Ok(Timestamp::new(seconds, utc.nanoseconds()))
    }

    /// Timestamp of these fields read as local time, using the clock's offset
    pub fn to_timestamp_local<C: Clock + ?Sized>(&self, clock: &C) -> Result<Timestamp, Error> {
        let offset = local_offset(clock)?;
        Ok(self.to_timestamp_with_offset(offset)?)
    }

    /// Current time as UTC fields
    pub fn now_utc<C: Clock + ?Sized>(clock: &C) -> Result<Self, ClockError> {
        let now = wall_clock_time(clock)?;
        Ok(Self::from_timestamp_utc(now))
    }

    /// Current time as local fields
    pub fn now_local<C: Clock + ?Sized>(clock: &C) -> Result<Self, Error> {
        let now = wall_clock_time(clock)?;
        Self::from_timestamp_local(now, clock)
    }

    // ========== Calendar Arithmetic ==========

    /// Add days, keeping the time of day
    ///
    /// # Panics
    ///
    /// Panics if the result leaves the range; see
    /// [`DateTime::checked_add_days`].
    pub fn add_days(&self, days: i64) -> Self {
        match self.checked_add_days(days) {
            Some(dt) => dt,
            None => panic!("overflow when adding days to datetime"),
        }
    }

    /// Add days, or `None` if the result leaves the range
    pub fn checked_add_days(&self, days: i64) -> Option<Self> {
        let (year, month, day) = civil_from_days(self.days_since_epoch().checked_add(days)?);
        self.with_date(year, month, day)
    }

    /// Add months, clamping the day to the end of the target month
    ///
    /// 2025-01-31 plus one month is 2025-02-28; in 2024 it is 2024-02-29.
    ///
    /// # Panics
    ///
    /// Panics if the result leaves the range; see
    /// [`DateTime::checked_add_months`].
    pub fn add_months(&self, months: i64) -> Self {
        match self.checked_add_months(months) {
            Some(dt) => dt,
            None => panic!("overflow when adding months to datetime"),
        }
    }

    /// Add months, or `None` if the result leaves the range
    pub fn checked_add_months(&self, months: i64) -> Option<Self> {
        let total_months = i128::from(self.year) * 12 + i128::from(self.month - 1) + i128::from(months);
        let year = i64::try_from(total_months.div_euclid(12)).ok()?;
        let month = (total_months.rem_euclid(12) + 1) as u32;
        self.with_clamped_date(year, month, self.day)
    }

    /// Add years, clamping Feb 29 to Feb 28 outside leap years
    ///
    /// # Panics
    ///
    /// Panics if the result leaves the range; see
    /// [`DateTime::checked_add_years`].
    pub fn add_years(&self, years: i64) -> Self {
        match self.checked_add_years(years) {
            Some(dt) => dt,
            None => panic!("overflow when adding years to datetime"),
        }
    }

    /// Add years, or `None` if the result leaves the range
    pub fn checked_add_years(&self, years: i64) -> Option<Self> {
        self.with_clamped_date(self.year.checked_add(years)?, self.month, self.day)
    }

    /// Add hours, rolling over into days, months and years
    pub fn add_hours(&self, hours: i64) -> Self {
        self.add_duration(Duration::from_hours(hours))
    }

    /// Add minutes, rolling over into hours and beyond
    pub fn add_minutes(&self, minutes: i64) -> Self {
        self.add_duration(Duration::from_minutes(minutes))
    }

    /// Add seconds, rolling over into minutes and beyond
    pub fn add_seconds(&self, seconds: i64) -> Self {
        self.add_duration(Duration::from_seconds(seconds))
    }

    /// Add an exact duration on the UTC timeline
    ///
    /// # Panics
    ///
    /// Panics if the result leaves the [`Timestamp`] range; see
    /// [`DateTime::checked_add_duration`].
    pub fn add_duration(&self, duration: Duration) -> Self {
        Self::from_timestamp_utc(self.to_timestamp() + duration)
    }

    /// Subtract an exact duration on the UTC timeline
    pub fn sub_duration(&self, duration: Duration) -> Self {
        Self::from_timestamp_utc(self.to_timestamp() - duration)
    }

    /// Add a duration, or `None` if the result leaves the [`Timestamp`] range
    pub fn checked_add_duration(&self, duration: Duration) -> Option<Self> {
        self.to_timestamp().checked_add(duration).map(Self::from_timestamp_utc)
    }

    /// Get duration from `other` to `self`, both read as UTC
    pub fn duration_since(&self, other: &DateTime) -> Duration {
        self.to_timestamp().duration_since(&other.to_timestamp())
    }

    // ========== Period Boundaries ==========
    //
    // Boundaries past DateTime::MIN or DateTime::MAX saturate at the edge.

    /// Get start of day (00:00:00.000)
    pub fn start_of_day(&self) -> Self {
        self.with_time(0, 0, 0, 0).clamp(Self::MIN, Self::MAX)
    }

    /// Get end of day (23:59:59.999999999)
    pub fn end_of_day(&self) -> Self {
        self.with_time(23, 59, 59, MAX_NANOSECOND).clamp(Self::MIN, Self::MAX)
    }

    /// Get start of month
    pub fn start_of_month(&self) -> Self {
        Self { day: 1, ..self.with_time(0, 0, 0, 0) }.clamp(Self::MIN, Self::MAX)
    }

    /// Get end of month (last day at 23:59:59.999...)
    pub fn end_of_month(&self) -> Self {
        Self {
            day: days_in_month(self.year, self.month),
            ..self.with_time(23, 59, 59, MAX_NANOSECOND)
        }
        .clamp(Self::MIN, Self::MAX)
    }

    /// Get start of year
    pub fn start_of_year(&self) -> Self {
        Self { month: 1, day: 1, ..self.with_time(0, 0, 0, 0) }.clamp(Self::MIN, Self::MAX)
    }

    /// Check if same calendar day as another datetime
    pub fn is_same_day(&self, other: &DateTime) -> bool {
        (self.year, self.month, self.day) == (other.year, other.month, other.day)
    }

    // ========== Calendar Queries ==========

    /// Day of the week
    pub fn weekday(&self) -> Weekday {
        Weekday::from_days_since_epoch(self.days_since_epoch())
    }

    /// Check if this falls on Saturday or Sunday
    pub fn is_weekend(&self) -> bool {
        self.weekday().is_weekend()
    }

    /// Check if this falls on Monday through Friday
    pub fn is_weekday(&self) -> bool {
        self.weekday().is_weekday()
    }

    /// Get day of year (1-366)
    pub fn day_of_year(&self) -> u32 {
        (self.days_since_epoch() - days_from_civil(self.year, 1, 1)) as u32 + 1
    }

    /// Get ISO 8601 week number (1-53)
    ///
    /// Weeks start on Monday and week 1 holds the year's first Thursday.
    /// Early January days can belong to the last week of the previous
    /// year, and late December days to week 1 of the next.
    pub fn week_of_year(&self) -> u32 {
        let doy = self.day_of_year() as i64;
        let dow = self.weekday().iso_number() as i64;
        let week = (doy - dow + 10) / 7;

        if week < 1 {
            iso_weeks_in_year(self.year - 1)
        } else if week as u32 > iso_weeks_in_year(self.year) {
            1
        } else {
            week as u32
        }
    }

    // ========== Formatting ==========

    /// Format the date as `YYYY-MM-DD`
    ///
    /// Years outside 0-9999 carry an explicit sign: `-0044-03-15`,
    /// `+12345-01-01`.
    pub fn to_date_string(&self) -> String {
        let year = if (0..=9999).contains(&self.year) {
            format!("{:04}", self.year)
        } else if self.year < 0 {
            format!("-{:04}", self.year.unsigned_abs())
        } else {
            format!("+{:04}", self.year)
        };
        format!("{}-{:02}-{:02}", year, self.month, self.day)
    }

    /// Format the time as `HH:MM:SS`
    pub fn to_time_string(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }

    /// Format as `YYYY-MM-DDTHH:MM:SS`
    pub fn to_iso8601(&self) -> String {
        format!("{}T{}", self.to_date_string(), self.to_time_string())
    }

    /// Format as `YYYY-MM-DDTHH:MM:SS.NNNNNNNNN`
    pub fn to_iso8601_full(&self) -> String {
        format!("{}.{:09}", self.to_iso8601(), self.nanosecond)
    }
}

/// Number of ISO weeks (52 or 53) in a year
fn iso_weeks_in_year(year: i64) -> u32 {
    let jan1 = Weekday::from_days_since_epoch(days_from_civil(year, 1, 1));
    let leap = days_in_year(year) == 366;
    if jan1 == Weekday::Thursday || (leap && jan1 == Weekday::Wednesday) {
        53
    } else {
        52
    }
}

/// Apply a signed shift to epoch seconds, failing outside `i64`
fn shift_seconds(seconds: i64, shift: i64) -> Result<i64, DateTimeError> {
    seconds.checked_add(shift).ok_or(DateTimeError::OutOfRange)
}

fn wall_clock_time<C: Clock + ?Sized>(clock: &C) -> Result<Timestamp, ClockError> {
    clock
        .wall_clock_time()
        .inspect_err(|e| debug!(error = %e, "reading wall clock failed"))
}

fn local_offset<C: Clock + ?Sized>(clock: &C) -> Result<i32, ClockError> {
    clock
        .local_offset_seconds()
        .inspect_err(|e| debug!(error = %e, "reading local offset failed"))
}

impl fmt::Display for DateTime {
    /// ISO 8601, with a nanosecond fraction only when it is non-zero
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nanosecond == 0 {
            f.write_str(&self.to_iso8601())
        } else {
            f.write_str(&self.to_iso8601_full())
        }
    }
}

impl FromStr for DateTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse_iso8601(s)
    }
}

impl From<DateTime> for Timestamp {
    fn from(dt: DateTime) -> Self {
        dt.to_timestamp()
    }
}

impl From<Timestamp> for DateTime {
    fn from(ts: Timestamp) -> Self {
        DateTime::from_timestamp_utc(ts)
    }
}

// ============================================================================
// Tests
// ============================================================================
