//! Calendar math on the proleptic Gregorian calendar
//!
//! Pure functions shared by [`DateTime`](crate::DateTime) conversion,
//! arithmetic and validation. Day counts are relative to the Unix epoch:
//! day 0 is 1970-01-01, negative counts are earlier.

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Days in each month (non-leap year)
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days from 0000-03-01 to 1970-01-01
const UNIX_EPOCH_DAYS: i64 = 719_468;

/// Days in one 400-year Gregorian cycle
const DAYS_PER_ERA: i64 = 146_097;

/// Check if year is a leap year
pub fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Get days in a month, or 0 for a month outside 1-12
pub fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => DAYS_IN_MONTH[(month - 1) as usize],
        _ => 0,
    }
}

/// Get days in a year (365 or 366)
pub fn days_in_year(year: i64) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Convert a civil date to days since the Unix epoch
///
/// Algorithm from Howard Hinnant: http://howardhinnant.github.io/date_algorithms.html
///
/// The date is not validated; callers pass a `(year, month, day)` that
/// satisfies `1 <= day <= days_in_month(year, month)`. Exact for years within
/// ±10^15, which covers the full [`DateTime`](crate::DateTime) range.
pub fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = year - if month <= 2 { 1 } else { 0 };
    let era = y.div_euclid(400);
    let yoe = y - era * 400; // [0, 399]
    let mp = (month as i64 + 9) % 12; // March = 0
    let doy = (153 * mp + 2) / 5 + day as i64 - 1; // [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
    era * DAYS_PER_ERA + doe - UNIX_EPOCH_DAYS
}

/// Convert days since the Unix epoch to a civil date
///
/// Algorithm from Howard Hinnant: http://howardhinnant.github.io/date_algorithms.html
///
/// Defined for every `i64` day count; the shift to the March-based
/// origin is done in `i128` so the extremes do not overflow.
pub fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = i128::from(days) + i128::from(UNIX_EPOCH_DAYS);
    let era = z.div_euclid(i128::from(DAYS_PER_ERA));
    let doe = (z - era * i128::from(DAYS_PER_ERA)) as i64; // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365; // [0, 399]
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let day = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let month = if mp < 10 { mp + 3 } else { mp - 9 }; // [1, 12]
    // |days| <= 2^63 keeps |year| below 2^55
    let year = (i128::from(yoe) + era * 400) as i64 + if month <= 2 { 1 } else { 0 };
    (year, month as u32, day as u32)
}

/// Split epoch seconds into `(day_count, seconds_of_day)`
///
/// Uses floor division, so `seconds_of_day` is in `[0, 86400)` for
/// negative input too.
pub fn split_day_seconds(seconds: i64) -> (i64, i64) {
    (seconds.div_euclid(SECONDS_PER_DAY), seconds.rem_euclid(SECONDS_PER_DAY))
}
