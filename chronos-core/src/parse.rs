//! ISO 8601 parsing
//!
//! Accepted forms:
//! - `2025-06-15`
//! - `2025-06-15T14:30:00` (or a space instead of `T`)
//! - `2025-06-15T14:30:00.123456789` (1 to 9 fraction digits)
//! - `-0044-03-15`, `+12345-01-01` (signed years, as the formatter writes them)
//!
//! [`parse_time`] accepts the time part alone and fills in 1970-01-01.
//! Every field is range checked before a [`DateTime`] is returned,
//! including the overall [`DateTime::MIN`]..=[`DateTime::MAX`] range.

use crate::datetime::DateTime;
use crate::error::ParseError;
use tracing::debug;

/// Maximum digits of a signed year; enough for every `DateTime` year
const MAX_YEAR_DIGITS: usize = 12;

/// Fraction digits for nanosecond precision
const FRACTION_DIGITS: usize = 9;

/// Parse `date [("T" | " ") time ["." fraction]]`
pub fn parse_iso8601(text: &str) -> Result<DateTime, ParseError> {
    logged(text, parse_datetime(text))
}

/// Parse a date only (`YYYY-MM-DD`); the time is midnight
pub fn parse_date(text: &str) -> Result<DateTime, ParseError> {
    logged(text, parse_date_only(text))
}

/// Parse a time only (`HH:MM:SS[.fraction]`); the date is 1970-01-01
pub fn parse_time(text: &str) -> Result<DateTime, ParseError> {
    logged(text, parse_time_only(text))
}

fn logged(text: &str, result: Result<DateTime, ParseError>) -> Result<DateTime, ParseError> {
    if let Err(e) = &result {
        debug!(input = text, error = %e, "rejected ISO 8601 input");
    }
    result
}

fn parse_datetime(text: &str) -> Result<DateTime, ParseError> {
    let mut cursor = Cursor::new(text)?;
    let (year, month, day) = cursor.date()?;
    let time = if cursor.eat(b'T') || cursor.eat(b' ') {
        cursor.time()?
    } else {
        TimeFields::MIDNIGHT
    };
    cursor.finish()?;
    time.on(year, month, day)
}

fn parse_date_only(text: &str) -> Result<DateTime, ParseError> {
    let mut cursor = Cursor::new(text)?;
    let (year, month, day) = cursor.date()?;
    cursor.finish()?;
    Ok(DateTime::from_ymd(year, month, day)?)
}

fn parse_time_only(text: &str) -> Result<DateTime, ParseError> {
    let mut cursor = Cursor::new(text)?;
    let time = cursor.time()?;
    cursor.finish()?;
    time.on(1970, 1, 1)
}

#[derive(Debug, Clone, Copy)]
struct TimeFields {
    hour: u32,
    minute: u32,
    second: u32,
    nanosecond: u32,
}

impl TimeFields {
    const MIDNIGHT: TimeFields = TimeFields { hour: 0, minute: 0, second: 0, nanosecond: 0 };

    fn on(self, year: i64, month: u32, day: u32) -> Result<DateTime, ParseError> {
        Ok(DateTime::new(year, month, day, self.hour, self.minute, self.second, self.nanosecond)?)
    }
}

/// Byte cursor over ASCII input
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Result<Self, ParseError> {
        if text.is_empty() {
            return Err(ParseError::Empty);
        }
        Ok(Self { bytes: text.as_bytes(), pos: 0 })
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), ParseError> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.syntax(expected))
        }
    }

    fn syntax(&self, expected: &'static str) -> ParseError {
        ParseError::Syntax { position: self.pos, expected }
    }

    fn finish(&self) -> Result<(), ParseError> {
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(ParseError::TrailingInput { position: self.pos })
        }
    }

    /// Consume a run of ASCII digits
    fn digit_run(&mut self) -> &'a [u8] {
        let bytes = self.bytes;
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        &bytes[start..self.pos]
    }

    /// Exactly `count` digits
    fn fixed_digits(&mut self, count: usize, expected: &'static str) -> Result<u32, ParseError> {
        let mut value = 0u32;
        for _ in 0..count {
            match self.peek() {
                Some(b @ b'0'..=b'9') => {
                    value = value * 10 + (b - b'0') as u32;
                    self.pos += 1;
                }
                _ => return Err(self.syntax(expected)),
            }
        }
        Ok(value)
    }

    /// `YYYY`, or a sign followed by at least four digits
    fn year(&mut self) -> Result<i64, ParseError> {
        let negative = match self.peek() {
            Some(b'-') => true,
            Some(b'+') => false,
            _ => return Ok(i64::from(self.fixed_digits(4, "four-digit year")?)),
        };
        self.pos += 1;

        let start = self.pos;
        let digits = self.digit_run();
        if digits.len() < 4 {
            return Err(self.syntax("at least four year digits after sign"));
        }
        if digits.len() > MAX_YEAR_DIGITS {
            self.pos = start;
            return Err(self.syntax("year within twelve digits"));
        }

        let magnitude = digits.iter().fold(0i64, |acc, b| acc * 10 + i64::from(b - b'0'));
        Ok(if negative { -magnitude } else { magnitude })
    }

    /// `year "-" MM "-" DD`
    fn date(&mut self) -> Result<(i64, u32, u32), ParseError> {
        let year = self.year()?;
        self.expect(b'-', "'-' after year")?;
        let month = self.fixed_digits(2, "two-digit month")?;
        self.expect(b'-', "'-' after month")?;
        let day = self.fixed_digits(2, "two-digit day")?;
        Ok((year, month, day))
    }

    /// `HH ":" MM ":" SS ["." fraction]`
    fn time(&mut self) -> Result<TimeFields, ParseError> {
        let hour = self.fixed_digits(2, "two-digit hour")?;
        self.expect(b':', "':' after hour")?;
        let minute = self.fixed_digits(2, "two-digit minute")?;
        self.expect(b':', "':' after minute")?;
        let second = self.fixed_digits(2, "two-digit second")?;
        let nanosecond = if self.eat(b'.') { self.fraction()? } else { 0 };
        Ok(TimeFields { hour, minute, second, nanosecond })
    }

    /// 1 to 9 digits, right-padded with zeros to nanoseconds
    fn fraction(&mut self) -> Result<u32, ParseError> {
        let start = self.pos;
        let digits = self.digit_run();
        if digits.is_empty() {
            return Err(self.syntax("fraction digit after '.'"));
        }
        if digits.len() > FRACTION_DIGITS {
            self.pos = start + FRACTION_DIGITS;
            return Err(self.syntax("at most nine fraction digits"));
        }

        let value = digits.iter().fold(0u32, |acc, b| acc * 10 + (b - b'0') as u32);
        Ok(value * 10u32.pow((FRACTION_DIGITS - digits.len()) as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DateTimeError;

    #[test]
    fn test_parse_full() {
        let dt = parse_iso8601("2025-06-15T14:30:45").unwrap();
        assert_eq!(dt, DateTime::from_ymd_hms(2025, 6, 15, 14, 30, 45).unwrap());
    }

    #[test]
    fn test_parse_space_separator() {
        let dt = parse_iso8601("2025-06-15 14:30:45").unwrap();
        assert_eq!(dt.hour(), 14);
    }

    #[test]
    fn test_parse_date_only_input() {
        let dt = parse_iso8601("2025-06-15").unwrap();
        assert_eq!(dt, DateTime::from_ymd(2025, 6, 15).unwrap());
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_fraction_padding() {
        let dt = parse_iso8601("2025-01-01T00:00:00.1").unwrap();
        assert_eq!(dt.nanosecond(), 100_000_000);
        let dt = parse_iso8601("2025-01-01T00:00:00.123456789").unwrap();
        assert_eq!(dt.nanosecond(), 123_456_789);
        let dt = parse_iso8601("2025-01-01T00:00:00.000001").unwrap();
        assert_eq!(dt.nanosecond(), 1_000);
    }

    #[test]
    fn test_parse_fraction_errors() {
        assert_eq!(
            parse_iso8601("2025-01-01T00:00:00.1234567891"),
            Err(ParseError::Syntax { position: 29, expected: "at most nine fraction digits" })
        );
        assert_eq!(
            parse_iso8601("2025-01-01T00:00:00."),
            Err(ParseError::Syntax { position: 20, expected: "fraction digit after '.'" })
        );
    }

    #[test]
    fn test_parse_range_validation() {
        assert_eq!(
            parse_iso8601("2025-13-01T00:00:00"),
            Err(ParseError::Invalid(DateTimeError::InvalidMonth(13)))
        );
        assert!(matches!(
            parse_iso8601("2025-02-29T00:00:00"),
            Err(ParseError::Invalid(DateTimeError::InvalidDay { day: 29, .. }))
        ));
        assert_eq!(parse_iso8601("2024-02-29T00:00:00").unwrap().day(), 29);
        assert_eq!(
            parse_iso8601("2025-01-01T24:00:00"),
            Err(ParseError::Invalid(DateTimeError::InvalidHour(24)))
        );
        assert_eq!(
            parse_iso8601("2025-01-01T00:60:00"),
            Err(ParseError::Invalid(DateTimeError::InvalidMinute(60)))
        );
        assert_eq!(
            parse_iso8601("2025-01-01T00:00:60"),
            Err(ParseError::Invalid(DateTimeError::InvalidSecond(60)))
        );
        assert!(parse_iso8601("2025-00-10").is_err());
        assert!(parse_iso8601("2025-04-31").is_err());
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(parse_iso8601(""), Err(ParseError::Empty));
        assert_eq!(
            parse_iso8601("2025/01/01"),
            Err(ParseError::Syntax { position: 4, expected: "'-' after year" })
        );
        assert_eq!(
            parse_iso8601("25-01-01"),
            Err(ParseError::Syntax { position: 2, expected: "four-digit year" })
        );
        assert_eq!(
            parse_iso8601("2025-1-01"),
            Err(ParseError::Syntax { position: 6, expected: "two-digit month" })
        );
        assert_eq!(
            parse_iso8601("2025-01-01T"),
            Err(ParseError::Syntax { position: 11, expected: "two-digit hour" })
        );
        assert_eq!(
            parse_iso8601("2025-01-01T10:00"),
            Err(ParseError::Syntax { position: 16, expected: "':' after minute" })
        );
        assert_eq!(
            parse_iso8601("2025-01-01T10:00:00Z"),
            Err(ParseError::TrailingInput { position: 19 })
        );
        assert_eq!(
            parse_iso8601(" 2025-01-01"),
            Err(ParseError::Syntax { position: 0, expected: "four-digit year" })
        );
        assert!(parse_iso8601("２０２５-01-01").is_err());
    }

    #[test]
    fn test_parse_signed_years() {
        let dt = parse_iso8601("-0044-03-15T12:00:00").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (-44, 3, 15));
        assert_eq!(parse_iso8601("+12345-01-01").unwrap().year(), 12345);
        assert_eq!(parse_iso8601("-0000-01-01").unwrap().year(), 0);
        assert_eq!(
            parse_iso8601("-44-03-15"),
            Err(ParseError::Syntax { position: 3, expected: "at least four year digits after sign" })
        );
        assert_eq!(parse_iso8601("+1500001970-01-01").unwrap().year(), 1_500_001_970);
        assert_eq!(
            parse_iso8601("+1234567890123-01-01"),
            Err(ParseError::Syntax { position: 1, expected: "year within twelve digits" })
        );
    }

    #[test]
    fn test_parse_range_edges() {
        assert_eq!(parse_iso8601("-292277022657-01-27T08:29:52").unwrap(), DateTime::MIN);
        assert_eq!(
            parse_iso8601("+292277026596-12-04T15:30:07.999999999").unwrap(),
            DateTime::MAX
        );
        assert_eq!(
            parse_iso8601("+292277026596-12-04T15:30:08"),
            Err(ParseError::Invalid(DateTimeError::OutOfRange))
        );
        assert_eq!(
            parse_iso8601("+999999999999-01-01"),
            Err(ParseError::Invalid(DateTimeError::OutOfRange))
        );
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-02-29").unwrap(), DateTime::from_ymd(2024, 2, 29).unwrap());
        assert!(parse_date("2023-02-29").is_err());
        assert_eq!(
            parse_date("2024-02-29T00:00:00"),
            Err(ParseError::TrailingInput { position: 10 })
        );
    }

    #[test]
    fn test_parse_time() {
        let dt = parse_time("14:30:05.25").unwrap();
        assert_eq!(dt, DateTime::new(1970, 1, 1, 14, 30, 5, 250_000_000).unwrap());
        assert_eq!(
            parse_time("23:59:60"),
            Err(ParseError::Invalid(DateTimeError::InvalidSecond(60)))
        );
        assert!(parse_time("2025-01-01").is_err());
        assert_eq!(parse_time(""), Err(ParseError::Empty));
    }
}
