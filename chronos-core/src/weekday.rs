//! Days of the week

use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of the week, Sunday first
///
/// Ordinals run Sunday=0 through Saturday=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Weekday of a day count since 1970-01-01 (a Thursday)
    pub fn from_days_since_epoch(days: i64) -> Self {
        Self::ALL[(days + 4).rem_euclid(7) as usize]
    }

    /// Weekday for an ordinal in 0-6, Sunday=0
    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Ordinal in 0-6, Sunday=0
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    /// ISO 8601 day number in 1-7, Monday=1 and Sunday=7
    pub fn iso_number(self) -> u32 {
        match self {
            Weekday::Sunday => 7,
            other => other.ordinal(),
        }
    }

    /// Following day, wrapping Saturday to Sunday
    pub fn succ(self) -> Self {
        Self::ALL[(self.ordinal() as usize + 1) % 7]
    }

    /// Preceding day, wrapping Sunday to Saturday
    pub fn pred(self) -> Self {
        Self::ALL[(self.ordinal() as usize + 6) % 7]
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    pub fn is_weekday(self) -> bool {
        !self.is_weekend()
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
