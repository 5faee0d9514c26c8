//! Calendar date value and its fixed `DD.MM.YYYY` text form.
//!
//! # Responsibility
//! - Parse user-entered date text under one strict pattern.
//! - Format dates back into the same pattern for display and delete matching.
//!
//! # Invariants
//! - Day is in `1..=31`, month in `1..=12`, year in `1..=9999`.
//! - No per-month day count or leap-year check: `31.02.2024` is a valid value
//!   and is kept as-is, never rolled over into March.
//! - `parse(format(d)) == d` and `format(parse(s)) == s` for accepted `s`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

// ASCII digits only; `\d` would also match non-ASCII decimal digits.
static DATE_PATTERN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2})\.([0-9]{2})\.([0-9]{4})$").expect("valid date pattern regex")
});

const MAX_DAY: u8 = 31;
const MAX_MONTH: u8 = 12;
const MAX_YEAR: u16 = 9999;

/// Reason a date text was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// Text does not match `DD.MM.YYYY` after trimming.
    Pattern,
    DayOutOfRange(u8),
    MonthOutOfRange(u8),
    YearOutOfRange(u16),
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pattern => write!(f, "date must match DD.MM.YYYY"),
            Self::DayOutOfRange(day) => write!(f, "day {day} is outside 1..={MAX_DAY}"),
            Self::MonthOutOfRange(month) => {
                write!(f, "month {month} is outside 1..={MAX_MONTH}")
            }
            Self::YearOutOfRange(year) => write!(f, "year {year} is outside 1..={MAX_YEAR}"),
        }
    }
}

impl Error for DateParseError {}

/// Day/month/year value without time-of-day semantics.
///
/// Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: u16,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Builds a date from components, applying the same range checks as `parse`.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateParseError> {
        if !(1..=MAX_DAY).contains(&day) {
            return Err(DateParseError::DayOutOfRange(day));
        }
        if !(1..=MAX_MONTH).contains(&month) {
            return Err(DateParseError::MonthOutOfRange(month));
        }
        if !(1..=MAX_YEAR).contains(&year) {
            return Err(DateParseError::YearOutOfRange(year));
        }
        Ok(Self { year, month, day })
    }

    /// Parses `DD.MM.YYYY` text, trimming surrounding whitespace first.
    ///
    /// # Errors
    /// - `Pattern` when the trimmed text is not exactly two digits, dot, two
    ///   digits, dot, four digits.
    /// - `DayOutOfRange` / `MonthOutOfRange` / `YearOutOfRange` otherwise.
    pub fn parse(text: &str) -> Result<Self, DateParseError> {
        let captures = DATE_PATTERN_RE
            .captures(text.trim())
            .ok_or(DateParseError::Pattern)?;

        // The regex guarantees short ASCII digit runs, so these cannot overflow.
        let day = captures[1].parse::<u8>().map_err(|_| DateParseError::Pattern)?;
        let month = captures[2]
            .parse::<u8>()
            .map_err(|_| DateParseError::Pattern)?;
        let year = captures[3]
            .parse::<u16>()
            .map_err(|_| DateParseError::Pattern)?;

        Self::new(year, month, day)
    }

    /// Formats as `DD.MM.YYYY`.
    pub fn format(&self) -> String {
        self.to_string()
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// One-based month.
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Zero-based month (`0` = January).
    pub fn month0(&self) -> u8 {
        self.month - 1
    }

    pub fn day(&self) -> u8 {
        self.day
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}.{:02}.{:04}", self.day, self.month, self.year)
    }
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
