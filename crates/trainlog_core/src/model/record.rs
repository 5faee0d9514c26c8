//! Training record domain model.
//!
//! # Responsibility
//! - Define the canonical date + distance entry kept by the record store.
//! - Parse and validate user-entered distance text.
//!
//! # Invariants
//! - `id` is stable for the record lifetime and never nil.
//! - `count` is finite and strictly positive.
//! - Merging adds to `count` in place; identity never changes.

use crate::model::date::CalendarDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a training record.
pub type RecordId = Uuid;

/// Reason a distance text was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountParseError {
    /// Input is empty after trimming.
    Empty,
    /// Input is not a decimal number.
    NotANumber,
    /// Input parsed to NaN or an infinity.
    NotFinite,
    /// Input is exactly zero.
    ///
    /// A zero-distance entry is treated as invalid input rather than a valid
    /// empty training day.
    Zero,
    Negative,
}

impl Display for CountParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "distance is required"),
            Self::NotANumber => write!(f, "distance must be a number"),
            Self::NotFinite => write!(f, "distance must be a finite number"),
            Self::Zero => write!(f, "distance must not be zero"),
            Self::Negative => write!(f, "distance must be positive"),
        }
    }
}

impl Error for CountParseError {}

/// Accumulated training distance in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Distance(f64);

impl Distance {
    /// Wraps a raw value after applying the same checks as `parse`.
    pub fn new(value: f64) -> Result<Self, CountParseError> {
        if !value.is_finite() {
            return Err(CountParseError::NotFinite);
        }
        if value == 0.0 {
            return Err(CountParseError::Zero);
        }
        if value < 0.0 {
            return Err(CountParseError::Negative);
        }
        Ok(Self(value))
    }

    /// Parses user-entered distance text such as `5`, `12.5` or ` 3 `.
    pub fn parse(text: &str) -> Result<Self, CountParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CountParseError::Empty);
        }
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| CountParseError::NotANumber)?;
        Self::new(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Distance {
    /// Sums two distances, rejecting a total that is no longer finite.
    pub fn checked_add(self, rhs: Self) -> Result<Self, CountParseError> {
        Self::new(self.0 + rhs.0)
    }
}

impl TryFrom<f64> for Distance {
    type Error = CountParseError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Distance> for f64 {
    fn from(value: Distance) -> Self {
        value.0
    }
}

/// Shortest decimal form: `8` rather than `8.0`, `2.5` as is.
impl Display for Distance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structural validation failures for a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    NilId,
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "record id must not be nil"),
        }
    }
}

impl Error for RecordValidationError {}

/// One date + distance entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecordWire")]
pub struct Record {
    pub id: RecordId,
    /// Uniqueness key within a store.
    pub date: CalendarDate,
    pub count: Distance,
}

#[derive(Deserialize)]
struct RecordWire {
    id: RecordId,
    date: CalendarDate,
    count: Distance,
}

impl TryFrom<RecordWire> for Record {
    type Error = RecordValidationError;

    fn try_from(value: RecordWire) -> Result<Self, Self::Error> {
        Self::with_id(value.id, value.date, value.count)
    }
}

impl Record {
    /// Creates a record with a freshly generated id.
    pub fn new(date: CalendarDate, count: Distance) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            count,
        }
    }

    /// Creates a record with a caller-provided id.
    pub fn with_id(
        id: RecordId,
        date: CalendarDate,
        count: Distance,
    ) -> Result<Self, RecordValidationError> {
        let record = Self { id, date, count };
        record.validate()?;
        Ok(record)
    }

    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.id.is_nil() {
            return Err(RecordValidationError::NilId);
        }
        Ok(())
    }

    /// Adds `extra` to this record's distance.
    ///
    /// On overflow the record keeps its previous distance.
    pub fn merge(&mut self, extra: Distance) -> Result<(), CountParseError> {
        self.count = self.count.checked_add(extra)?;
        Ok(())
    }

    /// Date text exactly as displayed in the record list.
    pub fn display_date(&self) -> String {
        self.date.format()
    }
}

#[cfg(test)]
mod tests {
    use super::{CountParseError, Distance};

    #[test]
    fn parse_accepts_decimals_and_whitespace() {
        assert_eq!(Distance::parse(" 12.5 ").unwrap().value(), 12.5);
        assert_eq!(Distance::parse("7").unwrap().value(), 7.0);
    }

    #[test]
    fn parse_rejects_zero_in_any_spelling() {
        for text in ["0", "0.0", "-0", "00"] {
            assert_eq!(Distance::parse(text).unwrap_err(), CountParseError::Zero, "{text}");
        }
    }

    #[test]
    fn parse_rejects_non_numbers() {
        assert_eq!(Distance::parse("").unwrap_err(), CountParseError::Empty);
        assert_eq!(Distance::parse("   ").unwrap_err(), CountParseError::Empty);
        assert_eq!(Distance::parse("five").unwrap_err(), CountParseError::NotANumber);
        assert_eq!(Distance::parse("5km").unwrap_err(), CountParseError::NotANumber);
        assert_eq!(Distance::parse("NaN").unwrap_err(), CountParseError::NotFinite);
        assert_eq!(Distance::parse("inf").unwrap_err(), CountParseError::NotFinite);
        assert_eq!(Distance::parse("-3").unwrap_err(), CountParseError::Negative);
    }

    #[test]
    fn checked_add_rejects_overflow_to_infinity() {
        let big = Distance::parse("1e308").unwrap();
        assert_eq!(big.checked_add(big).unwrap_err(), CountParseError::NotFinite);
        assert_eq!(
            Distance::parse("2.5")
                .unwrap()
                .checked_add(Distance::parse("0.5").unwrap())
                .unwrap()
                .value(),
            3.0
        );
    }

    #[test]
    fn display_drops_trailing_zero_fraction() {
        assert_eq!(Distance::parse("8").unwrap().to_string(), "8");
        assert_eq!(Distance::parse("2.50").unwrap().to_string(), "2.5");
    }
}
