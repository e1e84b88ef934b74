//! Slot validation for booking requests.
//!
//! # Invariants
//! - Accepted dates are exactly `YYYY-MM-DD` and name a real calendar day.
//! - Accepted times are exactly `HH:MM` on a 24-hour clock.
//! - Accepted text is returned unchanged; conflict checks compare it verbatim.

use chrono::{NaiveDate, NaiveTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Malformed date or time input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    InvalidDate(String),
    InvalidTime(String),
}

impl Display for SlotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidTime(value) => write!(f, "invalid time `{value}`; expected HH:MM"),
        }
    }
}

impl Error for SlotError {}

/// An exact `(date, time)` pair, the unit of conflict comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    pub date: String,
    pub time: String,
}

impl Slot {
    /// Validates date first, then time, and keeps both texts verbatim.
    pub fn parse(date: &str, time: &str) -> Result<Self, SlotError> {
        validate_date(date)?;
        validate_time(time)?;
        Ok(Self {
            date: date.to_string(),
            time: time.to_string(),
        })
    }
}

/// Checks `value` is a canonical ISO calendar date.
pub fn validate_date(value: &str) -> Result<(), SlotError> {
    let invalid = || SlotError::InvalidDate(value.to_string());
    if !has_shape(value, "dddd-dd-dd") {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| invalid())
}

/// Checks `value` is a canonical 24-hour `HH:MM` time of day.
pub fn validate_time(value: &str) -> Result<(), SlotError> {
    let invalid = || SlotError::InvalidTime(value.to_string());
    if !has_shape(value, "dd:dd") {
        return Err(invalid());
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|_| ())
        .map_err(|_| invalid())
}

// `d` in the pattern matches one ASCII digit; other bytes match literally.
fn has_shape(value: &str, pattern: &str) -> bool {
    value.len() == pattern.len()
        && value
            .bytes()
            .zip(pattern.bytes())
            .all(|(actual, expected)| match expected {
                b'd' => actual.is_ascii_digit(),
                other => actual == other,
            })
}
