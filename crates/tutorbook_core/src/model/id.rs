//! Record identifiers.
//!
//! Identifiers are SQLite row ids. `AUTOINCREMENT` tables guarantee they grow
//! monotonically and are never handed out twice.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identifier of a `Student` record.
pub type StudentId = i64;
/// Identifier of a `Teacher` record.
pub type TeacherId = i64;
/// Identifier of a `ClassSession` record.
pub type SessionId = i64;

/// Identifier text that cannot name any record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIdError {
    pub value: String,
}

impl Display for InvalidIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid identifier `{}`; expected a positive integer",
            self.value
        )
    }
}

impl Error for InvalidIdError {}

/// Parses caller-supplied identifier text.
///
/// Accepts surrounding whitespace and an optional leading `+`; rejects zero,
/// negatives, overflow and anything non-numeric.
pub fn parse_record_id(value: &str) -> Result<i64, InvalidIdError> {
    let invalid = || InvalidIdError {
        value: value.to_string(),
    };
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    match digits.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(invalid()),
    }
}
