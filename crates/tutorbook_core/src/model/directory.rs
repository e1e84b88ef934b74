//! Student and teacher records held by the directory store.

use crate::model::id::{StudentId, TeacherId};
use serde::{Deserialize, Serialize};

/// Display marker for a student without recorded learning needs.
pub const NO_SPECIAL_NEEDS: &str = "none";

/// A student who can be booked into class sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    /// Stored verbatim; empty input is kept as-is.
    pub special_needs: Option<String>,
}

impl Student {
    /// Returns learning needs for display, or `"none"` when blank.
    ///
    /// Normalization happens here only; storage keeps the original text.
    pub fn special_needs_display(&self) -> &str {
        match self.special_needs.as_deref().map(str::trim) {
            Some(needs) if !needs.is_empty() => needs,
            _ => NO_SPECIAL_NEEDS,
        }
    }
}

/// A teacher whose time can be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    /// Advisory free text (e.g. "Mon-Fri 10-12"). Never parsed or enforced.
    pub available_slots: String,
}
