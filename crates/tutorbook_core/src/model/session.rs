//! Booked class session records and scheduling requests.

use crate::model::id::{SessionId, StudentId, TeacherId};
use serde::{Deserialize, Serialize};

/// One booked class between a student and a teacher.
///
/// Created only through `Scheduler::schedule`; never mutated or deleted.
/// `student_id`/`teacher_id` are weak references (lookup-only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSession {
    pub id: SessionId,
    pub student_id: StudentId,
    pub teacher_id: TeacherId,
    /// Canonical `YYYY-MM-DD`.
    pub date: String,
    /// Canonical 24-hour `HH:MM`.
    pub time: String,
    pub subject: String,
}

/// Validated values ready to be appended to the booking ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClassSession {
    pub student_id: StudentId,
    pub teacher_id: TeacherId,
    pub date: String,
    pub time: String,
    pub subject: String,
}

/// Raw booking request as entered by a caller.
///
/// Identifiers, date and time are unparsed text; `Scheduler::schedule` owns
/// validation so malformed input never reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleRequest {
    pub student_id: String,
    pub teacher_id: String,
    pub date: String,
    pub time: String,
    pub subject: String,
}

impl ScheduleRequest {
    pub fn new(
        student_id: impl Into<String>,
        teacher_id: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            teacher_id: teacher_id.into(),
            date: date.into(),
            time: time.into(),
            subject: subject.into(),
        }
    }
}
