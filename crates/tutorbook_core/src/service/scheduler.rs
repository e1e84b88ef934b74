//! Booking use-case: the single entry point that creates class sessions.
//!
//! # Responsibility
//! - Validate slot text and identifier syntax before touching storage.
//! - Enforce "one session per teacher per exact (date, time)".
//!
//! # Invariants
//! - For a fixed `teacher_id`, no two sessions share the same `(date, time)`.
//! - Conflict check and insert run in one `BEGIN IMMEDIATE` transaction, so
//!   concurrent callers on other connections serialize on the write lock.
//! - Every rejected request leaves the store unchanged.
//! - Student double-booking across different teachers is allowed.

use crate::model::id::{parse_record_id, SessionId, StudentId, TeacherId};
use crate::model::session::{ClassSession, NewClassSession, ScheduleRequest};
use crate::model::slot::{Slot, SlotError};
use crate::repo::directory_repo::{student_exists, teacher_exists};
use crate::repo::ledger_repo::{BookingLedger, SqliteBookingLedger};
use crate::repo::{RepoError, RepoResult};
use log::{error, info, warn};
use rusqlite::{Connection, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Which identifier of a request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceField {
    Student,
    Teacher,
}

impl ReferenceField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }
}

/// Outcome of a rejected `schedule` call.
#[derive(Debug)]
pub enum ScheduleError {
    /// Date or time is not in canonical form.
    Format(SlotError),
    /// Identifier text is not a well-formed record id.
    InvalidReference {
        field: ReferenceField,
        value: String,
    },
    /// Referenced record does not exist. Only raised with
    /// `SchedulerOptions::require_existing_references`.
    ReferenceNotFound { field: ReferenceField, id: i64 },
    /// The teacher already has a session at this slot; carries that session.
    Conflict(ClassSession),
    /// Storage failed; not retried here.
    StorageUnavailable(RepoError),
}

impl ScheduleError {
    /// Stable code used in log lines and CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Format(_) => "format_error",
            Self::InvalidReference { .. } => "invalid_reference",
            Self::ReferenceNotFound { .. } => "reference_not_found",
            Self::Conflict(_) => "conflict",
            Self::StorageUnavailable(_) => "storage_unavailable",
        }
    }
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format(err) => write!(f, "{err}"),
            Self::InvalidReference { field, value } => write!(
                f,
                "invalid {} id `{value}`; expected a positive integer",
                field.as_str()
            ),
            Self::ReferenceNotFound { field, id } => {
                write!(f, "{} not found: {id}", field.as_str())
            }
            Self::Conflict(existing) => write!(
                f,
                "teacher {} already has session {} at {} {}",
                existing.teacher_id, existing.id, existing.date, existing.time
            ),
            Self::StorageUnavailable(err) => write!(f, "storage unavailable: {err}"),
        }
    }
}

impl Error for ScheduleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Format(err) => Some(err),
            Self::StorageUnavailable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SlotError> for ScheduleError {
    fn from(value: SlotError) -> Self {
        Self::Format(value)
    }
}

impl From<RepoError> for ScheduleError {
    fn from(value: RepoError) -> Self {
        Self::StorageUnavailable(value)
    }
}

impl From<rusqlite::Error> for ScheduleError {
    fn from(value: rusqlite::Error) -> Self {
        Self::StorageUnavailable(RepoError::from(value))
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Scheduler behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerOptions {
    /// Reject requests whose student or teacher does not exist.
    ///
    /// Off by default: only identifier syntax is checked.
    pub require_existing_references: bool,
}

/// Owns the booking decision for one connection.
pub struct Scheduler<'conn> {
    conn: &'conn mut Connection,
    options: SchedulerOptions,
}

impl<'conn> Scheduler<'conn> {
    pub fn new(conn: &'conn mut Connection, options: SchedulerOptions) -> Self {
        Self { conn, options }
    }

    pub fn options(&self) -> SchedulerOptions {
        self.options
    }

    /// Books a class session if the teacher's slot is free.
    ///
    /// Checks run in order: date/time format, identifier syntax, (optional)
    /// reference existence, slot conflict. The first failure is returned and
    /// nothing is written.
    pub fn schedule(&mut self, request: &ScheduleRequest) -> ScheduleResult<ClassSession> {
        let started_at = Instant::now();
        let result = self.schedule_inner(request);
        let duration_ms = started_at.elapsed().as_millis();

        match &result {
            Ok(session) => info!(
                "event=class_schedule module=scheduler status=ok session_id={} teacher_id={} date={} time={} duration_ms={duration_ms}",
                session.id, session.teacher_id, session.date, session.time
            ),
            Err(ScheduleError::StorageUnavailable(err)) => error!(
                "event=class_schedule module=scheduler status=error duration_ms={duration_ms} error_code=storage_unavailable error={err}"
            ),
            Err(ScheduleError::Conflict(existing)) => warn!(
                "event=class_schedule module=scheduler status=rejected duration_ms={duration_ms} error_code=conflict session_id={} teacher_id={}",
                existing.id, existing.teacher_id
            ),
            Err(err) => warn!(
                "event=class_schedule module=scheduler status=rejected duration_ms={duration_ms} error_code={}",
                err.code()
            ),
        }

        result
    }

    /// Returns the session occupying `teacher_id`'s slot, if any.
    pub fn find_conflict(
        &self,
        teacher_id: TeacherId,
        date: &str,
        time: &str,
    ) -> RepoResult<Option<ClassSession>> {
        self.ledger().find_conflict(teacher_id, date, time)
    }

    pub fn get_session(&self, id: SessionId) -> RepoResult<Option<ClassSession>> {
        self.ledger().get_session(id)
    }

    /// Lists booked sessions in creation order.
    pub fn list_sessions(&self) -> RepoResult<Vec<ClassSession>> {
        self.ledger().list_sessions()
    }

    fn ledger(&self) -> SqliteBookingLedger<'_> {
        SqliteBookingLedger::new(&*self.conn)
    }

    fn schedule_inner(&mut self, request: &ScheduleRequest) -> ScheduleResult<ClassSession> {
        let slot = Slot::parse(&request.date, &request.time)?;
        let student_id: StudentId = parse_reference(ReferenceField::Student, &request.student_id)?;
        let teacher_id: TeacherId = parse_reference(ReferenceField::Teacher, &request.teacher_id)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if self.options.require_existing_references {
            if !student_exists(&tx, student_id)? {
                return Err(ScheduleError::ReferenceNotFound {
                    field: ReferenceField::Student,
                    id: student_id,
                });
            }
            if !teacher_exists(&tx, teacher_id)? {
                return Err(ScheduleError::ReferenceNotFound {
                    field: ReferenceField::Teacher,
                    id: teacher_id,
                });
            }
        }

        let ledger = SqliteBookingLedger::new(&tx);
        if let Some(existing) = ledger.find_conflict(teacher_id, &slot.date, &slot.time)? {
            return Err(ScheduleError::Conflict(existing));
        }

        let new_session = NewClassSession {
            student_id,
            teacher_id,
            date: slot.date,
            time: slot.time,
            subject: request.subject.clone(),
        };
        let id = ledger.insert_session(&new_session)?;
        tx.commit()?;

        Ok(ClassSession {
            id,
            student_id: new_session.student_id,
            teacher_id: new_session.teacher_id,
            date: new_session.date,
            time: new_session.time,
            subject: new_session.subject,
        })
    }
}

fn parse_reference(field: ReferenceField, value: &str) -> ScheduleResult<i64> {
    parse_record_id(value).map_err(|err| ScheduleError::InvalidReference {
        field,
        value: err.value,
    })
}
