//! Booking ledger: class session storage and the raw conflict query.
//!
//! # Responsibility
//! - Append class sessions and answer exact-slot conflict lookups.
//!
//! # Invariants
//! - `find_conflict` matches `(teacher_id, date, time)` by exact equality;
//!   there is no interval or overlap reasoning.
//! - `insert_session` appends unconditionally. The no-double-booking rule is
//!   enforced by `Scheduler`, which runs both calls in one transaction.

use crate::model::id::{SessionId, TeacherId};
use crate::model::session::{ClassSession, NewClassSession};
use crate::repo::RepoResult;
use rusqlite::{params, Connection, Row};

const SESSION_SELECT_SQL: &str = "SELECT
    id,
    student_id,
    teacher_id,
    date,
    time,
    subject
FROM classes";

/// Repository interface for booked class sessions.
pub trait BookingLedger {
    fn find_conflict(
        &self,
        teacher_id: TeacherId,
        date: &str,
        time: &str,
    ) -> RepoResult<Option<ClassSession>>;
    fn insert_session(&self, session: &NewClassSession) -> RepoResult<SessionId>;
    fn get_session(&self, id: SessionId) -> RepoResult<Option<ClassSession>>;
    fn list_sessions(&self) -> RepoResult<Vec<ClassSession>>;
}

/// SQLite-backed booking ledger.
pub struct SqliteBookingLedger<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookingLedger<'conn> {
    /// Wraps a migrated connection (or an open transaction via deref).
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BookingLedger for SqliteBookingLedger<'_> {
    fn find_conflict(
        &self,
        teacher_id: TeacherId,
        date: &str,
        time: &str,
    ) -> RepoResult<Option<ClassSession>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SESSION_SELECT_SQL}
             WHERE teacher_id = ?1
               AND date = ?2
               AND time = ?3
             ORDER BY id ASC
             LIMIT 1;"
        ))?;
        let mut rows = stmt.query(params![teacher_id, date, time])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_session_row(row)?)),
            None => Ok(None),
        }
    }

    fn insert_session(&self, session: &NewClassSession) -> RepoResult<SessionId> {
        self.conn.execute(
            "INSERT INTO classes (
                student_id,
                teacher_id,
                date,
                time,
                subject
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                session.student_id,
                session.teacher_id,
                session.date.as_str(),
                session.time.as_str(),
                session.subject.as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_session(&self, id: SessionId) -> RepoResult<Option<ClassSession>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SESSION_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_session_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_sessions(&self) -> RepoResult<Vec<ClassSession>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SESSION_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut sessions = Vec::new();
        while let Some(row) = rows.next()? {
            sessions.push(parse_session_row(row)?);
        }
        Ok(sessions)
    }
}

fn parse_session_row(row: &Row<'_>) -> RepoResult<ClassSession> {
    Ok(ClassSession {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        teacher_id: row.get("teacher_id")?,
        date: row.get("date")?,
        time: row.get("time")?,
        subject: row.get("subject")?,
    })
}
