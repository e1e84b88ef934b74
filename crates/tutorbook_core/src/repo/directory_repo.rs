//! Directory store: student and teacher records.
//!
//! # Responsibility
//! - Create, list and look up students and teachers.
//!
//! # Invariants
//! - Identifiers come from `AUTOINCREMENT` row ids and are never reused.
//! - Text fields are stored verbatim; nothing is trimmed or validated here.
//! - Listings are in insertion (identifier) order.

use crate::model::directory::{Student, Teacher};
use crate::model::id::{StudentId, TeacherId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const STUDENT_SELECT_SQL: &str = "SELECT id, name, special_needs FROM students";
const TEACHER_SELECT_SQL: &str = "SELECT id, name, available_slots FROM teachers";

/// Repository interface for the student/teacher directory.
pub trait DirectoryRepository {
    fn add_student(&self, name: &str, special_needs: Option<&str>) -> RepoResult<StudentId>;
    fn add_teacher(&self, name: &str, available_slots: &str) -> RepoResult<TeacherId>;
    fn list_students(&self) -> RepoResult<Vec<Student>>;
    fn list_teachers(&self) -> RepoResult<Vec<Teacher>>;
    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>>;
    fn get_teacher(&self, id: TeacherId) -> RepoResult<Option<Teacher>>;
}

/// SQLite-backed directory store.
pub struct SqliteDirectoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDirectoryRepository<'conn> {
    /// Wraps a migrated connection (or an open transaction via deref).
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DirectoryRepository for SqliteDirectoryRepository<'_> {
    fn add_student(&self, name: &str, special_needs: Option<&str>) -> RepoResult<StudentId> {
        self.conn.execute(
            "INSERT INTO students (name, special_needs) VALUES (?1, ?2);",
            params![name, special_needs],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn add_teacher(&self, name: &str, available_slots: &str) -> RepoResult<TeacherId> {
        self.conn.execute(
            "INSERT INTO teachers (name, available_slots) VALUES (?1, ?2);",
            params![name, available_slots],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_students(&self) -> RepoResult<Vec<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }
        Ok(students)
    }

    fn list_teachers(&self) -> RepoResult<Vec<Teacher>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEACHER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut teachers = Vec::new();
        while let Some(row) = rows.next()? {
            teachers.push(parse_teacher_row(row)?);
        }
        Ok(teachers)
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_student_row(row)?)),
            None => Ok(None),
        }
    }

    fn get_teacher(&self, id: TeacherId) -> RepoResult<Option<Teacher>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEACHER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_teacher_row(row)?)),
            None => Ok(None),
        }
    }
}

/// Returns whether a student row with `id` exists.
pub(crate) fn student_exists(conn: &Connection, id: StudentId) -> RepoResult<bool> {
    row_exists(conn, "SELECT 1 FROM students WHERE id = ?1;", id)
}

/// Returns whether a teacher row with `id` exists.
pub(crate) fn teacher_exists(conn: &Connection, id: TeacherId) -> RepoResult<bool> {
    row_exists(conn, "SELECT 1 FROM teachers WHERE id = ?1;", id)
}

fn row_exists(conn: &Connection, sql: &str, id: i64) -> RepoResult<bool> {
    let found = conn
        .query_row(sql, [id], |row| row.get::<_, i64>(0))
        .optional()?;
    Ok(found.is_some())
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let name: Option<String> = row.get("name")?;
    let id: StudentId = row.get("id")?;
    Ok(Student {
        id,
        name: name.ok_or_else(|| {
            RepoError::InvalidData(format!("students.name is NULL for id {id}"))
        })?,
        special_needs: row.get("special_needs")?,
    })
}

fn parse_teacher_row(row: &Row<'_>) -> RepoResult<Teacher> {
    let id: TeacherId = row.get("id")?;
    let name: Option<String> = row.get("name")?;
    let available_slots: Option<String> = row.get("available_slots")?;
    Ok(Teacher {
        id,
        name: name.ok_or_else(|| {
            RepoError::InvalidData(format!("teachers.name is NULL for id {id}"))
        })?,
        available_slots: available_slots.ok_or_else(|| {
            RepoError::InvalidData(format!("teachers.available_slots is NULL for id {id}"))
        })?,
    })
}
