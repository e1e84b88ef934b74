//! Directory use-case service.
//!
//! # Responsibility
//! - Provide add/list/get entry points for students and teachers.
//! - Map storage failures to `DirectoryError::StorageUnavailable`.
//!
//! # Invariants
//! - Creation always succeeds for any text input; storage is the only
//!   failure source.

use crate::model::directory::{Student, Teacher};
use crate::model::id::{parse_record_id, StudentId, TeacherId};
use crate::repo::directory_repo::DirectoryRepository;
use crate::repo::RepoError;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from directory and study plan use-cases.
#[derive(Debug)]
pub enum DirectoryError {
    /// Identifier text is not a positive integer.
    InvalidReference(String),
    /// No student has the given identifier.
    StudentNotFound(StudentId),
    /// Storage failed; not retried here.
    StorageUnavailable(RepoError),
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidReference(value) => {
                write!(f, "invalid student id `{value}`; expected a positive integer")
            }
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::StorageUnavailable(err) => write!(f, "storage unavailable: {err}"),
        }
    }
}

impl Error for DirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for DirectoryError {
    fn from(value: RepoError) -> Self {
        Self::StorageUnavailable(value)
    }
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Use-case service over a directory repository.
pub struct DirectoryService<R: DirectoryRepository> {
    repo: R,
}

impl<R: DirectoryRepository> DirectoryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a student and returns the freshly assigned identifier.
    ///
    /// `special_needs` is stored exactly as given, including empty text.
    pub fn add_student(
        &self,
        name: &str,
        special_needs: Option<&str>,
    ) -> DirectoryResult<StudentId> {
        let result = self.repo.add_student(name, special_needs);
        log_create("student_add", &result);
        Ok(result?)
    }

    /// Adds a teacher. `available_slots` is advisory text, stored verbatim.
    pub fn add_teacher(&self, name: &str, available_slots: &str) -> DirectoryResult<TeacherId> {
        let result = self.repo.add_teacher(name, available_slots);
        log_create("teacher_add", &result);
        Ok(result?)
    }

    /// Lists students in insertion order. An empty directory is not an error.
    pub fn list_students(&self) -> DirectoryResult<Vec<Student>> {
        Ok(self.repo.list_students()?)
    }

    /// Lists teachers in insertion order.
    pub fn list_teachers(&self) -> DirectoryResult<Vec<Teacher>> {
        Ok(self.repo.list_teachers()?)
    }

    pub fn get_student(&self, id: StudentId) -> DirectoryResult<Option<Student>> {
        Ok(self.repo.get_student(id)?)
    }

    pub fn get_teacher(&self, id: TeacherId) -> DirectoryResult<Option<Teacher>> {
        Ok(self.repo.get_teacher(id)?)
    }

    /// Looks up a student from caller-entered identifier text.
    pub fn find_student(&self, id_text: &str) -> DirectoryResult<Student> {
        let id = parse_record_id(id_text)
            .map_err(|err| DirectoryError::InvalidReference(err.value))?;
        self.repo
            .get_student(id)?
            .ok_or(DirectoryError::StudentNotFound(id))
    }
}

fn log_create(event: &str, result: &Result<i64, RepoError>) {
    match result {
        Ok(id) => info!("event={event} module=directory status=ok id={id}"),
        Err(err) => error!(
            "event={event} module=directory status=error error_code=storage_unavailable error={err}"
        ),
    }
}
