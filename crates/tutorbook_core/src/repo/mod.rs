//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define data access contracts for the directory store and booking ledger.
//! - Isolate SQL details from scheduling and directory use-cases.
//!
//! # Invariants
//! - Repositories are storage primitives: they enforce no booking rules.
//! - Read paths reject malformed persisted rows instead of masking them.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod directory_repo;
pub mod ledger_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure for directory and ledger operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
