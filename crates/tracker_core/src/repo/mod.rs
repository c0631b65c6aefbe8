//! Repository layer: the single Data Access leaf.
//!
//! # Responsibility
//! - Issue parameterized SQL against `departments`, `roles` and `employees`.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every statement binds user values as parameters, never via formatting.
//! - Repositories do not retry; failures surface as `RepoError::Db`.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod department_repo;
pub mod employee_repo;
pub mod report_repo;
pub mod role_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Query-level failure raised by any repository.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound { entity: &'static str, id: i64 },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
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
        Self::Db(DbError::Query(value))
    }
}

/// Maps "no row changed" to `NotFound` for single-row writes.
pub(crate) fn expect_changed(changed: usize, entity: &'static str, id: i64) -> RepoResult<()> {
    if changed == 0 {
        return Err(RepoError::NotFound { entity, id });
    }
    Ok(())
}

/// Converts a SQLite COUNT result into `u32`.
pub(crate) fn count_to_u32(count: i64, what: &str) -> RepoResult<u32> {
    u32::try_from(count)
        .map_err(|_| RepoError::InvalidData(format!("{what} count out of range: {count}")))
}
