//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure the single tracker connection.
//! - Apply schema migrations in deterministic order.
//! - Optionally populate an empty roster with sample rows.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Roster data must not be read or written before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
pub mod seed;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Connection-level failure. Fatal when raised at startup.
#[derive(Debug)]
pub enum DbError {
    /// The database at `location` could not be opened, configured or migrated.
    Open {
        location: String,
        source: rusqlite::Error,
    },
    /// The database at `location` was written by a newer tracker build.
    SchemaTooNew {
        location: String,
        found: u32,
        supported: u32,
    },
    /// A statement failed on an already open connection.
    Query(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { location, source } => {
                write!(f, "unable to open database `{location}`: {source}")
            }
            Self::SchemaTooNew {
                location,
                found,
                supported,
            } => write!(
                f,
                "database `{location}` has schema version {found}; this build supports up to {supported}"
            ),
            Self::Query(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Query(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Query(value)
    }
}
