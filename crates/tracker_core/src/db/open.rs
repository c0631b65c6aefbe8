//! Connection bootstrap for the tracker database.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.

use super::migrations::{apply_migrations, SchemaStatus};
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const IN_MEMORY: &str = ":memory:";

/// Opens the tracker database file, creating it when missing, and migrates it.
///
/// Failures carry the file path so startup can report them as-is.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let location = path.as_ref().display().to_string();
    open_with(&location, || Connection::open(path))
}

/// Opens a migrated in-memory database. Contents vanish with the connection.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with(IN_MEMORY, Connection::open_in_memory)
}

fn open_with(
    location: &str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = if location == IN_MEMORY { "memory" } else { "file" };
    info!("event=db_open module=db status=start mode={mode}");

    let result = connect()
        .map_err(|source| DbError::Open {
            location: location.to_string(),
            source,
        })
        .and_then(|mut conn| bootstrap_connection(&mut conn, location).map(|()| conn));

    match &result {
        Ok(_) => info!(
            "event=db_open module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => {
            let error_code = match err {
                DbError::SchemaTooNew { .. } => "db_schema_too_new",
                DbError::Open { .. } | DbError::Query(_) => "db_open_failed",
            };
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code={error_code} error={err}",
                started_at.elapsed().as_millis()
            );
        }
    }
    result
}

fn bootstrap_connection(conn: &mut Connection, location: &str) -> DbResult<()> {
    let open_failed = |source: rusqlite::Error| DbError::Open {
        location: location.to_string(),
        source,
    };

    conn.pragma_update(None, "foreign_keys", true)
        .map_err(open_failed)?;
    conn.busy_timeout(Duration::from_secs(5))
        .map_err(open_failed)?;

    match apply_migrations(conn).map_err(open_failed)? {
        SchemaStatus::TooNew { found, supported } => Err(DbError::SchemaTooNew {
            location: location.to_string(),
            found,
            supported,
        }),
        SchemaStatus::Upgraded { from, to } => {
            info!("event=db_migrate module=db status=ok from_version={from} to_version={to}");
            Ok(())
        }
        SchemaStatus::Current(_) => Ok(()),
    }
}
