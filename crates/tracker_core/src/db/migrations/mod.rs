//! Schema versions of the roster database.
//!
//! # Invariants
//! - Versions are listed in increasing order and never renumbered.
//! - The applied version is mirrored to `PRAGMA user_version`.
//! - Pending migrations run inside one transaction.

use rusqlite::Connection;

/// `(version, sql)` pairs, oldest first.
const MIGRATIONS: &[(u32, &str)] = &[(1, include_str!("0001_roster.sql"))];

/// What bootstrapping found in `PRAGMA user_version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    Current(u32),
    Upgraded { from: u32, to: u32 },
    /// Left untouched; the caller must refuse the database.
    TooNew { found: u32, supported: u32 },
}

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |(version, _)| *version)
}

/// Brings the schema up to [`latest_version`] unless it is already newer.
pub fn apply_migrations(conn: &mut Connection) -> rusqlite::Result<SchemaStatus> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    let supported = latest_version();

    if found > supported {
        return Ok(SchemaStatus::TooNew { found, supported });
    }
    if found == supported {
        return Ok(SchemaStatus::Current(found));
    }

    let tx = conn.transaction()?;
    for (version, sql) in MIGRATIONS.iter().filter(|(version, _)| *version > found) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", *version)?;
    }
    tx.commit()?;

    Ok(SchemaStatus::Upgraded {
        from: found,
        to: supported,
    })
}
