//! Embedded schema for users, todo lists and todos.
//!
//! # Responsibility
//! - `0001_init.sql`: `users` keyed by username, `todolists` unique on
//!   `(username, title)`, `todos` cascading from their list.
//! - Apply every pending script inside one transaction.
//!
//! # Invariants
//! - Script versions increase strictly; `PRAGMA user_version` records the last
//!   one applied.
//! - A failed script leaves the database at its previous version.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const SCRIPTS: &[(u32, &str)] = &[(1, include_str!("0001_init.sql"))];

/// Returns the schema version this build migrates to.
pub fn latest_version() -> u32 {
    SCRIPTS.last().map_or(0, |(version, _)| *version)
}

/// Brings the todo schema on `conn` up to [`latest_version`].
///
/// # Errors
/// - [`DbError::UnsupportedSchemaVersion`] when the database is ahead of this
///   build.
/// - [`DbError::Sqlite`] when a script fails; nothing from the batch is kept.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();

    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }
    if from_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in SCRIPTS.iter().filter(|(version, _)| *version > from_version) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={from_version} to_version={latest}");
    Ok(())
}
