//! SQLite bootstrap for the database-backed todo store.
//!
//! # Responsibility
//! - Open connections with `foreign_keys=ON`; deleting a `todolists` row
//!   relies on it to cascade into `todos`, and owner columns rely on it to
//!   reject rows for unregistered usernames.
//! - Bring the `users`/`todolists`/`todos` schema up to date before any store
//!   touches it.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A database stamped by a newer binary is refused rather than downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the todo database.
#[derive(Debug)]
pub enum DbError {
    /// Driver-level failure, including constraint violations raised by the
    /// todo schema (unique titles, owner foreign keys).
    Sqlite(rusqlite::Error),
    /// The file was migrated by a newer build than this one.
    UnsupportedSchemaVersion { db_version: u32, latest_supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "todo database is at schema version {db_version}; this build supports up to {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
