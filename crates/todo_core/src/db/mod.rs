//! SQLite file that backs the task key-value slots.
//!
//! # Responsibility
//! - Open the database behind `SqliteKeyValueStore`.
//! - Bring its `kv_entries` schema up to date before any slot is touched.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A file written by a newer build is refused instead of being downgraded;
//!   its task snapshot stays readable by that build.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or upgrading the slot database.
#[derive(Debug)]
pub enum DbError {
    /// Connection, pragma or query failure.
    Sqlite(rusqlite::Error),
    /// A migration statement failed; the transaction was rolled back, so the
    /// file keeps its previous schema and snapshot.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file's schema is newer than this build knows.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "slot database error: {err}"),
            Self::Migration { version, source } => {
                write!(f, "slot database migration {version} failed: {source}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "slot database schema {db_version} was written by a newer build (supported up to {latest_supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
