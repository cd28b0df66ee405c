//! String-keyed slot storage used by the persistence adapter.
//!
//! # Responsibility
//! - Define the minimal get/put contract task persistence depends on.
//! - Provide a SQLite-backed store for devices and an in-memory store for
//!   tests and previews.
//!
//! # Invariants
//! - `put` replaces the whole value atomically; readers never observe a
//!   partially written value.
//! - `get` returns `None` for a slot that was never written.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::InMemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

pub type KvResult<T> = Result<T, KvError>;

#[derive(Debug)]
pub enum KvError {
    Db(DbError),
    /// Failure reported by a non-SQLite backend.
    Backend(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "key-value backend error: {message}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Namespaced string slots with whole-value replace semantics.
pub trait KeyValueStore {
    fn get(&self, namespace: &str, key: &str) -> KvResult<Option<String>>;
    fn put(&mut self, namespace: &str, key: &str, value: &str) -> KvResult<()>;
    fn remove(&mut self, namespace: &str, key: &str) -> KvResult<()>;
}
