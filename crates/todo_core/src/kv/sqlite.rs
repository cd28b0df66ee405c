//! SQLite-backed key-value store.
//!
//! # Invariants
//! - Each slot is one row in `kv_entries`; `put` is a single upsert statement,
//!   so a slot always holds either the previous or the new value.

use super::{KeyValueStore, KvResult};
use crate::db::{open_db, open_db_in_memory};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Owns a migrated connection and serves `kv_entries` slots.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (or creates) a database file and applies migrations.
    pub fn open(path: impl AsRef<Path>) -> KvResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> KvResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Exposes the underlying connection for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, namespace: &str, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE namespace = ?1 AND key = ?2;",
                params![namespace, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&mut self, namespace: &str, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (namespace, key, value)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (namespace, key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![namespace, key, value],
        )?;
        debug!(
            "event=kv_put module=kv status=ok namespace={namespace} bytes={}",
            value.len()
        );
        Ok(())
    }

    fn remove(&mut self, namespace: &str, key: &str) -> KvResult<()> {
        self.conn.execute(
            "DELETE FROM kv_entries WHERE namespace = ?1 AND key = ?2;",
            params![namespace, key],
        )?;
        Ok(())
    }
}
