//! Whole-collection task snapshot persistence.
//!
//! # Responsibility
//! - Serialize the full ordered task list into one JSON text slot.
//! - Read that slot back into an ordered task list.
//!
//! # Invariants
//! - Every save fully overwrites the previous snapshot; there are no deltas.
//! - Load preserves stored order exactly.
//! - An absent slot is a first run and loads as an empty list.

use crate::kv::{KeyValueStore, KvError};
use crate::model::task::Task;
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Namespace the app has always stored tasks under.
pub const DEFAULT_TASKS_NAMESPACE: &str = "TaskPrefs";
/// Slot key within [`DEFAULT_TASKS_NAMESPACE`].
pub const DEFAULT_TASKS_KEY: &str = "tasks_key";

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure while reading or writing the task snapshot.
#[derive(Debug)]
pub enum RepoError {
    Storage(KvError),
    Encode(serde_json::Error),
    Decode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "task storage failed: {err}"),
            Self::Encode(err) => write!(f, "failed to encode task snapshot: {err}"),
            Self::Decode(err) => write!(f, "invalid persisted task snapshot: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
        }
    }
}

impl From<KvError> for RepoError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}

/// Persistence adapter bound to one fixed key-value slot.
pub struct TaskRepository<S: KeyValueStore> {
    store: S,
    namespace: String,
    key: String,
}

impl<S: KeyValueStore> TaskRepository<S> {
    /// Uses the default `TaskPrefs` / `tasks_key` slot.
    pub fn new(store: S) -> Self {
        Self::with_slot(store, DEFAULT_TASKS_NAMESPACE, DEFAULT_TASKS_KEY)
    }

    pub fn with_slot(store: S, namespace: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            key: key.into(),
        }
    }

    /// Replaces the stored snapshot with `tasks`.
    ///
    /// # Errors
    /// - `RepoError::Encode` if serialization fails.
    /// - `RepoError::Storage` if the underlying write fails; the previous
    ///   snapshot is left intact in that case.
    pub fn save_tasks(&mut self, tasks: &[Task]) -> RepoResult<()> {
        let started_at = Instant::now();
        let json = serde_json::to_string(tasks).map_err(RepoError::Encode)?;

        if let Err(err) = self.store.put(&self.namespace, &self.key, &json) {
            error!(
                "event=tasks_save module=repo status=error count={} duration_ms={} error={}",
                tasks.len(),
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }

        debug!(
            "event=tasks_save module=repo status=ok count={} bytes={} duration_ms={}",
            tasks.len(),
            json.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    /// Reads the stored snapshot.
    ///
    /// # Errors
    /// - `RepoError::Storage` if the slot cannot be read.
    /// - `RepoError::Decode` if the stored text is not a valid task list.
    pub fn load_tasks(&self) -> RepoResult<Vec<Task>> {
        let Some(json) = self.store.get(&self.namespace, &self.key)? else {
            debug!("event=tasks_load module=repo status=ok source=empty count=0");
            return Ok(Vec::new());
        };

        let tasks: Vec<Task> = serde_json::from_str(&json).map_err(RepoError::Decode)?;
        debug!(
            "event=tasks_load module=repo status=ok source=snapshot count={}",
            tasks.len()
        );
        Ok(tasks)
    }

    /// Drops the stored snapshot so the next load behaves like a first run.
    pub fn clear(&mut self) -> RepoResult<()> {
        self.store.remove(&self.namespace, &self.key)?;
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::{RepoError, TaskRepository, DEFAULT_TASKS_KEY, DEFAULT_TASKS_NAMESPACE};
    use crate::kv::{InMemoryKeyValueStore, KeyValueStore};
    use crate::model::task::Task;

    #[test]
    fn load_without_snapshot_is_empty() {
        let repo = TaskRepository::new(InMemoryKeyValueStore::new());
        assert!(repo.load_tasks().unwrap().is_empty());
    }

    #[test]
    fn snapshot_uses_camel_case_fields_in_default_slot() {
        let mut repo = TaskRepository::new(InMemoryKeyValueStore::new());
        repo.save_tasks(&[Task::new(1, "A", "d1").toggled_favourite()])
            .unwrap();

        let raw = repo
            .store()
            .get(DEFAULT_TASKS_NAMESPACE, DEFAULT_TASKS_KEY)
            .unwrap()
            .expect("snapshot should be written");
        assert_eq!(
            raw,
            r#"[{"id":1,"title":"A","description":"d1","isCompleted":false,"isFavourite":true}]"#
        );
    }

    #[test]
    fn corrupt_snapshot_is_a_decode_error() {
        let mut store = InMemoryKeyValueStore::new();
        store
            .put(DEFAULT_TASKS_NAMESPACE, DEFAULT_TASKS_KEY, "{not json")
            .unwrap();
        let repo = TaskRepository::new(store);

        assert!(matches!(repo.load_tasks(), Err(RepoError::Decode(_))));
    }

    #[test]
    fn clear_returns_to_first_run_state() {
        let mut repo = TaskRepository::new(InMemoryKeyValueStore::new());
        repo.save_tasks(&[Task::new(1, "A", "d1")]).unwrap();
        repo.clear().unwrap();
        assert!(repo.load_tasks().unwrap().is_empty());
    }
}
