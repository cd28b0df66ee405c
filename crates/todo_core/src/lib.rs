//! Core domain logic for the to-do app.
//! This crate owns task state and its local persistence; UI layers call in
//! through `TaskStore` (directly or via the FFI crate).

pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{IdPolicy, MissingTaskPolicy, TaskStoreConfig};
pub use kv::{InMemoryKeyValueStore, KeyValueStore, KvError, KvResult, SqliteKeyValueStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskInput, TaskInputError};
pub use repo::task_repo::{
    RepoError, RepoResult, TaskRepository, DEFAULT_TASKS_KEY, DEFAULT_TASKS_NAMESPACE,
};
pub use service::task_store::{StoreError, StoreResult, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
