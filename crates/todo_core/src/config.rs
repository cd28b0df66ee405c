//! Task store configuration.
//!
//! Defaults reproduce the storage slot used by every earlier app build.

use crate::repo::task_repo::{DEFAULT_TASKS_KEY, DEFAULT_TASKS_NAMESPACE};

/// How `TaskStore::add_task` picks the id of a new task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdPolicy {
    /// One past the highest id seen in the snapshot or issued this session.
    #[default]
    Monotonic,
    /// `collection length + 1`. Collides with live ids after a deletion;
    /// only useful to reproduce snapshots written by older builds.
    CollectionLength,
}

/// What mutations do when their target task is not in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingTaskPolicy {
    /// Return `Ok(())` without touching memory or storage.
    #[default]
    Ignore,
    /// Return `StoreError::TaskNotFound`.
    Report,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStoreConfig {
    pub namespace: String,
    pub key: String,
    pub id_policy: IdPolicy,
    pub missing_task_policy: MissingTaskPolicy,
}

impl Default for TaskStoreConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_TASKS_NAMESPACE.to_string(),
            key: DEFAULT_TASKS_KEY.to_string(),
            id_policy: IdPolicy::default(),
            missing_task_policy: MissingTaskPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IdPolicy, MissingTaskPolicy, TaskStoreConfig};

    #[test]
    fn default_config_targets_legacy_slot() {
        let config = TaskStoreConfig::default();
        assert_eq!(config.namespace, "TaskPrefs");
        assert_eq!(config.key, "tasks_key");
        assert_eq!(config.id_policy, IdPolicy::Monotonic);
        assert_eq!(config.missing_task_policy, MissingTaskPolicy::Ignore);
    }
}
