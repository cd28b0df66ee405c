//! Session task store.
//!
//! # Responsibility
//! - Own the authoritative in-memory ordered task list for one UI session.
//! - Apply add/update/delete/toggle mutations and snapshot the whole list
//!   after each one.
//! - Answer read-only queries for list and favourites views.
//!
//! # Invariants
//! - Every successful mutation is followed by exactly one `save_tasks` call
//!   with the full resulting collection.
//! - A mutation whose target is missing changes nothing and writes nothing.
//! - `update_task` matches by id; `delete_task` and both toggles match the
//!   first task equal by value.
//! - Storage failures never abort a mutation; memory stays the source of truth.

use crate::config::{IdPolicy, MissingTaskPolicy, TaskStoreConfig};
use crate::kv::{InMemoryKeyValueStore, KeyValueStore};
use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::TaskRepository;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Only returned under `MissingTaskPolicy::Report`.
    TaskNotFound(TaskId),
    /// The id space is used up; no new task can be added.
    IdsExhausted,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::IdsExhausted => write!(f, "no task id left to assign"),
        }
    }
}

impl Error for StoreError {}

/// In-memory task list with write-through snapshot persistence.
pub struct TaskStore<S: KeyValueStore> {
    repo: TaskRepository<S>,
    tasks: Vec<Task>,
    /// `None` once `TaskId::MAX` has been seen or issued.
    next_id: Option<TaskId>,
    id_policy: IdPolicy,
    missing_task_policy: MissingTaskPolicy,
    last_save_error: Option<String>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Loads the stored snapshot and starts a session over it.
    ///
    /// An unreadable or corrupt snapshot is logged and replaced by an empty
    /// list; it is overwritten by the first successful mutation.
    pub fn open(store: S, config: TaskStoreConfig) -> Self {
        let repo = TaskRepository::with_slot(store, config.namespace, config.key);
        let tasks = match repo.load_tasks() {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(
                    "event=store_open module=store status=degraded error_code=load_failed error={}",
                    err
                );
                Vec::new()
            }
        };
        let next_id = tasks
            .iter()
            .map(|task| task.id)
            .max()
            .unwrap_or(0)
            .checked_add(1);
        if next_id.is_none() {
            warn!("event=store_open module=store status=degraded error_code=ids_exhausted");
        }

        info!(
            "event=store_open module=store status=ok count={} id_policy={:?}",
            tasks.len(),
            config.id_policy
        );

        Self {
            repo,
            tasks,
            next_id,
            id_policy: config.id_policy,
            missing_task_policy: config.missing_task_policy,
            last_save_error: None,
        }
    }

    /// Read-only ordered view for display.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Favourite tasks in collection order.
    pub fn favourite_tasks(&self) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.is_favourite)
            .cloned()
            .collect()
    }

    /// Message of the most recent failed snapshot write, if the latest write failed.
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    pub fn repository(&self) -> &TaskRepository<S> {
        &self.repo
    }

    /// Appends a new open, non-favourite task and returns it.
    pub fn add_task(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> StoreResult<Task> {
        let id = self.issue_id()?;
        let task = Task::new(id, title, description);
        self.tasks.push(task.clone());

        info!(
            "event=task_add module=store status=ok task_id={} count={}",
            id,
            self.tasks.len()
        );
        self.persist();
        Ok(task)
    }

    /// Replaces the first task with `updated.id` by `updated`.
    pub fn update_task(&mut self, updated: Task) -> StoreResult<()> {
        let Some(index) = self.tasks.iter().position(|task| task.id == updated.id) else {
            return self.missing("task_update", updated.id);
        };

        let id = updated.id;
        self.tasks[index] = updated;
        info!("event=task_update module=store status=ok task_id={id}");
        self.persist();
        Ok(())
    }

    /// Removes the first task equal to `task`.
    pub fn delete_task(&mut self, task: &Task) -> StoreResult<()> {
        let Some(index) = self.position_of(task) else {
            return self.missing("task_delete", task.id);
        };

        self.tasks.remove(index);
        info!(
            "event=task_delete module=store status=ok task_id={} count={}",
            task.id,
            self.tasks.len()
        );
        self.persist();
        Ok(())
    }

    /// Flips `is_completed` on the first task equal to `task`.
    pub fn toggle_task_completion(&mut self, task: &Task) -> StoreResult<()> {
        self.replace_matching("task_toggle_completion", task, Task::toggled_completion)
    }

    /// Flips `is_favourite` on the first task equal to `task`.
    pub fn toggle_favourite_task(&mut self, task: &Task) -> StoreResult<()> {
        self.replace_matching("task_toggle_favourite", task, Task::toggled_favourite)
    }

    fn replace_matching(
        &mut self,
        event: &str,
        task: &Task,
        change: impl FnOnce(&Task) -> Task,
    ) -> StoreResult<()> {
        let Some(index) = self.position_of(task) else {
            return self.missing(event, task.id);
        };

        self.tasks[index] = change(task);
        info!("event={event} module=store status=ok task_id={}", task.id);
        self.persist();
        Ok(())
    }

    fn position_of(&self, task: &Task) -> Option<usize> {
        self.tasks.iter().position(|candidate| candidate == task)
    }

    fn issue_id(&mut self) -> StoreResult<TaskId> {
        match self.id_policy {
            IdPolicy::Monotonic => {
                let id = self.next_id.ok_or(StoreError::IdsExhausted)?;
                self.next_id = id.checked_add(1);
                Ok(id)
            }
            // Historical snapshots were written this way; ids may repeat.
            IdPolicy::CollectionLength => TaskId::try_from(self.tasks.len())
                .ok()
                .and_then(|len| len.checked_add(1))
                .ok_or(StoreError::IdsExhausted),
        }
    }

    fn missing(&self, event: &str, id: TaskId) -> StoreResult<()> {
        debug!("event={event} module=store status=skipped reason=not_found task_id={id}");
        match self.missing_task_policy {
            MissingTaskPolicy::Ignore => Ok(()),
            MissingTaskPolicy::Report => Err(StoreError::TaskNotFound(id)),
        }
    }

    fn persist(&mut self) {
        match self.repo.save_tasks(&self.tasks) {
            Ok(()) => self.last_save_error = None,
            Err(err) => {
                warn!(
                    "event=store_persist module=store status=degraded error_code=save_failed count={} error={}",
                    self.tasks.len(),
                    err
                );
                self.last_save_error = Some(err.to_string());
            }
        }
    }
}

impl TaskStore<InMemoryKeyValueStore> {
    /// Three sample tasks over throwaway storage, for UI previews.
    pub fn preview() -> Self {
        let mut store = Self::open(InMemoryKeyValueStore::new(), TaskStoreConfig::default());
        store.tasks = (1..=3)
            .map(|n| Task::new(n, format!("Task {n}"), format!("Description {n}")))
            .collect();
        store.next_id = Some(4);
        store.persist();
        store
    }
}
