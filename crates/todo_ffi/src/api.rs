//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the task store operations to Dart via FRB.
//! - Validate add-form input before it reaches the store.
//! - Keep error semantics simple: envelopes with `ok` + `message`.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - One `TaskStore` session per process; calls are serialized by a mutex.

use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use todo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, SqliteKeyValueStore,
    Task, TaskInput, TaskStore, TaskStoreConfig,
};

const DB_FILE_NAME: &str = "todo_tasks.sqlite3";
const DB_PATH_ENV: &str = "TODO_DB_PATH";

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static SESSION: Mutex<Option<TaskStore<SqliteKeyValueStore>>> = Mutex::new(None);

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task shape exchanged with Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub is_favourite: bool,
}

impl From<Task> for TaskItem {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            is_completed: task.is_completed,
            is_favourite: task.is_favourite,
        }
    }
}

impl From<TaskItem> for Task {
    fn from(item: TaskItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            is_completed: item.is_completed,
            is_favourite: item.is_favourite,
        }
    }
}

/// List response envelope for list and favourites screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    pub ok: bool,
    /// Tasks in display order.
    pub items: Vec<TaskItem>,
    pub message: String,
}

/// Response envelope for mutating calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    pub ok: bool,
    /// Created task for `task_add`; `None` otherwise.
    pub task: Option<TaskItem>,
    /// Human-readable result; mentions a failed save when storage is degraded.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: String, task: Option<TaskItem>) -> Self {
        Self {
            ok: true,
            task,
            message,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task: None,
            message: message.into(),
        }
    }
}

/// Returns all tasks in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_list() -> TaskListResponse {
    list_response("tasks_list", |store| store.tasks().to_vec())
}

/// Returns favourite tasks in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_favourites() -> TaskListResponse {
    list_response("tasks_favourites", |store| store.favourite_tasks())
}

/// Adds a task from the add-task form.
///
/// # FFI contract
/// - Rejects blank title or description without touching the store.
/// - Returns the created task on success.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(title: String, description: String) -> TaskActionResponse {
    let input = TaskInput::new(title, description);
    if let Err(err) = input.validate() {
        return TaskActionResponse::failure(format!("task_add rejected: {err}"));
    }

    let result = with_session(|store| {
        let task = store
            .add_task(input.title, input.description)
            .map_err(|err| err.to_string())?;
        Ok((task, save_note(store)))
    });
    match result {
        Ok((task, note)) => {
            TaskActionResponse::success(format!("Task added.{note}"), Some(task.into()))
        }
        Err(err) => TaskActionResponse::failure(format!("task_add failed: {err}")),
    }
}

/// Saves edits from the edit dialog; matched by task id.
#[flutter_rust_bridge::frb(sync)]
pub fn task_update(task: TaskItem) -> TaskActionResponse {
    mutate("task_update", "Task updated.", |store| {
        store.update_task(task.into())
    })
}

/// Deletes the task equal to `task`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(task: TaskItem) -> TaskActionResponse {
    mutate("task_delete", "Task deleted.", |store| {
        store.delete_task(&task.into())
    })
}

/// Flips completion on the task equal to `task`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle_completion(task: TaskItem) -> TaskActionResponse {
    mutate("task_toggle_completion", "Task completion toggled.", |store| {
        store.toggle_task_completion(&task.into())
    })
}

/// Flips favourite on the task equal to `task`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle_favourite(task: TaskItem) -> TaskActionResponse {
    mutate("task_toggle_favourite", "Task favourite toggled.", |store| {
        store.toggle_favourite_task(&task.into())
    })
}

fn list_response(
    operation: &str,
    f: impl FnOnce(&TaskStore<SqliteKeyValueStore>) -> Vec<Task>,
) -> TaskListResponse {
    match with_session(|store| Ok(f(store))) {
        Ok(tasks) => {
            let items = tasks.into_iter().map(TaskItem::from).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No tasks.".to_string()
            } else {
                format!("{} task(s).", items.len())
            };
            TaskListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => TaskListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("{operation} failed: {err}"),
        },
    }
}

fn mutate(
    operation: &str,
    done: &str,
    f: impl FnOnce(&mut TaskStore<SqliteKeyValueStore>) -> todo_core::StoreResult<()>,
) -> TaskActionResponse {
    let result = with_session(|store| {
        f(store).map_err(|err| err.to_string())?;
        Ok(save_note(store))
    });
    match result {
        Ok(note) => TaskActionResponse::success(format!("{done}{note}"), None),
        Err(err) => TaskActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn save_note(store: &TaskStore<SqliteKeyValueStore>) -> String {
    store
        .last_save_error()
        .map(|err| format!(" Not saved: {err}"))
        .unwrap_or_default()
}

fn with_session<T>(
    f: impl FnOnce(&mut TaskStore<SqliteKeyValueStore>) -> Result<T, String>,
) -> Result<T, String> {
    let mut guard = match SESSION.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("event=ffi_session module=ffi status=recovered reason=poisoned_lock");
            poisoned.into_inner()
        }
    };

    if guard.is_none() {
        let db_path = resolve_db_path();
        let kv = SqliteKeyValueStore::open(&db_path)
            .map_err(|err| format!("task DB open failed: {err}"))?;
        *guard = Some(TaskStore::open(kv, TaskStoreConfig::default()));
    }

    match guard.as_mut() {
        Some(store) => f(store),
        None => Err("task session unavailable".to_string()),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}
