//! Task domain model.
//!
//! # Responsibility
//! - Define the single entity rendered by every task list view.
//! - Provide copy-with-change helpers so tasks stay immutable values.
//! - Validate raw user input before it reaches the task store.
//!
//! # Invariants
//! - A `Task` is never mutated in place by core logic; toggles and edits
//!   return a new value that replaces the old one at the same position.
//! - `id` is intended to be unique, but uniqueness is not checked here.
//! - Input validation is an input-layer concern; `TaskStore` accepts any text.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Integer identifier assigned by the task store.
pub type TaskId = i64;

/// One to-do item.
///
/// Serialized with camelCase field names so snapshots written by earlier app
/// builds keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Free text, may span multiple lines.
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_favourite: bool,
}

impl Task {
    /// Creates an open, non-favourite task.
    pub fn new(id: TaskId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            is_completed: false,
            is_favourite: false,
        }
    }

    /// Returns a copy with `is_completed` flipped.
    pub fn toggled_completion(&self) -> Self {
        Self {
            is_completed: !self.is_completed,
            ..self.clone()
        }
    }

    /// Returns a copy with `is_favourite` flipped.
    pub fn toggled_favourite(&self) -> Self {
        Self {
            is_favourite: !self.is_favourite,
            ..self.clone()
        }
    }

    /// Returns a copy with new title and description, keeping id and flags.
    ///
    /// This is the shape produced by the edit dialog before it calls
    /// `TaskStore::update_task`.
    pub fn with_content(&self, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..self.clone()
        }
    }
}

/// Raw title/description pair captured by the add-task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
}

/// Validation errors for user-entered task fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskInputError {
    EmptyTitle,
    EmptyDescription,
}

impl Display for TaskInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::EmptyDescription => write!(f, "task description cannot be empty"),
        }
    }
}

impl Error for TaskInputError {}

impl TaskInput {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Checks that both fields contain non-whitespace text.
    ///
    /// Title is checked first, so a form with both fields blank reports
    /// `EmptyTitle`.
    pub fn validate(&self) -> Result<(), TaskInputError> {
        if self.title.trim().is_empty() {
            return Err(TaskInputError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(TaskInputError::EmptyDescription);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskInput, TaskInputError};

    #[test]
    fn toggles_flip_only_their_flag() {
        let task = Task::new(7, "title", "body");

        let completed = task.toggled_completion();
        assert!(completed.is_completed);
        assert!(!completed.is_favourite);
        assert_eq!(completed.id, 7);

        let favourite = task.toggled_favourite();
        assert!(favourite.is_favourite);
        assert!(!favourite.is_completed);
        assert_eq!(task, Task::new(7, "title", "body"));
    }

    #[test]
    fn with_content_keeps_identity_and_flags() {
        let task = Task::new(3, "old", "old body").toggled_favourite();
        let edited = task.with_content("new", "new body");

        assert_eq!(edited.id, 3);
        assert!(edited.is_favourite);
        assert_eq!(edited.title, "new");
        assert_eq!(edited.description, "new body");
    }

    #[test]
    fn input_validation_rejects_blank_fields() {
        assert_eq!(
            TaskInput::new("  ", "body").validate(),
            Err(TaskInputError::EmptyTitle)
        );
        assert_eq!(
            TaskInput::new("title", "\n\t").validate(),
            Err(TaskInputError::EmptyDescription)
        );
        assert_eq!(
            TaskInput::new("", "").validate(),
            Err(TaskInputError::EmptyTitle)
        );
        assert!(TaskInput::new("title", "line 1\nline 2").validate().is_ok());
    }
}
