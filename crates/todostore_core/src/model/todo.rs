//! Todo list domain model.
//!
//! # Responsibility
//! - Define the list/item records shared by every store backend.
//! - Own the "done list" rule and title validation.
//!
//! # Invariants
//! - A list is done only when it has at least one todo and every todo is done.
//! - New todos start with `done = false`.
//! - Values are plain owned data; stores hand out clones, never references
//!   into their own state.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identifier of a todo list. Database-assigned or generated per session.
pub type TodoListId = i64;

/// Identifier of a todo item.
pub type TodoId = i64;

/// Maximum title length in characters, after trimming.
pub const MAX_TITLE_CHARS: usize = 100;

/// A single todo item owned by exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub done: bool,
}

impl Todo {
    /// Creates a new, not yet completed todo.
    pub fn new(id: TodoId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            done: false,
        }
    }
}

/// A titled, user-owned ordered collection of todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: TodoListId,
    pub title: String,
    #[serde(default)]
    pub todos: Vec<Todo>,
}

impl TodoList {
    /// Creates an empty list.
    pub fn new(id: TodoListId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            todos: Vec::new(),
        }
    }

    /// Returns whether the list is non-empty and every todo is done.
    pub fn is_done(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(|todo| todo.done)
    }

    /// Number of todos in the list.
    pub fn todo_count(&self) -> usize {
        self.todos.len()
    }

    /// Number of completed todos in the list.
    pub fn done_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.done).count()
    }

    pub(crate) fn todo_index(&self, todo_id: TodoId) -> Option<usize> {
        self.todos.iter().position(|todo| todo.id == todo_id)
    }
}

/// Title validation failures for lists and todos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleValidationError {
    /// Title is blank after trim.
    Blank,
    /// Title exceeds [`MAX_TITLE_CHARS`] characters.
    TooLong { chars: usize },
}

impl Display for TitleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank => write!(f, "title must not be blank"),
            Self::TooLong { chars } => write!(
                f,
                "title is {chars} characters long; at most {MAX_TITLE_CHARS} allowed"
            ),
        }
    }
}

impl Error for TitleValidationError {}

/// Trims and validates a list or todo title.
///
/// Returns the trimmed title on success.
///
/// # Errors
/// - [`TitleValidationError::Blank`] when nothing remains after trimming.
/// - [`TitleValidationError::TooLong`] when the trimmed title is over the limit.
pub fn validate_title(title: &str) -> Result<&str, TitleValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TitleValidationError::Blank);
    }
    let chars = trimmed.chars().count();
    if chars > MAX_TITLE_CHARS {
        return Err(TitleValidationError::TooLong { chars });
    }
    Ok(trimmed)
}
