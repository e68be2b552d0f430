//! Store contract shared by the database and session backends.
//!
//! # Responsibility
//! - Define the one operation set every todo backend implements.
//! - Define the repository error type for infrastructure faults.
//!
//! # Invariants
//! - Missing lists/todos surface as `false` or `None`, never as errors.
//! - Creating or renaming onto an existing title of the same owner returns
//!   `false` and leaves stored data untouched.
//! - Only infrastructure faults (SQLite, corrupt rows, credential hashing)
//!   become `RepoError`.

use crate::auth::AuthError;
use crate::db::DbError;
use crate::model::todo::{Todo, TodoId, TodoList, TodoListId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Infrastructure failure raised by a store backend.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    Credential(AuthError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted todo data: {message}"),
            Self::Credential(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::Credential(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<AuthError> for RepoError {
    fn from(value: AuthError) -> Self {
        Self::Credential(value)
    }
}

/// CRUD and query operations over one owner's todo lists.
///
/// Implementations are picked by the caller at construction time; callers
/// should depend on this trait rather than on a concrete backend.
pub trait TodoStore {
    /// Loads one list with its todos, or `None` when it is not visible.
    fn load_todo_list(&self, list_id: TodoListId) -> RepoResult<Option<TodoList>>;
    /// Loads one todo of one list.
    fn load_todo(&self, list_id: TodoListId, todo_id: TodoId) -> RepoResult<Option<Todo>>;
    /// Returns every list with its todos, incomplete lists first, then done
    /// lists, each group ordered by title.
    fn sorted_todo_lists(&self) -> RepoResult<Vec<TodoList>>;
    /// Flips the done flag of one todo.
    fn toggle_todo_done(&mut self, list_id: TodoListId, todo_id: TodoId) -> RepoResult<bool>;
    fn mark_todo_done(&mut self, list_id: TodoListId, todo_id: TodoId) -> RepoResult<bool>;
    fn mark_todo_undone(&mut self, list_id: TodoListId, todo_id: TodoId) -> RepoResult<bool>;
    fn delete_todo(&mut self, list_id: TodoListId, todo_id: TodoId) -> RepoResult<bool>;
    /// Marks every todo of the list done.
    ///
    /// Returns `true` whenever the list exists, even if nothing changed.
    fn complete_all_todos(&mut self, list_id: TodoListId) -> RepoResult<bool>;
    /// Appends a new undone todo. Returns `false` for an unknown list.
    fn create_todo(&mut self, list_id: TodoListId, title: &str) -> RepoResult<bool>;
    /// Deletes a list together with all of its todos.
    fn delete_todo_list(&mut self, list_id: TodoListId) -> RepoResult<bool>;
    fn rename_todo_list(&mut self, list_id: TodoListId, title: &str) -> RepoResult<bool>;
    /// Returns whether a list with exactly this title exists.
    fn exists_todo_list_title(&self, title: &str) -> RepoResult<bool>;
    /// Creates an empty list. Returns `false` when the title is taken.
    fn create_todo_list(&mut self, title: &str) -> RepoResult<bool>;
}
