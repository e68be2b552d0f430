//! Core persistence for personal todo lists.
//! This crate owns the store contract, both backends, and the shared ordering.

pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod sort;

pub use auth::{create_user, hash_password, is_authorized_user, verify_password, AuthError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::todo::{
    validate_title, TitleValidationError, Todo, TodoId, TodoList, TodoListId, MAX_TITLE_CHARS,
};
pub use repo::session_store::{SessionData, SessionTodoStore};
pub use repo::sqlite_store::SqliteTodoStore;
pub use repo::todo_store::{RepoError, RepoResult, TodoStore};
pub use service::todo_service::{
    ServiceResult, TodoListSummary, TodoService, TodoServiceError,
};
pub use sort::{compare_titles, sort_todo_lists, sort_todos, sorted_todos};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
