//! Todo list use-case service.
//!
//! # Responsibility
//! - Validate titles before they reach a store.
//! - Turn the store's `false`/`None` misses into typed errors for callers
//!   that need to tell "not found" from "duplicate".
//! - Build the list overview rows (title, done flag, done/total counts).
//!
//! # Invariants
//! - Titles are trimmed and length-checked before any store call.
//! - Service APIs never bypass the [`TodoStore`] contract.
//! - Todos returned by [`TodoService::todo_list`] use the shared ordering for
//!   every backend.

use crate::model::todo::{validate_title, TitleValidationError, TodoId, TodoList, TodoListId};
use crate::repo::todo_store::{RepoError, TodoStore};
use crate::sort::sorted_todos;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for todo list use-cases.
#[derive(Debug)]
pub enum TodoServiceError {
    /// Title is blank or too long.
    InvalidTitle(TitleValidationError),
    /// Another list of this owner already uses the title.
    DuplicateTitle(String),
    /// Target list does not exist for this owner.
    ListNotFound(TodoListId),
    /// Target todo does not exist in the given list.
    TodoNotFound {
        list_id: TodoListId,
        todo_id: TodoId,
    },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TodoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(err) => write!(f, "{err}"),
            Self::DuplicateTitle(title) => write!(f, "list title already in use: `{title}`"),
            Self::ListNotFound(list_id) => write!(f, "todo list not found: {list_id}"),
            Self::TodoNotFound { list_id, todo_id } => {
                write!(f, "todo {todo_id} not found in list {list_id}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TodoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTitle(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TodoServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<TitleValidationError> for TodoServiceError {
    fn from(value: TitleValidationError) -> Self {
        Self::InvalidTitle(value)
    }
}

pub type ServiceResult<T> = Result<T, TodoServiceError>;

/// One row of the list overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListSummary {
    pub id: TodoListId,
    pub title: String,
    pub is_done: bool,
    pub todo_count: usize,
    pub done_count: usize,
}

impl From<&TodoList> for TodoListSummary {
    fn from(list: &TodoList) -> Self {
        Self {
            id: list.id,
            title: list.title.clone(),
            is_done: list.is_done(),
            todo_count: list.todo_count(),
            done_count: list.done_count(),
        }
    }
}

/// Use-case facade over any [`TodoStore`] backend.
pub struct TodoService<S: TodoStore> {
    store: S,
}

impl<S: TodoStore> TodoService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists overview rows, incomplete lists first, then done lists.
    pub fn overview(&self) -> ServiceResult<Vec<TodoListSummary>> {
        let lists = self.store.sorted_todo_lists()?;
        Ok(lists.iter().map(TodoListSummary::from).collect())
    }

    /// Loads one list with its todos in display order.
    pub fn todo_list(&self, list_id: TodoListId) -> ServiceResult<TodoList> {
        let mut list = self
            .store
            .load_todo_list(list_id)?
            .ok_or(TodoServiceError::ListNotFound(list_id))?;
        list.todos = sorted_todos(&list);
        Ok(list)
    }

    /// Creates a list after validating and de-duplicating its title.
    pub fn create_list(&mut self, title: &str) -> ServiceResult<()> {
        let title = validate_title(title)?;
        if self.store.exists_todo_list_title(title)? || !self.store.create_todo_list(title)? {
            return Err(TodoServiceError::DuplicateTitle(title.to_string()));
        }
        Ok(())
    }

    /// Renames a list. Renaming a list to its current title is a no-op success.
    pub fn rename_list(&mut self, list_id: TodoListId, title: &str) -> ServiceResult<()> {
        let title = validate_title(title)?;
        let current = self
            .store
            .load_todo_list(list_id)?
            .ok_or(TodoServiceError::ListNotFound(list_id))?;
        if current.title == title {
            return Ok(());
        }
        if self.store.exists_todo_list_title(title)? {
            return Err(TodoServiceError::DuplicateTitle(title.to_string()));
        }
        if !self.store.rename_todo_list(list_id, title)? {
            return Err(TodoServiceError::ListNotFound(list_id));
        }
        Ok(())
    }

    /// Deletes a list and its todos.
    pub fn delete_list(&mut self, list_id: TodoListId) -> ServiceResult<()> {
        if !self.store.delete_todo_list(list_id)? {
            return Err(TodoServiceError::ListNotFound(list_id));
        }
        Ok(())
    }

    /// Adds an undone todo to a list.
    pub fn add_todo(&mut self, list_id: TodoListId, title: &str) -> ServiceResult<()> {
        let title = validate_title(title)?;
        if !self.store.create_todo(list_id, title)? {
            return Err(TodoServiceError::ListNotFound(list_id));
        }
        Ok(())
    }

    /// Flips the done flag of one todo.
    pub fn toggle_todo(&mut self, list_id: TodoListId, todo_id: TodoId) -> ServiceResult<()> {
        let found = self.store.toggle_todo_done(list_id, todo_id)?;
        todo_found(found, list_id, todo_id)
    }

    /// Sets the done flag of one todo to `done`.
    pub fn set_todo_done(
        &mut self,
        list_id: TodoListId,
        todo_id: TodoId,
        done: bool,
    ) -> ServiceResult<()> {
        let found = if done {
            self.store.mark_todo_done(list_id, todo_id)?
        } else {
            self.store.mark_todo_undone(list_id, todo_id)?
        };
        todo_found(found, list_id, todo_id)
    }

    /// Removes one todo from a list.
    pub fn delete_todo(&mut self, list_id: TodoListId, todo_id: TodoId) -> ServiceResult<()> {
        let found = self.store.delete_todo(list_id, todo_id)?;
        todo_found(found, list_id, todo_id)
    }

    /// Marks every todo of a list done.
    pub fn complete_all(&mut self, list_id: TodoListId) -> ServiceResult<()> {
        if !self.store.complete_all_todos(list_id)? {
            return Err(TodoServiceError::ListNotFound(list_id));
        }
        Ok(())
    }
}

fn todo_found(found: bool, list_id: TodoListId, todo_id: TodoId) -> ServiceResult<()> {
    if found {
        Ok(())
    } else {
        Err(TodoServiceError::TodoNotFound { list_id, todo_id })
    }
}
