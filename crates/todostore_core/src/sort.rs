//! Shared ordering for lists and todos.
//!
//! # Responsibility
//! - Order todo lists and todos for display, identically for every backend.
//!
//! # Invariants
//! - Incomplete entries always precede complete ones.
//! - Within each bucket, titles ascend case-insensitively.
//! - Sorting is stable: equal titles keep their input order.

use crate::model::todo::{Todo, TodoList};
use std::cmp::Ordering;

/// Compares two titles alphabetically, ignoring case.
pub fn compare_titles(left: &str, right: &str) -> Ordering {
    left.to_lowercase().cmp(&right.to_lowercase())
}

/// Orders lists: incomplete lists first, then done lists, each by title.
pub fn sort_todo_lists(mut lists: Vec<TodoList>) -> Vec<TodoList> {
    lists.sort_by(|left, right| {
        left.is_done()
            .cmp(&right.is_done())
            .then_with(|| compare_titles(&left.title, &right.title))
    });
    lists
}

/// Orders todos: undone todos first, then done todos, each by title.
pub fn sort_todos(mut todos: Vec<Todo>) -> Vec<Todo> {
    todos.sort_by(|left, right| {
        left.done
            .cmp(&right.done)
            .then_with(|| compare_titles(&left.title, &right.title))
    });
    todos
}

/// Returns a sorted copy of the todos of `list`.
pub fn sorted_todos(list: &TodoList) -> Vec<Todo> {
    sort_todos(list.todos.clone())
}
