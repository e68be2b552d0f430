//! Session-backed todo store.
//!
//! # Responsibility
//! - Implement [`TodoStore`] over the list collection held in a request
//!   session.
//! - Seed demo lists the first time a session is used.
//!
//! # Invariants
//! - The store mutates the caller's [`SessionData`] in place; persisting the
//!   session is the caller's job.
//! - Everything returned is an owned clone, never a view into session state.
//! - Lookups resolve to positions first, mutation happens by position.
//! - Ids are drawn from [`id_gen`](crate::repo::id_gen) above every id already
//!   present in the session.

use crate::model::todo::{Todo, TodoId, TodoList, TodoListId};
use crate::repo::id_gen::{next_id, reserve_through};
use crate::repo::todo_store::{RepoResult, TodoStore};
use crate::sort::sort_todo_lists;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Serializable session payload owned by the surrounding session framework.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todo_lists: Option<Vec<TodoList>>,
}

/// Store over the lists of a single implicit session user.
pub struct SessionTodoStore<'s> {
    todo_lists: &'s mut Vec<TodoList>,
}

impl<'s> SessionTodoStore<'s> {
    /// Binds a store to `session`, seeding demo lists when it has none.
    pub fn new(session: &'s mut SessionData) -> Self {
        let seeded = session.todo_lists.is_none();
        let todo_lists = session.todo_lists.get_or_insert_with(seed_todo_lists);
        reserve_through(max_id(todo_lists));
        if seeded {
            debug!(
                "event=session_seed module=repo backend=session status=ok lists={}",
                todo_lists.len()
            );
        }
        Self { todo_lists }
    }

    fn list_index(&self, list_id: TodoListId) -> Option<usize> {
        self.todo_lists.iter().position(|list| list.id == list_id)
    }

    fn todo_position(&self, list_id: TodoListId, todo_id: TodoId) -> Option<(usize, usize)> {
        let list_index = self.list_index(list_id)?;
        let todo_index = self.todo_lists[list_index].todo_index(todo_id)?;
        Some((list_index, todo_index))
    }

    fn update_todo(
        &mut self,
        list_id: TodoListId,
        todo_id: TodoId,
        update: impl FnOnce(&mut Todo),
    ) -> bool {
        match self.todo_position(list_id, todo_id) {
            Some((list_index, todo_index)) => {
                update(&mut self.todo_lists[list_index].todos[todo_index]);
                true
            }
            None => false,
        }
    }
}

impl TodoStore for SessionTodoStore<'_> {
    fn load_todo_list(&self, list_id: TodoListId) -> RepoResult<Option<TodoList>> {
        Ok(self
            .list_index(list_id)
            .map(|index| self.todo_lists[index].clone()))
    }

    fn load_todo(&self, list_id: TodoListId, todo_id: TodoId) -> RepoResult<Option<Todo>> {
        Ok(self
            .todo_position(list_id, todo_id)
            .map(|(list_index, todo_index)| {
                self.todo_lists[list_index].todos[todo_index].clone()
            }))
    }

    fn sorted_todo_lists(&self) -> RepoResult<Vec<TodoList>> {
        Ok(sort_todo_lists(self.todo_lists.clone()))
    }

    fn toggle_todo_done(&mut self, list_id: TodoListId, todo_id: TodoId) -> RepoResult<bool> {
        Ok(self.update_todo(list_id, todo_id, |todo| todo.done = !todo.done))
    }

    fn mark_todo_done(&mut self, list_id: TodoListId, todo_id: TodoId) -> RepoResult<bool> {
        Ok(self.update_todo(list_id, todo_id, |todo| todo.done = true))
    }

    fn mark_todo_undone(&mut self, list_id: TodoListId, todo_id: TodoId) -> RepoResult<bool> {
        Ok(self.update_todo(list_id, todo_id, |todo| todo.done = false))
    }

    fn delete_todo(&mut self, list_id: TodoListId, todo_id: TodoId) -> RepoResult<bool> {
        let Some((list_index, todo_index)) = self.todo_position(list_id, todo_id) else {
            return Ok(false);
        };
        self.todo_lists[list_index].todos.remove(todo_index);
        Ok(true)
    }

    fn complete_all_todos(&mut self, list_id: TodoListId) -> RepoResult<bool> {
        let Some(index) = self.list_index(list_id) else {
            return Ok(false);
        };
        for todo in &mut self.todo_lists[index].todos {
            todo.done = true;
        }
        Ok(true)
    }

    fn create_todo(&mut self, list_id: TodoListId, title: &str) -> RepoResult<bool> {
        let Some(index) = self.list_index(list_id) else {
            return Ok(false);
        };
        self.todo_lists[index]
            .todos
            .push(Todo::new(next_id(), title));
        Ok(true)
    }

    fn delete_todo_list(&mut self, list_id: TodoListId) -> RepoResult<bool> {
        let Some(index) = self.list_index(list_id) else {
            return Ok(false);
        };
        self.todo_lists.remove(index);
        info!("event=todo_list_delete module=repo backend=session status=ok");
        Ok(true)
    }

    fn rename_todo_list(&mut self, list_id: TodoListId, title: &str) -> RepoResult<bool> {
        let Some(index) = self.list_index(list_id) else {
            return Ok(false);
        };
        let taken_by_other = self
            .todo_lists
            .iter()
            .any(|list| list.id != list_id && list.title == title);
        if taken_by_other {
            info!("event=todo_list_rename module=repo backend=session status=duplicate_title");
            return Ok(false);
        }
        self.todo_lists[index].title = title.to_string();
        Ok(true)
    }

    fn exists_todo_list_title(&self, title: &str) -> RepoResult<bool> {
        Ok(self.todo_lists.iter().any(|list| list.title == title))
    }

    fn create_todo_list(&mut self, title: &str) -> RepoResult<bool> {
        if self.exists_todo_list_title(title)? {
            info!("event=todo_list_create module=repo backend=session status=duplicate_title");
            return Ok(false);
        }
        self.todo_lists.push(TodoList::new(next_id(), title));
        info!("event=todo_list_create module=repo backend=session status=ok");
        Ok(true)
    }
}

fn max_id(lists: &[TodoList]) -> i64 {
    lists
        .iter()
        .flat_map(|list| std::iter::once(list.id).chain(list.todos.iter().map(|todo| todo.id)))
        .max()
        .unwrap_or(0)
}

fn seed_todo_lists() -> Vec<TodoList> {
    let seed: [(&str, &[(&str, bool)]); 4] = [
        (
            "Work Todos",
            &[
                ("Get coffee", true),
                ("Chat with co-workers", true),
                ("Duck out of meeting", false),
            ],
        ),
        (
            "Home Todos",
            &[
                ("Feed the cats", true),
                ("Go to bed", true),
                ("Buy milk", true),
                ("Water the plants", true),
            ],
        ),
        ("Additional Todos", &[]),
        ("social todos", &[("Go to Libby's birthday party", false)]),
    ];

    seed.iter()
        .map(|(title, todos)| {
            let mut list = TodoList::new(next_id(), *title);
            list.todos = todos
                .iter()
                .map(|(todo_title, done)| Todo {
                    id: next_id(),
                    title: (*todo_title).to_string(),
                    done: *done,
                })
                .collect();
            list
        })
        .collect()
}
