//! SQLite-backed todo store scoped to one authenticated user.
//!
//! # Responsibility
//! - Implement [`TodoStore`] over the `todolists` and `todos` tables.
//! - Keep every SQL statement inside the persistence boundary.
//!
//! # Invariants
//! - Every statement binds `username` next to the primary key(s), so rows of
//!   other users are never read or written.
//! - A unique-title violation is reported as `false`; every other SQLite
//!   failure propagates as [`RepoError::Db`].
//! - Todos returned by [`TodoStore::load_todo_list`] are sorted undone first,
//!   then by title.

use crate::auth;
use crate::model::todo::{Todo, TodoId, TodoList, TodoListId};
use crate::repo::todo_store::{RepoError, RepoResult, TodoStore};
use crate::sort::{sort_todo_lists, sort_todos};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;

/// SQLite-backed store for the lists of one user.
pub struct SqliteTodoStore<'conn> {
    conn: &'conn Connection,
    username: String,
}

impl<'conn> SqliteTodoStore<'conn> {
    /// Creates a store bound to `username` on a migrated connection.
    ///
    /// `username` must already exist in `users` (see [`auth::create_user`]);
    /// for an unregistered owner every insert fails with a foreign-key
    /// [`RepoError::Db`] while reads simply come back empty.
    pub fn new(conn: &'conn Connection, username: impl Into<String>) -> Self {
        Self {
            conn,
            username: username.into(),
        }
    }

    /// Username every query of this store is scoped to.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Checks credentials against the `users` table.
    ///
    /// Independent of the user this store is bound to. Returns `false` for an
    /// unknown username without running the hash comparison.
    pub fn is_authorized_user(&self, username: &str, password: &str) -> RepoResult<bool> {
        auth::is_authorized_user(self.conn, username, password)
    }

    fn list_exists(&self, list_id: TodoListId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM todolists WHERE id = ?1 AND username = ?2
            );",
            params![list_id, self.username],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn set_done(&self, list_id: TodoListId, todo_id: TodoId, done: bool) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE todos
             SET done = ?4
             WHERE todolist_id = ?1 AND id = ?2 AND username = ?3;",
            params![list_id, todo_id, self.username, done],
        )?;
        Ok(changed > 0)
    }
}

impl TodoStore for SqliteTodoStore<'_> {
    fn load_todo_list(&self, list_id: TodoListId) -> RepoResult<Option<TodoList>> {
        let found = self
            .conn
            .query_row(
                "SELECT id, title FROM todolists WHERE id = ?1 AND username = ?2;",
                params![list_id, self.username],
                |row| Ok(TodoList::new(row.get("id")?, row.get::<_, String>("title")?)),
            )
            .optional()?;
        let Some(mut list) = found else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT id, title, done
             FROM todos
             WHERE todolist_id = ?1 AND username = ?2
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query(params![list_id, self.username])?;
        let mut todos = Vec::new();
        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }
        list.todos = sort_todos(todos);

        Ok(Some(list))
    }

    fn load_todo(&self, list_id: TodoListId, todo_id: TodoId) -> RepoResult<Option<Todo>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, done
             FROM todos
             WHERE todolist_id = ?1 AND id = ?2 AND username = ?3;",
        )?;
        let mut rows = stmt.query(params![list_id, todo_id, self.username])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_todo_row(row)?));
        }

        Ok(None)
    }

    fn sorted_todo_lists(&self) -> RepoResult<Vec<TodoList>> {
        let mut list_stmt = self
            .conn
            .prepare("SELECT id, title FROM todolists WHERE username = ?1 ORDER BY id ASC;")?;
        let mut lists = Vec::new();
        let mut rows = list_stmt.query([self.username.as_str()])?;
        while let Some(row) = rows.next()? {
            lists.push(TodoList::new(row.get("id")?, row.get::<_, String>("title")?));
        }

        let mut todo_stmt = self.conn.prepare(
            "SELECT id, todolist_id, title, done
             FROM todos
             WHERE username = ?1
             ORDER BY id ASC;",
        )?;
        let mut todos_by_list: HashMap<TodoListId, Vec<Todo>> = HashMap::new();
        let mut rows = todo_stmt.query([self.username.as_str()])?;
        while let Some(row) = rows.next()? {
            let list_id: TodoListId = row.get("todolist_id")?;
            todos_by_list
                .entry(list_id)
                .or_default()
                .push(parse_todo_row(row)?);
        }

        for list in &mut lists {
            list.todos = todos_by_list.remove(&list.id).unwrap_or_default();
        }

        Ok(sort_todo_lists(lists))
    }

    fn toggle_todo_done(&mut self, list_id: TodoListId, todo_id: TodoId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE todos
             SET done = NOT done
             WHERE todolist_id = ?1 AND id = ?2 AND username = ?3;",
            params![list_id, todo_id, self.username],
        )?;
        Ok(changed > 0)
    }

    fn mark_todo_done(&mut self, list_id: TodoListId, todo_id: TodoId) -> RepoResult<bool> {
        self.set_done(list_id, todo_id, true)
    }

    fn mark_todo_undone(&mut self, list_id: TodoListId, todo_id: TodoId) -> RepoResult<bool> {
        self.set_done(list_id, todo_id, false)
    }

    fn delete_todo(&mut self, list_id: TodoListId, todo_id: TodoId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM todos WHERE todolist_id = ?1 AND id = ?2 AND username = ?3;",
            params![list_id, todo_id, self.username],
        )?;
        Ok(changed > 0)
    }

    fn complete_all_todos(&mut self, list_id: TodoListId) -> RepoResult<bool> {
        if !self.list_exists(list_id)? {
            return Ok(false);
        }

        let changed = self.conn.execute(
            "UPDATE todos
             SET done = 1
             WHERE todolist_id = ?1 AND username = ?2 AND done = 0;",
            params![list_id, self.username],
        )?;
        debug!("event=todos_complete_all module=repo backend=sqlite status=ok changed={changed}");
        Ok(true)
    }

    fn create_todo(&mut self, list_id: TodoListId, title: &str) -> RepoResult<bool> {
        // Insert through the owning list row so unknown or foreign lists match nothing.
        let changed = self.conn.execute(
            "INSERT INTO todos (todolist_id, title, done, username)
             SELECT id, ?2, 0, username
             FROM todolists
             WHERE id = ?1 AND username = ?3;",
            params![list_id, title, self.username],
        )?;
        Ok(changed > 0)
    }

    fn delete_todo_list(&mut self, list_id: TodoListId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM todolists WHERE id = ?1 AND username = ?2;",
            params![list_id, self.username],
        )?;
        if changed > 0 {
            info!("event=todo_list_delete module=repo backend=sqlite status=ok");
        }
        Ok(changed > 0)
    }

    fn rename_todo_list(&mut self, list_id: TodoListId, title: &str) -> RepoResult<bool> {
        let result = self.conn.execute(
            "UPDATE todolists SET title = ?2 WHERE id = ?1 AND username = ?3;",
            params![list_id, title, self.username],
        );
        match result {
            Ok(changed) => Ok(changed > 0),
            Err(err) if is_unique_violation(&err) => {
                info!("event=todo_list_rename module=repo backend=sqlite status=duplicate_title");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn exists_todo_list_title(&self, title: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM todolists WHERE title = ?1 AND username = ?2
            );",
            params![title, self.username],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn create_todo_list(&mut self, title: &str) -> RepoResult<bool> {
        let result = self.conn.execute(
            "INSERT INTO todolists (title, username) VALUES (?1, ?2);",
            params![title, self.username],
        );
        match result {
            Ok(changed) => {
                info!("event=todo_list_create module=repo backend=sqlite status=ok");
                Ok(changed > 0)
            }
            Err(err) if is_unique_violation(&err) => {
                info!("event=todo_list_create module=repo backend=sqlite status=duplicate_title");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }
}

pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let done = match row.get::<_, i64>("done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid done value `{other}` in todos.done"
            )));
        }
    };

    Ok(Todo {
        id: row.get("id")?,
        title: row.get("title")?,
        done,
    })
}
