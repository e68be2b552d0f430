use rusqlite::Connection;
use todostore_core::db::open_db_in_memory;
use todostore_core::db::DbError;
use todostore_core::{create_user, RepoError, SqliteTodoStore, TodoListId, TodoStore};

fn setup() -> Connection {
    let conn = open_db_in_memory().unwrap();
    create_user(&conn, "alice", "a-pass").unwrap();
    create_user(&conn, "bob", "b-pass").unwrap();
    conn
}

fn list_id(store: &SqliteTodoStore<'_>, title: &str) -> TodoListId {
    store
        .sorted_todo_lists()
        .unwrap()
        .into_iter()
        .find(|list| list.title == title)
        .unwrap()
        .id
}

fn titles(store: &SqliteTodoStore<'_>) -> Vec<String> {
    store
        .sorted_todo_lists()
        .unwrap()
        .into_iter()
        .map(|list| list.title)
        .collect()
}

#[test]
fn create_list_then_title_exists() {
    let conn = setup();
    let mut store = SqliteTodoStore::new(&conn, "alice");

    assert!(!store.exists_todo_list_title("X").unwrap());
    assert!(store.create_todo_list("X").unwrap());
    assert!(store.exists_todo_list_title("X").unwrap());
}

#[test]
fn duplicate_title_returns_false_and_keeps_existing_list() {
    let conn = setup();
    let mut store = SqliteTodoStore::new(&conn, "alice");
    store.create_todo_list("Groceries").unwrap();
    let id = list_id(&store, "Groceries");
    store.create_todo(id, "milk").unwrap();

    assert!(!store.create_todo_list("Groceries").unwrap());

    let lists = store.sorted_todo_lists().unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].id, id);
    assert_eq!(lists[0].todos.len(), 1);
}

#[test]
fn same_title_is_allowed_for_different_users() {
    let conn = setup();
    let mut alice = SqliteTodoStore::new(&conn, "alice");
    let mut bob = SqliteTodoStore::new(&conn, "bob");

    assert!(alice.create_todo_list("Chores").unwrap());
    assert!(bob.create_todo_list("Chores").unwrap());
}

#[test]
fn sorted_lists_put_incomplete_before_complete() {
    let conn = setup();
    let mut store = SqliteTodoStore::new(&conn, "alice");
    for title in ["Zebra", "Apple", "Mango"] {
        store.create_todo_list(title).unwrap();
    }
    for title in ["Zebra", "Apple", "Mango"] {
        let id = list_id(&store, title);
        store.create_todo(id, "task").unwrap();
    }
    let apple = list_id(&store, "Apple");
    assert!(store.complete_all_todos(apple).unwrap());

    assert_eq!(titles(&store), vec!["Mango", "Zebra", "Apple"]);
}

#[test]
fn sorted_lists_attach_todos_to_their_own_list() {
    let conn = setup();
    let mut store = SqliteTodoStore::new(&conn, "alice");
    store.create_todo_list("Home").unwrap();
    store.create_todo_list("Work").unwrap();
    let home = list_id(&store, "Home");
    let work = list_id(&store, "Work");
    store.create_todo(home, "dishes").unwrap();
    store.create_todo(work, "email").unwrap();
    store.create_todo(work, "standup").unwrap();

    let lists = store.sorted_todo_lists().unwrap();
    assert_eq!(lists[0].title, "Home");
    assert_eq!(lists[0].todos.len(), 1);
    assert_eq!(lists[1].todos.len(), 2);
    assert!(lists[1].todos.iter().all(|todo| todo.title != "dishes"));
}

#[test]
fn load_list_sorts_todos_undone_first_then_by_title() {
    let conn = setup();
    let mut store = SqliteTodoStore::new(&conn, "alice");
    store.create_todo_list("Mixed").unwrap();
    let id = list_id(&store, "Mixed");
    for title in ["banana", "Apple", "cherry"] {
        store.create_todo(id, title).unwrap();
    }
    let apple = store
        .load_todo_list(id)
        .unwrap()
        .unwrap()
        .todos
        .into_iter()
        .find(|todo| todo.title == "Apple")
        .unwrap();
    store.mark_todo_done(id, apple.id).unwrap();

    let list = store.load_todo_list(id).unwrap().unwrap();
    let order: Vec<&str> = list.todos.iter().map(|todo| todo.title.as_str()).collect();
    assert_eq!(order, vec!["banana", "cherry", "Apple"]);
}

#[test]
fn load_missing_list_or_todo_returns_none() {
    let conn = setup();
    let store = SqliteTodoStore::new(&conn, "alice");

    assert!(store.load_todo_list(404).unwrap().is_none());
    assert!(store.load_todo(404, 1).unwrap().is_none());
}

#[test]
fn create_todo_on_unknown_list_returns_false() {
    let conn = setup();
    let mut store = SqliteTodoStore::new(&conn, "alice");
    assert!(!store.create_todo(404, "orphan").unwrap());
}

#[test]
fn create_todo_appends_undone_todo_with_fresh_id() {
    let conn = setup();
    let mut store = SqliteTodoStore::new(&conn, "alice");
    store.create_todo_list("Errands").unwrap();
    let id = list_id(&store, "Errands");

    assert!(store.create_todo(id, "post office").unwrap());
    assert!(store.create_todo(id, "bank").unwrap());

    let list = store.load_todo_list(id).unwrap().unwrap();
    assert_eq!(list.todos.len(), 2);
    assert!(list.todos.iter().all(|todo| !todo.done));
    assert_ne!(list.todos[0].id, list.todos[1].id);
}

#[test]
fn toggle_and_mark_round_trip_done_flag() {
    let conn = setup();
    let mut store = SqliteTodoStore::new(&conn, "alice");
    store.create_todo_list("Flags").unwrap();
    let id = list_id(&store, "Flags");
    store.create_todo(id, "flip").unwrap();
    let todo_id = store.load_todo_list(id).unwrap().unwrap().todos[0].id;

    assert!(store.toggle_todo_done(id, todo_id).unwrap());
    assert!(store.load_todo(id, todo_id).unwrap().unwrap().done);

    assert!(store.mark_todo_undone(id, todo_id).unwrap());
    assert!(!store.load_todo(id, todo_id).unwrap().unwrap().done);

    assert!(store.mark_todo_done(id, todo_id).unwrap());
    assert!(store.mark_todo_undone(id, todo_id).unwrap());
    assert!(!store.load_todo(id, todo_id).unwrap().unwrap().done);

    assert!(!store.toggle_todo_done(id, todo_id + 100).unwrap());
}

#[test]
fn delete_todo_reports_missing_todo() {
    let conn = setup();
    let mut store = SqliteTodoStore::new(&conn, "alice");
    store.create_todo_list("Trim").unwrap();
    let id = list_id(&store, "Trim");
    store.create_todo(id, "gone").unwrap();
    let todo_id = store.load_todo_list(id).unwrap().unwrap().todos[0].id;

    assert!(store.delete_todo(id, todo_id).unwrap());
    assert!(!store.delete_todo(id, todo_id).unwrap());
    assert!(store.load_todo(id, todo_id).unwrap().is_none());
}

#[test]
fn complete_all_is_true_for_existing_list_even_when_nothing_changes() {
    let conn = setup();
    let mut store = SqliteTodoStore::new(&conn, "alice");
    store.create_todo_list("Empty").unwrap();
    let id = list_id(&store, "Empty");

    assert!(store.complete_all_todos(id).unwrap());
    assert!(!store.complete_all_todos(404).unwrap());

    store.create_todo(id, "one").unwrap();
    assert!(store.complete_all_todos(id).unwrap());
    assert!(store.complete_all_todos(id).unwrap());
    assert!(store.load_todo_list(id).unwrap().unwrap().is_done());
}

#[test]
fn delete_list_cascades_to_todos() {
    let conn = setup();
    let mut store = SqliteTodoStore::new(&conn, "alice");
    store.create_todo_list("Doomed").unwrap();
    let id = list_id(&store, "Doomed");
    store.create_todo(id, "a").unwrap();
    store.create_todo(id, "b").unwrap();

    assert!(!store.delete_todo_list(404).unwrap());
    assert_eq!(titles(&store), vec!["Doomed"]);

    assert!(store.delete_todo_list(id).unwrap());
    assert!(store.load_todo_list(id).unwrap().is_none());
    let remaining: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM todos WHERE todolist_id = ?1;",
            [id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(remaining, 0);
}

#[test]
fn rename_list_reports_missing_and_duplicate_titles() {
    let conn = setup();
    let mut store = SqliteTodoStore::new(&conn, "alice");
    store.create_todo_list("Old").unwrap();
    store.create_todo_list("Taken").unwrap();
    let id = list_id(&store, "Old");

    assert!(!store.rename_todo_list(404, "New").unwrap());
    assert!(!store.rename_todo_list(id, "Taken").unwrap());
    assert!(store.rename_todo_list(id, "New").unwrap());

    assert!(store.exists_todo_list_title("New").unwrap());
    assert!(!store.exists_todo_list_title("Old").unwrap());
}

#[test]
fn other_users_lists_are_invisible_and_immutable() {
    let conn = setup();
    let mut alice = SqliteTodoStore::new(&conn, "alice");
    alice.create_todo_list("Private").unwrap();
    let id = list_id(&alice, "Private");
    alice.create_todo(id, "secret").unwrap();
    let todo_id = alice.load_todo_list(id).unwrap().unwrap().todos[0].id;

    let mut bob = SqliteTodoStore::new(&conn, "bob");
    assert!(bob.sorted_todo_lists().unwrap().is_empty());
    assert!(bob.load_todo_list(id).unwrap().is_none());
    assert!(bob.load_todo(id, todo_id).unwrap().is_none());
    assert!(!bob.exists_todo_list_title("Private").unwrap());
    assert!(!bob.create_todo(id, "intruder").unwrap());
    assert!(!bob.toggle_todo_done(id, todo_id).unwrap());
    assert!(!bob.mark_todo_done(id, todo_id).unwrap());
    assert!(!bob.delete_todo(id, todo_id).unwrap());
    assert!(!bob.complete_all_todos(id).unwrap());
    assert!(!bob.rename_todo_list(id, "Mine").unwrap());
    assert!(!bob.delete_todo_list(id).unwrap());

    let list = alice.load_todo_list(id).unwrap().unwrap();
    assert_eq!(list.title, "Private");
    assert_eq!(list.todos.len(), 1);
    assert!(!list.todos[0].done);
}

#[test]
fn lists_with_equal_lowercase_titles_keep_creation_order() {
    let conn = setup();
    let mut store = SqliteTodoStore::new(&conn, "alice");
    for title in ["work", "Work", "apple"] {
        assert!(store.create_todo_list(title).unwrap());
    }

    assert_eq!(titles(&store), vec!["apple", "work", "Work"]);
}

#[test]
fn storage_faults_other_than_duplicate_titles_propagate() {
    let conn = setup();
    let mut store = SqliteTodoStore::new(&conn, "ghost");

    let err = store.create_todo_list("X").unwrap_err();
    assert!(matches!(err, RepoError::Db(DbError::Sqlite(_))));
    assert!(store.sorted_todo_lists().unwrap().is_empty());
    assert!(!store.exists_todo_list_title("X").unwrap());
}
