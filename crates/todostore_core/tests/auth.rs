use todostore_core::db::open_db_in_memory;
use todostore_core::{create_user, is_authorized_user, RepoError, SqliteTodoStore};

#[test]
fn registered_user_authenticates_with_correct_password_only() {
    let conn = open_db_in_memory().unwrap();
    assert!(create_user(&conn, "admin", "secret").unwrap());

    assert!(is_authorized_user(&conn, "admin", "secret").unwrap());
    assert!(!is_authorized_user(&conn, "admin", "wrong").unwrap());
}

#[test]
fn unknown_user_is_rejected_without_a_valid_password() {
    let conn = open_db_in_memory().unwrap();
    assert!(!is_authorized_user(&conn, "ghost", "").unwrap());
}

#[test]
fn duplicate_username_is_reported_as_false() {
    let conn = open_db_in_memory().unwrap();
    assert!(create_user(&conn, "admin", "secret").unwrap());
    assert!(!create_user(&conn, "admin", "other").unwrap());

    assert!(is_authorized_user(&conn, "admin", "secret").unwrap());
}

#[test]
fn stored_password_is_hashed() {
    let conn = open_db_in_memory().unwrap();
    create_user(&conn, "admin", "secret").unwrap();

    let stored: String = conn
        .query_row(
            "SELECT password FROM users WHERE username = 'admin';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_ne!(stored, "secret");
    assert!(stored.starts_with("$argon2"));
}

#[test]
fn malformed_stored_hash_is_an_infrastructure_error() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO users (username, password) VALUES ('legacy', 'plaintext');",
        [],
    )
    .unwrap();

    let err = is_authorized_user(&conn, "legacy", "plaintext").unwrap_err();
    assert!(matches!(err, RepoError::Credential(_)));
}

#[test]
fn store_checks_credentials_independently_of_its_owner() {
    let conn = open_db_in_memory().unwrap();
    create_user(&conn, "alice", "a-pass").unwrap();
    create_user(&conn, "bob", "b-pass").unwrap();

    let store = SqliteTodoStore::new(&conn, "alice");
    assert_eq!(store.username(), "alice");
    assert!(store.is_authorized_user("bob", "b-pass").unwrap());
    assert!(!store.is_authorized_user("bob", "a-pass").unwrap());
}
