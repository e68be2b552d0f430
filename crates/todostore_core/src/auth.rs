//! Credential storage and verification.
//!
//! # Responsibility
//! - Hash passwords into Argon2id PHC strings for the `users` table.
//! - Decide whether a username/password pair is authorized.
//!
//! # Invariants
//! - Plaintext passwords are never stored or logged.
//! - An unknown username is rejected before any hash comparison runs.
//! - A wrong password and an unknown username look identical to callers.

use crate::repo::sqlite_store::is_unique_violation;
use crate::repo::todo_store::RepoResult;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Password hashing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Hash computation failed.
    Hash(String),
    /// Stored hash is not a valid PHC string.
    MalformedHash(String),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash(message) => write!(f, "failed to hash password: {message}"),
            Self::MalformedHash(message) => write!(f, "invalid stored password hash: {message}"),
        }
    }
}

impl Error for AuthError {}

/// Hashes a password with Argon2id and a random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| AuthError::Hash(err.to_string()))?;
    Ok(hash.to_string())
}

/// Checks `password` against a PHC-format hash.
///
/// # Errors
/// - [`AuthError::MalformedHash`] when `hash` cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|err| AuthError::MalformedHash(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Registers a user with a hashed password.
///
/// Returns `false` when the username is already taken.
pub fn create_user(conn: &Connection, username: &str, password: &str) -> RepoResult<bool> {
    let hash = hash_password(password)?;
    let result = conn.execute(
        "INSERT INTO users (username, password) VALUES (?1, ?2);",
        params![username, hash],
    );
    match result {
        Ok(changed) => {
            info!("event=user_create module=auth status=ok");
            Ok(changed > 0)
        }
        Err(err) if is_unique_violation(&err) => {
            info!("event=user_create module=auth status=duplicate_username");
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}

/// Returns whether `username` exists and `password` matches its stored hash.
pub fn is_authorized_user(conn: &Connection, username: &str, password: &str) -> RepoResult<bool> {
    let stored: Option<String> = conn
        .query_row(
            "SELECT password FROM users WHERE username = ?1;",
            [username],
            |row| row.get(0),
        )
        .optional()?;

    let Some(hash) = stored else {
        info!("event=auth_check module=auth status=denied");
        return Ok(false);
    };

    let authorized = verify_password(password, &hash)?;
    info!(
        "event=auth_check module=auth status={}",
        if authorized { "ok" } else { "denied" }
    );
    Ok(authorized)
}
