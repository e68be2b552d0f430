//! Store contract and its backends.
//!
//! # Responsibility
//! - Define the [`TodoStore`](todo_store::TodoStore) operation set.
//! - Provide the SQLite-backed and session-backed implementations.
//!
//! # Invariants
//! - Both backends order lists through [`crate::sort`].
//! - Business misses (unknown id, duplicate title) are `false`/`None`;
//!   `RepoError` is reserved for infrastructure faults.

pub mod id_gen;
pub mod session_store;
pub mod sqlite_store;
pub mod todo_store;
