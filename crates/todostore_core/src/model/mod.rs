//! Todo list domain model.
//!
//! # Responsibility
//! - Define the list/item records returned by every store backend.
//!
//! # Invariants
//! - Every todo belongs to exactly one list.
//! - List titles are unique within one owner's scope.

pub mod todo;
