//! Process-wide identifier generator for session-backed records.
//!
//! # Invariants
//! - Every call to [`next_id`] returns a value never returned before in this
//!   process.
//! - After [`reserve_through`], generated ids are strictly greater than the
//!   reserved value.

use std::sync::atomic::{AtomicI64, Ordering};

static NEXT_ID: AtomicI64 = AtomicI64::new(1);

/// Returns a fresh identifier.
pub fn next_id() -> i64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Ensures later ids never collide with ids up to and including `max_id`.
///
/// Used when a previously persisted session is loaded back into a process.
pub fn reserve_through(max_id: i64) {
    NEXT_ID.fetch_max(max_id.saturating_add(1), Ordering::Relaxed);
}
