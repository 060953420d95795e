//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod completed_exercise;
pub mod exercise;
pub mod muscle;
pub mod user;
pub mod workout;

use uuid::Uuid;

/// Primary key for a new workout or completed exercise.
///
/// Version 7 ids sort by creation time and ids minted by one process are
/// strictly increasing, so listings ordered by `(created_at, id)` keep
/// insertion order even when two rows share a timestamp.
pub fn new_row_id() -> Uuid {
    Uuid::now_v7()
}
