//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod catalog_repository;
pub(crate) mod entities;
mod user_repository;
mod workout_repository;

pub use catalog_repository::{CatalogRepository, CatalogStore};
pub use user_repository::{UserRepository, UserStore};
pub use workout_repository::{
    CompletedExerciseRepository, CompletedExerciseStore, WorkoutRepository, WorkoutStore,
};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use catalog_repository::MockCatalogRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use workout_repository::{MockCompletedExerciseRepository, MockWorkoutRepository};
