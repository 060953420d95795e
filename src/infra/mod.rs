//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    CatalogRepository, CatalogStore, CompletedExerciseRepository, CompletedExerciseStore,
    UserRepository, UserStore, WorkoutRepository, WorkoutStore,
};
pub use unit_of_work::{
    Persistence, TransactionContext, TxCompletedExerciseRepository, TxUserRepository,
    TxWorkoutRepository, UnitOfWork,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockCatalogRepository, MockCompletedExerciseRepository, MockUserRepository,
    MockWorkoutRepository,
};
