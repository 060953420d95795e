//! Unit of Work assembled from repository mocks.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::infra::{
    CatalogRepository, CompletedExerciseRepository, MockCatalogRepository,
    MockCompletedExerciseRepository, MockUserRepository, MockWorkoutRepository,
    TransactionContext, UnitOfWork, UserRepository, WorkoutRepository,
};

/// Repositories default to mocks with no expectations, so any call a test
/// did not plan for fails loudly.
#[derive(Default)]
pub struct MockPersistence {
    pub users: Arc<MockUserRepository>,
    pub catalog: Arc<MockCatalogRepository>,
    pub workouts: Arc<MockWorkoutRepository>,
    pub completed_exercises: Arc<MockCompletedExerciseRepository>,
}

#[async_trait]
impl UnitOfWork for MockPersistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogRepository> {
        self.catalog.clone()
    }

    fn workouts(&self) -> Arc<dyn WorkoutRepository> {
        self.workouts.clone()
    }

    fn completed_exercises(&self) -> Arc<dyn CompletedExerciseRepository> {
        self.completed_exercises.clone()
    }

    /// Transactions need a real connection; cascades are covered by the
    /// integration tests.
    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("transactions are unavailable on mock persistence"))
    }
}
