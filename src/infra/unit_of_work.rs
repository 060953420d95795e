//! Unit of Work pattern implementation.
//!
//! Centralizes access to the repositories and runs multi-row deletes
//! (workout cascade, user removal) inside one database transaction.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    IsolationLevel, QueryFilter, QuerySelect, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::{completed_exercise, user, workout};
use super::repositories::{
    CatalogRepository, CatalogStore, CompletedExerciseRepository, CompletedExerciseStore,
    UserRepository, UserStore, WorkoutRepository, WorkoutStore,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction management.
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, mock at the repository level or use integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn catalog(&self) -> Arc<dyn CatalogRepository>;

    fn workouts(&self) -> Arc<dyn WorkoutRepository>;

    fn completed_exercises(&self) -> Arc<dyn CompletedExerciseRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success and rolled back on error.
    /// Uses ReadCommitted isolation.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository { txn: self.txn }
    }

    pub fn workouts(&self) -> TxWorkoutRepository<'_> {
        TxWorkoutRepository { txn: self.txn }
    }

    pub fn completed_exercises(&self) -> TxCompletedExerciseRepository<'_> {
        TxCompletedExerciseRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    catalog_repo: Arc<CatalogStore>,
    workout_repo: Arc<WorkoutStore>,
    completed_exercise_repo: Arc<CompletedExerciseStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            catalog_repo: Arc::new(CatalogStore::new(db.clone())),
            workout_repo: Arc::new(WorkoutStore::new(db.clone())),
            completed_exercise_repo: Arc::new(CompletedExerciseStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogRepository> {
        self.catalog_repo.clone()
    }

    fn workouts(&self) -> Arc<dyn WorkoutRepository> {
        self.workout_repo.clone()
    }

    fn completed_exercises(&self) -> Arc<dyn CompletedExerciseRepository> {
        self.completed_exercise_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxUserRepository<'_> {
    /// Hard delete a user row.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}

/// Transaction-aware workout repository.
pub struct TxWorkoutRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxWorkoutRepository<'_> {
    /// Delete a single workout row.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = workout::Entity::delete_by_id(id)
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    /// Ids of every workout owned by `user_id`.
    pub async fn ids_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Uuid>> {
        workout::Entity::find()
            .select_only()
            .column(workout::Column::Id)
            .filter(workout::Column::UserId.eq(user_id))
            .into_tuple()
            .all(self.txn)
            .await
            .map_err(AppError::from)
    }

    /// Delete every workout owned by `user_id`, returning the row count.
    pub async fn delete_by_owner(&self, user_id: Uuid) -> AppResult<u64> {
        let result = workout::Entity::delete_many()
            .filter(workout::Column::UserId.eq(user_id))
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}

/// Transaction-aware completed exercise repository.
pub struct TxCompletedExerciseRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl TxCompletedExerciseRepository<'_> {
    /// Delete every entry attached to one of `workout_ids`.
    pub async fn delete_by_workouts(&self, workout_ids: &[Uuid]) -> AppResult<u64> {
        if workout_ids.is_empty() {
            return Ok(0);
        }

        let result = completed_exercise::Entity::delete_many()
            .filter(completed_exercise::Column::WorkoutId.is_in(workout_ids.iter().copied()))
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}

/// Simpler API for executing transactional operations.
///
/// This helper macro reduces boilerplate when using transactions.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
