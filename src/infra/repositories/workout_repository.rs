//! Workout and completed exercise repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::completed_exercise::{self, Entity as CompletedExerciseEntity};
use super::entities::new_row_id;
use super::entities::workout::{self, ActiveModel, Entity as WorkoutEntity};
use crate::domain::{CompletedExercise, NewCompletedExercise, Workout};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Workout repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Workout>>;

    /// Workouts owned by `user_id`, oldest insertion first
    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Workout>>;

    async fn create(&self, user_id: Uuid, date: DateTime<Utc>) -> AppResult<Workout>;

    /// Replace the date; the owner is never touched
    async fn update_date(&self, id: Uuid, date: DateTime<Utc>) -> AppResult<Workout>;
}

/// Completed exercise repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CompletedExerciseRepository: Send + Sync {
    /// Entries of every listed workout, oldest insertion first
    async fn list_by_workouts(&self, workout_ids: &[Uuid]) -> AppResult<Vec<CompletedExercise>>;

    async fn create(&self, entry: NewCompletedExercise) -> AppResult<CompletedExercise>;
}

/// Concrete implementation of WorkoutRepository
pub struct WorkoutStore {
    db: DatabaseConnection,
}

impl WorkoutStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WorkoutRepository for WorkoutStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Workout>> {
        let result = WorkoutEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Workout::from))
    }

    async fn list_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Workout>> {
        let models = WorkoutEntity::find()
            .filter(workout::Column::UserId.eq(user_id))
            .order_by_asc(workout::Column::CreatedAt)
            .order_by_asc(workout::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Workout::from).collect())
    }

    async fn create(&self, user_id: Uuid, date: DateTime<Utc>) -> AppResult<Workout> {
        let active_model = ActiveModel {
            id: Set(new_row_id()),
            user_id: Set(user_id),
            date: Set(date),
            created_at: Set(Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Workout::from(model))
    }

    async fn update_date(&self, id: Uuid, date: DateTime<Utc>) -> AppResult<Workout> {
        let workout = WorkoutEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = workout.into();
        active.date = Set(date);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Workout::from(model))
    }
}

/// Concrete implementation of CompletedExerciseRepository
pub struct CompletedExerciseStore {
    db: DatabaseConnection,
}

impl CompletedExerciseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CompletedExerciseRepository for CompletedExerciseStore {
    async fn list_by_workouts(&self, workout_ids: &[Uuid]) -> AppResult<Vec<CompletedExercise>> {
        if workout_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = CompletedExerciseEntity::find()
            .filter(completed_exercise::Column::WorkoutId.is_in(workout_ids.iter().copied()))
            .order_by_asc(completed_exercise::Column::CreatedAt)
            .order_by_asc(completed_exercise::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        models.into_iter().map(CompletedExercise::try_from).collect()
    }

    async fn create(&self, entry: NewCompletedExercise) -> AppResult<CompletedExercise> {
        let active_model = completed_exercise::ActiveModel {
            id: Set(new_row_id()),
            exercise_id: Set(entry.exercise_id),
            workout_id: Set(entry.workout_id),
            exercise_type: Set(entry.exercise_type.as_str().to_string()),
            sets: Set(entry.sets),
            reps: Set(entry.reps),
            load: Set(entry.load),
            unilateral: Set(entry.unilateral),
            mum: Set(entry.mum),
            created_at: Set(Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        CompletedExercise::try_from(model)
    }
}
