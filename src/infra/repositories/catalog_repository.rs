//! Muscle and exercise catalog repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::exercise::{self, Entity as ExerciseEntity};
use super::entities::muscle::{self, Entity as MuscleEntity};
use crate::domain::{Exercise, Muscle};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Read-mostly access to muscles and catalog exercises.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// All muscles ordered by name
    async fn list_muscles(&self) -> AppResult<Vec<Muscle>>;

    async fn find_muscle(&self, id: Uuid) -> AppResult<Option<Muscle>>;

    async fn find_muscle_by_name(&self, name: &str) -> AppResult<Option<Muscle>>;

    async fn create_muscle(&self, name: String) -> AppResult<Muscle>;

    /// All exercises ordered by name
    async fn list_exercises(&self) -> AppResult<Vec<Exercise>>;

    async fn find_exercise(&self, id: Uuid) -> AppResult<Option<Exercise>>;

    /// Batch lookup; ids without a row are simply absent from the result
    async fn find_exercises(&self, ids: &[Uuid]) -> AppResult<Vec<Exercise>>;

    async fn create_exercise(&self, name: String, muscle_id: Uuid) -> AppResult<Exercise>;
}

/// Concrete implementation of CatalogRepository
pub struct CatalogStore {
    db: DatabaseConnection,
}

impl CatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for CatalogStore {
    async fn list_muscles(&self) -> AppResult<Vec<Muscle>> {
        let models = MuscleEntity::find()
            .order_by_asc(muscle::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Muscle::from).collect())
    }

    async fn find_muscle(&self, id: Uuid) -> AppResult<Option<Muscle>> {
        let result = MuscleEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Muscle::from))
    }

    async fn find_muscle_by_name(&self, name: &str) -> AppResult<Option<Muscle>> {
        let result = MuscleEntity::find()
            .filter(muscle::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Muscle::from))
    }

    async fn create_muscle(&self, name: String) -> AppResult<Muscle> {
        let model = muscle::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
        }
        .insert(&self.db)
        .await
        .map_err(AppError::from)?;

        Ok(Muscle::from(model))
    }

    async fn list_exercises(&self) -> AppResult<Vec<Exercise>> {
        let models = ExerciseEntity::find()
            .order_by_asc(exercise::Column::Name)
            .order_by_asc(exercise::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Exercise::from).collect())
    }

    async fn find_exercise(&self, id: Uuid) -> AppResult<Option<Exercise>> {
        let result = ExerciseEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Exercise::from))
    }

    async fn find_exercises(&self, ids: &[Uuid]) -> AppResult<Vec<Exercise>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = ExerciseEntity::find()
            .filter(exercise::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Exercise::from).collect())
    }

    async fn create_exercise(&self, name: String, muscle_id: Uuid) -> AppResult<Exercise> {
        let model = exercise::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            muscle_id: Set(muscle_id),
        }
        .insert(&self.db)
        .await
        .map_err(AppError::from)?;

        Ok(Exercise::from(model))
    }
}
