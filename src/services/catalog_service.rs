//! Catalog service - Muscles and exercises reference data.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use super::Identity;
use crate::domain::{parse_id, Exercise, ExerciseListing, Muscle};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Catalog service trait for dependency injection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_muscles(&self) -> AppResult<Vec<Muscle>>;

    /// Add a muscle (admin only). Names are unique.
    async fn create_muscle(&self, identity: Identity, name: String) -> AppResult<Muscle>;

    /// All exercises, each with the name of the muscle it trains
    async fn list_exercises(&self) -> AppResult<Vec<ExerciseListing>>;

    /// Add an exercise (admin only) training an existing muscle
    async fn create_exercise(
        &self,
        identity: Identity,
        name: String,
        muscle_id: &str,
    ) -> AppResult<Exercise>;
}

pub struct CatalogManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CatalogManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn required_name(name: String) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::invalid_input("name is required"));
    }
    Ok(name.to_string())
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for CatalogManager<U> {
    async fn list_muscles(&self) -> AppResult<Vec<Muscle>> {
        self.uow.catalog().list_muscles().await
    }

    async fn create_muscle(&self, identity: Identity, name: String) -> AppResult<Muscle> {
        if !identity.is_admin() {
            return Err(AppError::Forbidden);
        }
        let name = required_name(name)?;

        let catalog = self.uow.catalog();
        if catalog.find_muscle_by_name(&name).await?.is_some() {
            return Err(AppError::invalid_input("Muscle exists already"));
        }

        match catalog.create_muscle(name).await {
            Err(e) if e.is_unique_violation() => {
                Err(AppError::invalid_input("Muscle exists already"))
            }
            other => other,
        }
    }

    async fn list_exercises(&self) -> AppResult<Vec<ExerciseListing>> {
        let catalog = self.uow.catalog();
        let (exercises, muscles) = tokio::try_join!(catalog.list_exercises(), catalog.list_muscles())?;

        let muscle_names: HashMap<_, _> = muscles.into_iter().map(|m| (m.id, m.name)).collect();

        Ok(exercises
            .into_iter()
            .map(|exercise| ExerciseListing {
                muscle: muscle_names.get(&exercise.muscle_id).cloned(),
                id: exercise.id,
                name: exercise.name,
                muscle_id: exercise.muscle_id,
            })
            .collect())
    }

    async fn create_exercise(
        &self,
        identity: Identity,
        name: String,
        muscle_id: &str,
    ) -> AppResult<Exercise> {
        if !identity.is_admin() {
            return Err(AppError::Forbidden);
        }
        let name = required_name(name)?;

        let catalog = self.uow.catalog();
        let muscle = match parse_id(muscle_id) {
            Some(id) => catalog.find_muscle(id).await?,
            None => None,
        }
        .ok_or_else(|| AppError::invalid_input("Invalid muscle"))?;

        catalog.create_exercise(name, muscle.id).await
    }
}
