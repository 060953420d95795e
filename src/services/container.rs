//! Service Container - Centralized service access.
//!
//! Builds every service on top of one shared Unit of Work and hands them
//! out as trait objects.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, CatalogManager, CatalogService, UserManager, UserService,
    WorkoutManager, WorkoutService,
};
use crate::config::Config;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn catalog(&self) -> Arc<dyn CatalogService>;

    fn workouts(&self) -> Arc<dyn WorkoutService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    catalog_service: Arc<dyn CatalogService>,
    workout_service: Arc<dyn WorkoutService>,
}

impl Services {
    /// Create a service container from already built services
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        catalog_service: Arc<dyn CatalogService>,
        workout_service: Arc<dyn WorkoutService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            catalog_service,
            workout_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            catalog_service: Arc::new(CatalogManager::new(uow.clone())),
            workout_service: Arc::new(WorkoutManager::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }

    fn workouts(&self) -> Arc<dyn WorkoutService> {
        self.workout_service.clone()
    }
}
