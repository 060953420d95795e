//! User service - Account lookups and administrator operations.

use async_trait::async_trait;
use std::sync::Arc;

use super::Identity;
use crate::domain::{parse_id, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get the caller's own account
    async fn current_user(&self, identity: Identity) -> AppResult<User>;

    /// List every user ordered by name (admin only)
    async fn list_users(&self, identity: Identity) -> AppResult<Vec<User>>;

    /// Delete a user together with its workouts and their entries (admin only).
    /// Returns the deleted user.
    async fn delete_user(&self, identity: Identity, raw_id: &str) -> AppResult<User>;

    /// Grant or revoke the admin flag by email
    async fn set_admin(&self, email: &str, admin: bool) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn require_admin(identity: Identity) -> AppResult<()> {
    if identity.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn current_user(&self, identity: Identity) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(identity.user_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_users(&self, identity: Identity) -> AppResult<Vec<User>> {
        require_admin(identity)?;
        self.uow.users().list_by_name().await
    }

    async fn delete_user(&self, identity: Identity, raw_id: &str) -> AppResult<User> {
        require_admin(identity)?;

        let id = parse_id(raw_id).ok_or(AppError::NotFound)?;
        let user = self
            .uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if user.id == identity.user_id {
            return Err(AppError::invalid_input("Administrators cannot delete themselves"));
        }

        let removed = with_transaction!(self.uow, |ctx| {
            let workout_ids = ctx.workouts().ids_by_owner(id).await?;
            ctx.completed_exercises()
                .delete_by_workouts(&workout_ids)
                .await?;
            let removed = ctx.workouts().delete_by_owner(id).await?;
            ctx.users().delete(id).await?;
            Ok(removed)
        })?;

        tracing::info!(user_id = %id, workouts = removed, "User deleted");
        Ok(user)
    }

    async fn set_admin(&self, email: &str, admin: bool) -> AppResult<User> {
        let user = self
            .uow
            .users()
            .find_by_email(email)
            .await?
            .ok_or(AppError::NotFound)?;

        self.uow.users().set_admin(user.id, admin).await
    }
}
