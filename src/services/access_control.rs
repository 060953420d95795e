//! Access control for workout-scoped operations.
//!
//! Checks run in a fixed order: authentication, identifier syntax,
//! existence, ownership. The first failing check decides the outcome.

use std::future::Future;
use std::sync::Arc;

use uuid::Uuid;

use super::{AuthService, Claims};
use crate::domain::{parse_id, Workout};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Identity of the caller, decoded from a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub admin: bool,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.admin
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            admin: claims.admin,
        }
    }
}

/// A resource the caller has been cleared to act on.
#[derive(Debug, Clone)]
pub struct Authorized<T> {
    pub identity: Identity,
    pub resource: T,
}

/// Resolve a raw token into an identity.
///
/// A missing, blank or unverifiable token is `Unauthenticated`.
pub fn authenticate(auth: &dyn AuthService, token: Option<&str>) -> AppResult<Identity> {
    let token = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthenticated)?;

    auth.verify_token(token)
        .map(Identity::from)
        .map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AppError::Unauthenticated
        })
}

/// Ownership guard over workouts.
pub struct WorkoutAccess<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> WorkoutAccess<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Load the workout named by `raw_id` and check it belongs to `identity`.
    ///
    /// The admin flag grants nothing here.
    pub async fn authorize(
        &self,
        identity: Identity,
        raw_id: &str,
    ) -> AppResult<Authorized<Workout>> {
        let id = parse_id(raw_id).ok_or(AppError::NotFound)?;
        let workout = self
            .uow
            .workouts()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if !workout.is_owned_by(identity.user_id) {
            tracing::debug!(
                workout_id = %workout.id,
                user_id = %identity.user_id,
                "Workout access denied"
            );
            return Err(AppError::Forbidden);
        }

        Ok(Authorized {
            identity,
            resource: workout,
        })
    }

    /// Run `action` on the workout once the caller is cleared for it.
    pub async fn with_owned_workout<T, F, Fut>(
        &self,
        identity: Identity,
        raw_id: &str,
        action: F,
    ) -> AppResult<T>
    where
        F: FnOnce(Authorized<Workout>) -> Fut + Send,
        Fut: Future<Output = AppResult<T>> + Send,
    {
        let authorized = self.authorize(identity, raw_id).await?;
        action(authorized).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockWorkoutRepository;
    use crate::services::testing::MockPersistence;
    use crate::services::MockAuthService;
    use chrono::Utc;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn identity(user_id: Uuid, admin: bool) -> Identity {
        Identity { user_id, admin }
    }

    fn guard(workouts: MockWorkoutRepository) -> WorkoutAccess<MockPersistence> {
        WorkoutAccess::new(Arc::new(MockPersistence {
            workouts: Arc::new(workouts),
            ..Default::default()
        }))
    }

    fn stored(owner: Uuid) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            date: Utc::now(),
            user_id: owner,
        }
    }

    fn claims(admin: bool) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            admin,
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn test_missing_or_blank_token_is_unauthenticated() {
        let mut auth = MockAuthService::new();
        auth.expect_verify_token().never();

        assert!(matches!(authenticate(&auth, None), Err(AppError::Unauthenticated)));
        assert!(matches!(
            authenticate(&auth, Some("  ")),
            Err(AppError::Unauthenticated)
        ));
    }

    #[test]
    fn test_rejected_token_is_unauthenticated() {
        let mut auth = MockAuthService::new();
        auth.expect_verify_token()
            .returning(|_| Err(AppError::internal("bad signature")));

        assert!(matches!(
            authenticate(&auth, Some("abc")),
            Err(AppError::Unauthenticated)
        ));
    }

    #[test]
    fn test_verified_token_yields_identity() {
        let decoded = claims(true);
        let expected = decoded.sub;
        let mut auth = MockAuthService::new();
        auth.expect_verify_token()
            .withf(|token| token == "abc")
            .returning(move |_| Ok(decoded.clone()));

        let identity = authenticate(&auth, Some(" abc ")).unwrap();
        assert_eq!(identity.user_id, expected);
        assert!(identity.is_admin());
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found_without_lookup() {
        let mut workouts = MockWorkoutRepository::new();
        workouts.expect_find_by_id().never();

        let result = guard(workouts)
            .authorize(identity(Uuid::new_v4(), false), "1")
            .await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_absent_workout_is_not_found() {
        let mut workouts = MockWorkoutRepository::new();
        workouts.expect_find_by_id().returning(|_| Ok(None));

        let result = guard(workouts)
            .authorize(identity(Uuid::new_v4(), false), &Uuid::new_v4().to_string())
            .await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_foreign_workout_forbidden_even_for_admin() {
        let workout = stored(Uuid::new_v4());
        let id = workout.id.to_string();
        let mut workouts = MockWorkoutRepository::new();
        workouts
            .expect_find_by_id()
            .returning(move |_| Ok(Some(workout.clone())));

        let result = guard(workouts)
            .authorize(identity(Uuid::new_v4(), true), &id)
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_owner_runs_action() {
        let owner = Uuid::new_v4();
        let workout = stored(owner);
        let id = workout.id;
        let mut workouts = MockWorkoutRepository::new();
        workouts
            .expect_find_by_id()
            .returning(move |_| Ok(Some(workout.clone())));

        let caller = identity(owner, false);
        let (seen, acting) = guard(workouts)
            .with_owned_workout(caller, &id.to_string(), |auth| async move {
                Ok((auth.resource.id, auth.identity))
            })
            .await
            .unwrap();
        assert_eq!(seen, id);
        assert_eq!(acting, caller);
    }

    #[tokio::test]
    async fn test_action_skipped_when_denied() {
        let workout = stored(Uuid::new_v4());
        let id = workout.id.to_string();
        let mut workouts = MockWorkoutRepository::new();
        workouts
            .expect_find_by_id()
            .returning(move |_| Ok(Some(workout.clone())));

        let ran = AtomicBool::new(false);
        let result = guard(workouts)
            .with_owned_workout(identity(Uuid::new_v4(), false), &id, |_| async {
                ran.store(true, Ordering::SeqCst);
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
        assert!(!ran.load(Ordering::SeqCst));
    }
}
