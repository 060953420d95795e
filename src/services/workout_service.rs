//! Workout service - Workouts and the completed exercises logged on them.
//!
//! Every operation addressing a single workout goes through
//! `WorkoutAccess`, and request bodies are only looked at once access has
//! been granted. Reads expand entries with their catalog exercise using
//! batched lookups (workouts, then entries, then exercises).

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use super::{Identity, WorkoutAccess};
use crate::domain::{
    parse_workout_date, workout_date_now, CompletedExercise, CompletedExerciseInput, Workout,
    WorkoutDetail, WorkoutInput,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

/// Outcome of decoding an optional JSON request body. `Ok(None)` means the
/// body was empty.
pub type RequestBody<T> = AppResult<Option<T>>;

/// Workout service trait for dependency injection.
#[async_trait]
pub trait WorkoutService: Send + Sync {
    /// Workouts owned by the caller, expanded
    async fn list_workouts(&self, identity: Identity) -> AppResult<Vec<WorkoutDetail>>;

    /// Create a workout owned by the caller; the date defaults to now
    async fn create_workout(
        &self,
        identity: Identity,
        body: RequestBody<WorkoutInput>,
    ) -> AppResult<Workout>;

    async fn get_workout(&self, identity: Identity, raw_id: &str) -> AppResult<WorkoutDetail>;

    /// Change the date of a workout. A date is mandatory.
    async fn update_workout(
        &self,
        identity: Identity,
        raw_id: &str,
        body: RequestBody<WorkoutInput>,
    ) -> AppResult<Workout>;

    /// Delete a workout and its entries atomically, returning what was removed
    async fn delete_workout(&self, identity: Identity, raw_id: &str) -> AppResult<WorkoutDetail>;

    /// Log a completed exercise against the workout in the path
    async fn add_completed_exercise(
        &self,
        identity: Identity,
        raw_id: &str,
        body: RequestBody<CompletedExerciseInput>,
    ) -> AppResult<CompletedExercise>;
}

pub struct WorkoutManager<U: UnitOfWork> {
    uow: Arc<U>,
    access: WorkoutAccess<U>,
}

impl<U: UnitOfWork> WorkoutManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self {
            access: WorkoutAccess::new(uow.clone()),
            uow,
        }
    }

    async fn expand(&self, workouts: Vec<Workout>) -> AppResult<Vec<WorkoutDetail>> {
        let workout_ids: Vec<Uuid> = workouts.iter().map(|w| w.id).collect();
        let entries = self
            .uow
            .completed_exercises()
            .list_by_workouts(&workout_ids)
            .await?;

        let exercise_ids: Vec<Uuid> = entries
            .iter()
            .map(|e| e.exercise_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let catalog: HashMap<Uuid, _> = self
            .uow
            .catalog()
            .find_exercises(&exercise_ids)
            .await?
            .into_iter()
            .map(|exercise| (exercise.id, exercise))
            .collect();

        let mut by_workout: HashMap<Uuid, Vec<CompletedExercise>> = HashMap::new();
        for entry in entries {
            by_workout.entry(entry.workout_id).or_default().push(entry);
        }

        Ok(workouts
            .into_iter()
            .map(|workout| {
                let entries = by_workout.remove(&workout.id).unwrap_or_default();
                WorkoutDetail::assemble(workout, entries, &catalog)
            })
            .collect())
    }

    async fn expand_one(&self, workout: Workout) -> AppResult<WorkoutDetail> {
        self.expand(vec![workout])
            .await?
            .pop()
            .ok_or_else(|| AppError::internal("expanding a workout produced no result"))
    }
}

#[async_trait]
impl<U: UnitOfWork> WorkoutService for WorkoutManager<U> {
    async fn list_workouts(&self, identity: Identity) -> AppResult<Vec<WorkoutDetail>> {
        let workouts = self.uow.workouts().list_by_owner(identity.user_id).await?;
        self.expand(workouts).await
    }

    async fn create_workout(
        &self,
        identity: Identity,
        body: RequestBody<WorkoutInput>,
    ) -> AppResult<Workout> {
        let date = match body?.and_then(|input| input.date) {
            Some(raw) => parse_workout_date(&raw)?,
            None => workout_date_now(),
        };

        let workout = self.uow.workouts().create(identity.user_id, date).await?;
        tracing::debug!(workout_id = %workout.id, user_id = %identity.user_id, "Workout created");
        Ok(workout)
    }

    async fn get_workout(&self, identity: Identity, raw_id: &str) -> AppResult<WorkoutDetail> {
        self.access
            .with_owned_workout(identity, raw_id, |authorized| {
                self.expand_one(authorized.resource)
            })
            .await
    }

    async fn update_workout(
        &self,
        identity: Identity,
        raw_id: &str,
        body: RequestBody<WorkoutInput>,
    ) -> AppResult<Workout> {
        self.access
            .with_owned_workout(identity, raw_id, |authorized| async move {
                let raw_date = body?
                    .and_then(|input| input.date)
                    .ok_or_else(|| AppError::invalid_input("date is required"))?;
                let date = parse_workout_date(&raw_date)?;

                self.uow
                    .workouts()
                    .update_date(authorized.resource.id, date)
                    .await
            })
            .await
    }

    async fn delete_workout(&self, identity: Identity, raw_id: &str) -> AppResult<WorkoutDetail> {
        self.access
            .with_owned_workout(identity, raw_id, |authorized| async move {
                let user_id = authorized.identity.user_id;
                let detail = self.expand_one(authorized.resource).await?;
                let workout_id = detail.id;

                let removed = with_transaction!(self.uow, |ctx| {
                    let removed = ctx
                        .completed_exercises()
                        .delete_by_workouts(&[workout_id])
                        .await?;
                    ctx.workouts().delete(workout_id).await?;
                    Ok(removed)
                })?;

                tracing::info!(%workout_id, %user_id, entries = removed, "Workout deleted");
                Ok(detail)
            })
            .await
    }

    async fn add_completed_exercise(
        &self,
        identity: Identity,
        raw_id: &str,
        body: RequestBody<CompletedExerciseInput>,
    ) -> AppResult<CompletedExercise> {
        self.access
            .with_owned_workout(identity, raw_id, |authorized| async move {
                let input = body?.unwrap_or_default();
                let exercise_id = input.exercise_id()?;
                if self.uow.catalog().find_exercise(exercise_id).await?.is_none() {
                    return Err(AppError::invalid_input("Exercise not found"));
                }

                let entry = input.into_new(authorized.resource.id, exercise_id)?;
                self.uow.completed_exercises().create(entry).await
            })
            .await
    }
}
