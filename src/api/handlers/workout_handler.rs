//! Workout handlers.
//!
//! Bodies arrive as `DeferredJson` and are decoded only after the
//! ownership checks inside the service have passed.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Extension, Router,
};

use crate::api::extractors::{DeferredJson, PathId};
use crate::api::AppState;
use crate::domain::{CompletedExercise, CompletedExerciseInput, Workout, WorkoutDetail, WorkoutInput};
use crate::errors::AppResult;
use crate::services::Identity;

/// Workout routes. The caller mounts them behind the auth middleware.
pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_workouts).post(create_workout))
        .route(
            "/:id",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
        .route("/:id/completed_exercises", post(add_completed_exercise))
        .route("/:id/completed_exercises/", post(add_completed_exercise))
}

/// List the caller's workouts
#[utoipa::path(
    get,
    path = "/api/workouts",
    tag = "Workouts",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Workouts with their exercises", body = Vec<WorkoutDetail>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_workouts(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Json<Vec<WorkoutDetail>>> {
    Ok(Json(state.workout_service.list_workouts(identity).await?))
}

/// Create a workout
#[utoipa::path(
    post,
    path = "/api/workouts",
    tag = "Workouts",
    security(("api_key" = [])),
    request_body(content = WorkoutInput, description = "Optional; the date defaults to now"),
    responses(
        (status = 200, description = "Workout created", body = Workout),
        (status = 400, description = "Invalid date"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create_workout(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    body: DeferredJson<WorkoutInput>,
) -> AppResult<Json<Workout>> {
    let workout = state
        .workout_service
        .create_workout(identity, body.decode())
        .await?;
    Ok(Json(workout))
}

/// Get one of the caller's workouts
#[utoipa::path(
    get,
    path = "/api/workouts/{id}",
    tag = "Workouts",
    security(("api_key" = [])),
    params(("id" = String, Path, description = "Workout ID")),
    responses(
        (status = 200, description = "Workout with its exercises", body = WorkoutDetail),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Workout belongs to another user"),
        (status = 404, description = "Workout not found")
    )
)]
pub async fn get_workout(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    PathId(id): PathId,
) -> AppResult<Json<WorkoutDetail>> {
    Ok(Json(state.workout_service.get_workout(identity, &id).await?))
}

/// Change the date of a workout
#[utoipa::path(
    put,
    path = "/api/workouts/{id}",
    tag = "Workouts",
    security(("api_key" = [])),
    params(("id" = String, Path, description = "Workout ID")),
    request_body = WorkoutInput,
    responses(
        (status = 200, description = "Workout updated", body = Workout),
        (status = 400, description = "Missing or invalid date"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Workout belongs to another user"),
        (status = 404, description = "Workout not found")
    )
)]
pub async fn update_workout(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    PathId(id): PathId,
    body: DeferredJson<WorkoutInput>,
) -> AppResult<Json<Workout>> {
    let workout = state
        .workout_service
        .update_workout(identity, &id, body.decode())
        .await?;
    Ok(Json(workout))
}

/// Delete a workout and everything logged against it
#[utoipa::path(
    delete,
    path = "/api/workouts/{id}",
    tag = "Workouts",
    security(("api_key" = [])),
    params(("id" = String, Path, description = "Workout ID")),
    responses(
        (status = 200, description = "Deleted workout", body = WorkoutDetail),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Workout belongs to another user"),
        (status = 404, description = "Workout not found")
    )
)]
pub async fn delete_workout(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    PathId(id): PathId,
) -> AppResult<Json<WorkoutDetail>> {
    Ok(Json(state.workout_service.delete_workout(identity, &id).await?))
}

/// Log a completed exercise against a workout
#[utoipa::path(
    post,
    path = "/api/workouts/{id}/completed_exercises",
    tag = "Workouts",
    security(("api_key" = [])),
    params(("id" = String, Path, description = "Workout ID")),
    request_body = CompletedExerciseInput,
    responses(
        (status = 200, description = "Completed exercise stored", body = CompletedExercise),
        (status = 400, description = "Invalid entry or unknown exercise"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Workout belongs to another user"),
        (status = 404, description = "Workout not found")
    )
)]
pub async fn add_completed_exercise(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    PathId(id): PathId,
    body: DeferredJson<CompletedExerciseInput>,
) -> AppResult<Json<CompletedExercise>> {
    let entry = state
        .workout_service
        .add_completed_exercise(identity, &id, body.decode())
        .await?;
    Ok(Json(entry))
}
