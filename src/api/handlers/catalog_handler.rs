//! Muscle and exercise catalog handlers.

use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::auth_middleware;
use crate::api::AppState;
use crate::domain::{Exercise, ExerciseListing, Muscle};
use crate::errors::AppResult;
use crate::services::Identity;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMuscleRequest {
    #[validate(length(min = 1, max = 50, message = "name must be 1 to 50 characters"))]
    #[schema(example = "chest", max_length = 50)]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateExerciseRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    #[schema(example = "bench press", max_length = 100)]
    pub name: String,
    /// Muscle trained by the exercise
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub muscle_id: String,
}

/// Muscle routes; reads are public, writes need a token
pub fn muscle_routes(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, auth_middleware);
    Router::new().route(
        "/",
        post(create_muscle).route_layer(auth).merge(get(list_muscles)),
    )
}

/// Exercise routes; reads are public, writes need a token
pub fn exercise_routes(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, auth_middleware);
    Router::new().route(
        "/",
        post(create_exercise)
            .route_layer(auth)
            .merge(get(list_exercises)),
    )
}

/// List muscles ordered by name
#[utoipa::path(
    get,
    path = "/api/muscles",
    tag = "Catalog",
    responses((status = 200, description = "All muscles", body = Vec<Muscle>))
)]
pub async fn list_muscles(State(state): State<AppState>) -> AppResult<Json<Vec<Muscle>>> {
    Ok(Json(state.catalog_service.list_muscles().await?))
}

/// Add a muscle (admin only)
#[utoipa::path(
    post,
    path = "/api/muscles",
    tag = "Catalog",
    security(("api_key" = [])),
    request_body = CreateMuscleRequest,
    responses(
        (status = 200, description = "Muscle created", body = Muscle),
        (status = 400, description = "Invalid or duplicate name"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Administrator rights required")
    )
)]
pub async fn create_muscle(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    ValidatedJson(payload): ValidatedJson<CreateMuscleRequest>,
) -> AppResult<Json<Muscle>> {
    let muscle = state
        .catalog_service
        .create_muscle(identity, payload.name)
        .await?;
    Ok(Json(muscle))
}

/// List exercises with the muscle each one trains
#[utoipa::path(
    get,
    path = "/api/exercises",
    tag = "Catalog",
    responses((status = 200, description = "All exercises", body = Vec<ExerciseListing>))
)]
pub async fn list_exercises(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ExerciseListing>>> {
    Ok(Json(state.catalog_service.list_exercises().await?))
}

/// Add an exercise (admin only)
#[utoipa::path(
    post,
    path = "/api/exercises",
    tag = "Catalog",
    security(("api_key" = [])),
    request_body = CreateExerciseRequest,
    responses(
        (status = 200, description = "Exercise created", body = Exercise),
        (status = 400, description = "Invalid name or unknown muscle"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Administrator rights required")
    )
)]
pub async fn create_exercise(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    ValidatedJson(payload): ValidatedJson<CreateExerciseRequest>,
) -> AppResult<Json<Exercise>> {
    let exercise = state
        .catalog_service
        .create_exercise(identity, payload.name, &payload.muscle_id)
        .await?;
    Ok(Json(exercise))
}
