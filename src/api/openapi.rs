//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, catalog_handler, user_handler, workout_handler};
use crate::domain::{
    CompletedExercise, CompletedExerciseDetail, CompletedExerciseInput, Exercise,
    ExerciseListing, ExerciseSummary, ExerciseType, Muscle, UserResponse, Workout,
    WorkoutDetail, WorkoutInput,
};
use crate::services::LoginResponse;

/// OpenAPI documentation for the workout API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Workout API",
        version = "0.1.0",
        description = "Track workouts and the exercises completed in them"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        user_handler::get_current_user,
        user_handler::list_users,
        user_handler::delete_user,
        catalog_handler::list_muscles,
        catalog_handler::create_muscle,
        catalog_handler::list_exercises,
        catalog_handler::create_exercise,
        workout_handler::list_workouts,
        workout_handler::create_workout,
        workout_handler::get_workout,
        workout_handler::update_workout,
        workout_handler::delete_workout,
        workout_handler::add_completed_exercise,
    ),
    components(
        schemas(
            UserResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            LoginResponse,
            Muscle,
            Exercise,
            ExerciseListing,
            catalog_handler::CreateMuscleRequest,
            catalog_handler::CreateExerciseRequest,
            Workout,
            WorkoutInput,
            WorkoutDetail,
            ExerciseType,
            ExerciseSummary,
            CompletedExercise,
            CompletedExerciseDetail,
            CompletedExerciseInput,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "Accounts and administration"),
        (name = "Catalog", description = "Muscles and exercises"),
        (name = "Workouts", description = "Workouts and completed exercises")
    )
)]
pub struct ApiDoc;

/// Security scheme for the `x-auth-token` header
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "x-auth-token",
                    "Token from POST /api/login or the registration response",
                ))),
            );
        }
    }
}
