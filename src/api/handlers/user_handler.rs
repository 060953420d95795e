//! User account handlers.

use axum::{
    extract::{Path, State},
    middleware,
    response::Json,
    routing::{delete, get, post},
    Extension, Router,
};

use super::auth_handler::register;
use crate::api::middleware::auth_middleware;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::Identity;

/// User routes. Registration is public, everything else needs a token.
pub fn user_routes(state: AppState) -> Router<AppState> {
    let auth = middleware::from_fn_with_state(state, auth_middleware);

    Router::new()
        .route(
            "/",
            get(list_users)
                .route_layer(auth.clone())
                .merge(post(register)),
        )
        .route("/me", get(get_current_user).route_layer(auth.clone()))
        .route("/:id", delete(delete_user).route_layer(auth))
}

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Account no longer exists")
    )
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.current_user(identity).await?;
    Ok(Json(UserResponse::from(user)))
}

/// List all users ordered by name (admin only)
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("api_key" = [])),
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Administrator rights required")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list_users(identity).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Delete a user and everything they logged (admin only)
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    security(("api_key" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Deleted user", body = UserResponse),
        (status = 400, description = "Administrators cannot delete themselves"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Administrator rights required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.delete_user(identity, &id).await?;
    Ok(Json(UserResponse::from(user)))
}
