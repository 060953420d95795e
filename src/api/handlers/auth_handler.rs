//! Registration and login handlers.

use axum::{
    extract::State,
    http::{HeaderName, HeaderValue},
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::AUTH_TOKEN_HEADER;
use crate::domain::UserResponse;
use crate::errors::{AppError, AppResult};
use crate::services::LoginResponse;

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Display name, 3 to 50 characters
    #[validate(length(min = 3, max = 50, message = "name must be 3 to 50 characters"))]
    #[schema(example = "bob", min_length = 3, max_length = 50)]
    pub name: String,
    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    #[schema(example = "bob@example.com", max_length = 255)]
    pub email: String,
    /// Password (minimum 6 characters)
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    #[schema(example = "123456", min_length = 6)]
    pub password: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "bob@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "123456")]
    pub password: String,
}

/// Login route. Registration is mounted with the user routes.
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/", post(login))
}

/// Register a new user
///
/// The signed token is returned in the `x-auth-token` response header.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered", body = UserResponse,
            headers(("x-auth-token" = String, description = "Signed identity token"))),
        (status = 400, description = "Validation error or email already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<([(HeaderName, HeaderValue); 1], Json<UserResponse>)> {
    let (user, token) = state
        .auth_service
        .register(payload.name, payload.email, payload.password)
        .await?;

    let token = HeaderValue::from_str(&token)
        .map_err(|e| AppError::internal(format!("token is not a valid header value: {}", e)))?;

    Ok((
        [(HeaderName::from_static(AUTH_TOKEN_HEADER), token)],
        Json(UserResponse::from(user)),
    ))
}

/// Login and get a token
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error or invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let jwt = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(LoginResponse { jwt }))
}
