//! Token authentication middleware.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::{AUTH_TOKEN_HEADER, BEARER_TOKEN_PREFIX};
use crate::errors::AppError;
use crate::services::authenticate;

/// Token from `x-auth-token`, falling back to `Authorization: Bearer`.
fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        })
}

/// Authentication middleware.
///
/// Verifies the request token and injects the caller's `Identity` into the
/// request extensions. Runs before path or body extraction, so a missing
/// token wins over every other failure.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = authenticate(
        state.auth_service.as_ref(),
        token_from_headers(request.headers()),
    )?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}
