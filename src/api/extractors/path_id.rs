//! Resource id taken from the `:id` path segment.
//!
//! A segment axum cannot decode (e.g. `%FF`) names nothing that could
//! exist, so it is reported as `NotFound` like any other malformed id.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::errors::AppError;

pub struct PathId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => Ok(Self(raw)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Undecodable path id");
                Err(AppError::NotFound)
            }
        }
    }
}
