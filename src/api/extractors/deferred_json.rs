//! JSON body whose decoding is postponed until the handler asks for it.
//!
//! Workout-scoped handlers must report access failures before body
//! problems, so the body is buffered here and decoded afterwards.

use std::marker::PhantomData;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;
use crate::services::RequestBody;

pub struct DeferredJson<T> {
    bytes: Bytes,
    _target: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> DeferredJson<T> {
    /// Decode the body. A blank body is `Ok(None)`.
    pub fn decode(self) -> RequestBody<T> {
        if self.bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice(&self.bytes)
            .map(Some)
            .map_err(|e| AppError::invalid_input(format!("Invalid JSON body: {}", e)))
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for DeferredJson<T>
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::invalid_input(e.body_text()))?;

        Ok(Self {
            bytes,
            _target: PhantomData,
        })
    }
}
