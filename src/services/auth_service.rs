//! Authentication service - Registration, login and token handling.
//!
//! Password hashing lives in the domain `PasswordDigest` value object;
//! this service only signs and verifies tokens and orchestrates the
//! user repository.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{PasswordDigest, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub admin: bool,
    pub exp: i64,
    pub iat: i64,
}

/// Body returned by a successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Signed identity token, to be sent back in `x-auth-token`
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub jwt: String,
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and issue a token for it
    async fn register(&self, name: String, email: String, password: String)
        -> AppResult<(User, String)>;

    /// Check credentials and issue a token
    async fn login(&self, email: String, password: String) -> AppResult<String>;

    /// Verify a token and extract its claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

fn issue_token(user: &User, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        admin: user.is_admin(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(token)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> AppResult<(User, String)> {
        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::invalid_input("Email exists already"));
        }

        let digest = PasswordDigest::hash(&password)?.into_string();
        let user = match self.uow.users().create(name, email, digest).await {
            Ok(user) => user,
            Err(e) if e.is_unique_violation() => {
                return Err(AppError::invalid_input("Email exists already"))
            }
            Err(e) => return Err(e),
        };

        tracing::info!(user_id = %user.id, "User registered");
        let token = issue_token(&user, &self.config)?;
        Ok((user, token))
    }

    async fn login(&self, email: String, password: String) -> AppResult<String> {
        let user = self.uow.users().find_by_email(&email).await?;

        // Verify against a dummy digest for unknown emails so both failure
        // paths take the same time.
        let digest = match &user {
            Some(user) => PasswordDigest::from_stored(user.password_digest.clone()),
            None => PasswordDigest::unmatchable(),
        };
        let password_valid = digest.matches(&password);

        match user {
            Some(user) if password_valid => issue_token(&user, &self.config),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
