//! Password digest value object.
//!
//! Users never store plain text; the `password_digest` column holds a
//! PHC-formatted argon2 string produced here.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Well-formed digest that matches no password. Verified against when the
/// login email is unknown so both failure paths cost one argon2 run.
const UNMATCHABLE_DIGEST: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$Ci63PoO7oO0MyWtCRQClaaSdp2YsoNbodwz3v7C1EeQ";

/// Hashed password as persisted on a user.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest([REDACTED])")
    }
}

impl PasswordDigest {
    /// Hash a plain-text password with a fresh salt.
    ///
    /// # Errors
    /// `InvalidInput` if the password is shorter than `MIN_PASSWORD_LENGTH`.
    pub fn hash(plain_text: &str) -> AppResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let digest = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;

        Ok(Self(digest.to_string()))
    }

    /// Wrap a digest loaded from storage.
    pub fn from_stored(digest: String) -> Self {
        Self(digest)
    }

    /// Digest that rejects every password.
    pub fn unmatchable() -> Self {
        Self(UNMATCHABLE_DIGEST.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Check a plain-text candidate. Malformed digests never match.
    pub fn matches(&self, candidate: &str) -> bool {
        match PasswordHash::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password digest is malformed");
                false
            }
        }
    }
}
