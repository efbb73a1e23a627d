//! Auth Error Types
//!
//! Validation and credential failures are not errors here: the credential
//! store answers them with `Ok(false)` so that "unknown user" and "wrong
//! password" stay indistinguishable. [`AuthError`] covers only the failures
//! of the storage behind it.

use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Stored account row could not be turned back into an entity
    #[error("Corrupt account record: {0}")]
    CorruptAccount(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AuthError {
    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::CorruptAccount(msg) => {
                tracing::error!(message = %msg, "Auth corrupt account record");
            }
        }
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::CorruptAccount(err.to_string())
    }
}
