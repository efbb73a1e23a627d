//! Gateway Error Types
//!
//! The dispatcher never surfaces these to clients: every error becomes a
//! `"failed"` envelope after [`GatewayError::log`].

use auth::AuthError;
use thiserror::Error;
use tracking::TrackingError;

/// Gateway-specific result type alias
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Gateway-specific error variants
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Credential store failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Record store failure
    #[error(transparent)]
    Tracking(#[from] TrackingError),

    /// Access log database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Response payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GatewayError {
    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            GatewayError::Auth(e) => e.log(),
            GatewayError::Tracking(e) => e.log(),
            GatewayError::Database(e) => {
                tracing::error!(error = %e, "Gateway database error");
            }
            GatewayError::Serialization(e) => {
                tracing::error!(error = %e, "Gateway serialization error");
            }
        }
    }
}
