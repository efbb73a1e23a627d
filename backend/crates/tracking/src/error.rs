//! Tracking Error Types
//!
//! Rejected pushes are `Ok(false)`, not errors. [`TrackingError`] covers only
//! storage failures.

use thiserror::Error;

/// Tracking-specific result type alias
pub type TrackingResult<T> = Result<T, TrackingError>;

/// Tracking-specific error variants
#[derive(Debug, Error)]
pub enum TrackingError {
    /// Stored row could not be turned back into an entity
    #[error("Corrupt stage record: {0}")]
    CorruptRecord(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl TrackingError {
    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            TrackingError::Database(e) => {
                tracing::error!(error = %e, "Tracking database error");
            }
            TrackingError::CorruptRecord(msg) => {
                tracing::error!(message = %msg, "Tracking corrupt record");
            }
        }
    }
}
