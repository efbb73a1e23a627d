//! Domain Entities

use chrono::{DateTime, Utc};

use crate::domain::value_objects::Outcome;

/// One line of the append-only access log
///
/// `mode` is the raw value the client sent (empty when absent or
/// unreadable). `username` is the claimed name for CREATE/AUTHENTICATE and the
/// verified token subject for PUSH/PULL, empty when neither is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLogEntry {
    pub timestamp: DateTime<Utc>,
    pub mode: String,
    pub username: String,
    pub outcome: Outcome,
}

impl AccessLogEntry {
    pub fn new(mode: impl Into<String>, username: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            timestamp: Utc::now(),
            mode: mode.into(),
            username: username.into(),
            outcome,
        }
    }
}
