//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Default token lifetime (1 hour)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Auth application configuration
///
/// The pepper is deliberately not part of this struct: it is held by
/// `platform::secret::SecretProvider` and injected separately.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Validity window of issued tokens
    pub token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }
}

impl AuthConfig {
    pub fn with_token_ttl_secs(secs: u64) -> Self {
        Self {
            token_ttl: Duration::from_secs(secs),
        }
    }

    /// Get token TTL in seconds, clamped to `i64::MAX`
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }
}
