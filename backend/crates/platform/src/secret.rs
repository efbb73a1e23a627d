//! Process-wide Secret (Pepper)
//!
//! A single secret is loaded once at startup and shared, read-only, by the
//! password hasher and the token signer. It is never persisted next to
//! account data, never transmitted and never logged.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use zeroize::Zeroizing;

/// Environment variable holding the pepper
pub const SECRET_ENV_VAR: &str = "TRACKER_PEPPER";

/// Secret loading errors
///
/// Both variants are fatal: the service must refuse to start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    #[error("{0} is not set")]
    Missing(String),

    #[error("{0} is set but empty")]
    Empty(String),
}

/// Read-only holder of the process-wide secret
///
/// Cloning is cheap and shares the same zeroized buffer.
///
/// ## Examples
/// ```rust
/// use platform::secret::SecretProvider;
///
/// let secret = SecretProvider::new("pepper").unwrap();
/// assert_eq!(secret.expose(), b"pepper");
/// assert!(!format!("{:?}", secret).contains("pepper"));
/// ```
#[derive(Clone)]
pub struct SecretProvider {
    secret: Arc<Zeroizing<Vec<u8>>>,
}

impl SecretProvider {
    /// Wrap an explicit secret value
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, SecretError> {
        let secret = Zeroizing::new(secret.into());
        if secret.is_empty() {
            return Err(SecretError::Empty(SECRET_ENV_VAR.to_string()));
        }
        Ok(Self {
            secret: Arc::new(secret),
        })
    }

    /// Load the secret from [`SECRET_ENV_VAR`]
    pub fn from_env() -> Result<Self, SecretError> {
        Self::from_env_var(SECRET_ENV_VAR)
    }

    /// Load the secret from an arbitrary environment variable
    pub fn from_env_var(name: &str) -> Result<Self, SecretError> {
        let value = std::env::var(name).map_err(|_| SecretError::Missing(name.to_string()))?;
        if value.is_empty() {
            return Err(SecretError::Empty(name.to_string()));
        }
        Self::new(value.into_bytes())
    }

    /// Raw secret bytes, for hashing and signing only
    pub fn expose(&self) -> &[u8] {
        self.secret.as_slice()
    }
}

impl fmt::Debug for SecretProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretProvider").field(&"[REDACTED]").finish()
    }
}
