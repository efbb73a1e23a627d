//! Password Hashing and Verification
//!
//! Salted and peppered SHA-256:
//!
//! ```text
//! digest = lowercase-hex(SHA-256(password ++ salt ++ pepper))
//! ```
//!
//! - The salt is per-account, random, and stored next to the digest
//! - The pepper is the process-wide [`SecretProvider`] value, never stored
//! - Clear text passwords are zeroized on drop and redacted in `Debug`
//! - Digest comparison is constant-time

use std::fmt;

use thiserror::Error;
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{constant_time_eq, sha256_hex_concat};
use crate::secret::SecretProvider;

/// Length of a hex-encoded SHA-256 digest
pub const DIGEST_HEX_LENGTH: usize = 64;

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised when restoring stored credential material
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordHashError {
    /// Stored digest is not 64 lowercase hex characters
    #[error("Invalid password digest format")]
    InvalidDigestFormat,

    /// Stored salt is empty
    #[error("Invalid salt: must not be empty")]
    EmptySalt,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// No strength policy is applied: the credential store accepts whatever the
/// client registered with.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Salt
// ============================================================================

/// Per-account salt
///
/// Generated as a random UUID v4 string at account creation.
#[derive(Clone, PartialEq, Eq)]
pub struct Salt(String);

impl Salt {
    /// Generate a fresh random salt
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Restore a salt read from storage
    pub fn from_stored(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let s = s.into();
        if s.is_empty() {
            return Err(PasswordHashError::EmptySalt);
        }
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Salt").field(&"[SALT]").finish()
    }
}

// ============================================================================
// Password Digest (Safe to store)
// ============================================================================

/// Hex-encoded SHA-256 digest of password, salt and pepper
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Restore a digest read from storage
    pub fn from_hex(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let s = s.into();
        let well_formed = s.len() == DIGEST_HEX_LENGTH
            && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if !well_formed {
            return Err(PasswordHashError::InvalidDigestFormat);
        }
        Ok(Self(s))
    }

    /// Get the hex string for storage
    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// Constant-time equality
    pub fn ct_eq(&self, other: &PasswordDigest) -> bool {
        constant_time_eq(self.0.as_bytes(), other.0.as_bytes())
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordDigest").field(&"[HASH]").finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// Deterministic password hasher bound to the process-wide pepper
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, PasswordHasher, Salt};
/// use platform::secret::SecretProvider;
///
/// let hasher = PasswordHasher::new(SecretProvider::new("pepper").unwrap());
/// let salt = Salt::generate();
/// let password = ClearTextPassword::new("secret1");
///
/// let digest = hasher.hash(&password, &salt);
/// assert!(hasher.verify(&password, &salt, &digest));
/// ```
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    pepper: SecretProvider,
}

impl PasswordHasher {
    pub fn new(pepper: SecretProvider) -> Self {
        Self { pepper }
    }

    /// Hash a password with the given salt and the pepper
    pub fn hash(&self, password: &ClearTextPassword, salt: &Salt) -> PasswordDigest {
        PasswordDigest(sha256_hex_concat(&[
            password.as_bytes(),
            salt.as_str().as_bytes(),
            self.pepper.expose(),
        ]))
    }

    /// Recompute the digest and compare it in constant time
    pub fn verify(
        &self,
        password: &ClearTextPassword,
        salt: &Salt,
        expected: &PasswordDigest,
    ) -> bool {
        self.hash(password, salt).ct_eq(expected)
    }
}

// ============================================================================
// Tests
// ============================================================================
