//! Account Entity
//!
//! Login credentials for one username. Accounts are written once at
//! creation and never updated or deleted.

use chrono::{DateTime, Utc};
use kernel::username::Username;
use platform::password::{ClearTextPassword, PasswordDigest, PasswordHasher, Salt};

/// Account entity
///
/// The salt and digest never leave the credential store; `Debug` output of
/// both is redacted.
#[derive(Debug, Clone)]
pub struct Account {
    /// Primary key (case-sensitive, immutable)
    pub username: Username,
    /// `SHA-256(password ++ salt ++ pepper)` as lowercase hex
    pub password_digest: PasswordDigest,
    /// Per-account random salt
    pub salt: Salt,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a freshly generated salt
    pub fn register(
        username: Username,
        password: &ClearTextPassword,
        hasher: &PasswordHasher,
    ) -> Self {
        let salt = Salt::generate();
        let password_digest = hasher.hash(password, &salt);

        Self {
            username,
            password_digest,
            salt,
            created_at: Utc::now(),
        }
    }

    /// Check a login attempt against the stored digest
    pub fn verify_password(&self, password: &ClearTextPassword, hasher: &PasswordHasher) -> bool {
        hasher.verify(password, &self.salt, &self.password_digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::secret::SecretProvider;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(SecretProvider::new("test-pepper").unwrap())
    }

    #[test]
    fn test_register_then_verify() {
        let h = hasher();
        let account = Account::register(
            Username::new("alice").unwrap(),
            &ClearTextPassword::new("secret1"),
            &h,
        );

        assert!(account.verify_password(&ClearTextPassword::new("secret1"), &h));
        assert!(!account.verify_password(&ClearTextPassword::new("secret2"), &h));
    }

    #[test]
    fn test_same_password_gets_distinct_digests() {
        let h = hasher();
        let a = Account::register(
            Username::new("a").unwrap(),
            &ClearTextPassword::new("same"),
            &h,
        );
        let b = Account::register(
            Username::new("b").unwrap(),
            &ClearTextPassword::new("same"),
            &h,
        );

        assert_ne!(a.salt, b.salt);
        assert_ne!(a.password_digest, b.password_digest);
    }
}
