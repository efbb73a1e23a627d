//! Credential Store
//!
//! Creates accounts and checks passwords against them.

use std::sync::Arc;

use kernel::username::Username;
use platform::password::{ClearTextPassword, PasswordHasher};

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::error::AuthResult;

/// Credential store over an [`AccountRepository`]
///
/// Returns `Ok(false)` for every validation or credential failure; `Err` is
/// reserved for the repository failing.
pub struct CredentialStore<R>
where
    R: AccountRepository,
{
    account_repo: Arc<R>,
    hasher: PasswordHasher,
}

impl<R> CredentialStore<R>
where
    R: AccountRepository,
{
    pub fn new(account_repo: Arc<R>, hasher: PasswordHasher) -> Self {
        Self {
            account_repo,
            hasher,
        }
    }

    /// Register a new account
    ///
    /// `false` when the username is empty or already registered; the stored
    /// account is left untouched in both cases.
    pub async fn create(&self, username: &str, password: &ClearTextPassword) -> AuthResult<bool> {
        let Ok(username) = Username::new(username) else {
            tracing::debug!("Create rejected: empty username");
            return Ok(false);
        };

        let account = Account::register(username, password, &self.hasher);
        let inserted = self.account_repo.insert_if_absent(&account).await?;

        if inserted {
            tracing::info!(username = %account.username, "Account created");
        } else {
            tracing::debug!(username = %account.username, "Create rejected: username taken");
        }

        Ok(inserted)
    }

    /// Check a username/password pair
    ///
    /// Unknown usernames and wrong passwords both yield `false`.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &ClearTextPassword,
    ) -> AuthResult<bool> {
        let Some(account) = self.find_by_username(username).await? else {
            tracing::warn!("Invalid login attempt");
            return Ok(false);
        };

        let valid = account.verify_password(password, &self.hasher);
        if valid {
            tracing::info!(username = %account.username, "Account authenticated");
        } else {
            tracing::warn!("Invalid login attempt");
        }

        Ok(valid)
    }

    /// Exact, case-sensitive lookup
    pub async fn find_by_username(&self, username: &str) -> AuthResult<Option<Account>> {
        let Ok(username) = Username::new(username) else {
            return Ok(None);
        };
        self.account_repo.find_by_username(&username).await
    }
}
