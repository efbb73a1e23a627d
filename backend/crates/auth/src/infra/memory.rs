//! In-Memory Repository Implementation
//!
//! Used when no database is configured, and by the unit tests.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use kernel::username::Username;
use tokio::sync::RwLock;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::error::AuthResult;

/// Process-local account table indexed by username
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Username, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Account>> {
        Ok(self.accounts.read().await.get(username).cloned())
    }

    async fn insert_if_absent(&self, account: &Account) -> AuthResult<bool> {
        // Check and insert under one write guard.
        let mut accounts = self.accounts.write().await;
        match accounts.entry(account.username.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(account.clone());
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::{ClearTextPassword, PasswordHasher};
    use platform::secret::SecretProvider;

    fn account(name: &str) -> Account {
        let hasher = PasswordHasher::new(SecretProvider::new("test-pepper").unwrap());
        Account::register(
            Username::new(name).unwrap(),
            &ClearTextPassword::new("pw"),
            &hasher,
        )
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let repo = InMemoryAccountRepository::new();
        assert!(repo.is_empty().await);

        let alice = account("alice");
        assert!(repo.insert_if_absent(&alice).await.unwrap());

        let found = repo
            .find_by_username(&Username::new("alice").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.salt, alice.salt);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_second_insert_is_refused() {
        let repo = InMemoryAccountRepository::new();
        let first = account("alice");
        let second = account("alice");

        assert!(repo.insert_if_absent(&first).await.unwrap());
        assert!(!repo.insert_if_absent(&second).await.unwrap());

        let stored = repo
            .find_by_username(&first.username)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.salt, first.salt);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryAccountRepository::new();
        let view = repo.clone();
        repo.insert_if_absent(&account("bob")).await.unwrap();
        assert_eq!(view.len().await, 1);
    }
}
