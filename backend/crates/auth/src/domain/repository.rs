//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::account::Account;
use crate::error::AuthResult;
use kernel::username::Username;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Find account by exact, case-sensitive username
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Account>>;

    /// Insert the account unless its username is already taken
    ///
    /// The existence check and the insert are a single atomic step: of two
    /// concurrent calls for the same username at most one returns `true`.
    /// Returns `false` without touching the stored account when taken.
    async fn insert_if_absent(&self, account: &Account) -> AuthResult<bool>;
}
