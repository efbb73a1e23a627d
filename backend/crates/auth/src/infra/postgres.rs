//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::username::Username;
use platform::password::{PasswordDigest, Salt};
use sqlx::PgPool;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for PgAccountRepository {
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                username,
                password_digest,
                salt,
                created_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn insert_if_absent(&self, account: &Account) -> AuthResult<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO accounts (
                username,
                password_digest,
                salt,
                created_at
            ) VALUES ($1, $2, $3, $4)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(account.username.as_str())
        .bind(account.password_digest.as_hex())
        .bind(account.salt.as_str())
        .bind(account.created_at)
        .execute(&self.pool)
        .await?
        .rows_affected()
            == 1;

        Ok(inserted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    username: String,
    password_digest: String,
    salt: String,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AuthResult<Account> {
        let username = Username::new(self.username)
            .map_err(|e| AuthError::CorruptAccount(format!("Invalid username: {}", e)))?;

        Ok(Account {
            username,
            password_digest: PasswordDigest::from_hex(self.password_digest)?,
            salt: Salt::from_stored(self.salt)?,
            created_at: self.created_at,
        })
    }
}
