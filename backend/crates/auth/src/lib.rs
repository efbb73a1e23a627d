//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Account entity, token claims, repository trait
//! - `application/` - Credential store and token service
//! - `infra/` - In-memory and PostgreSQL account storage
//!
//! ## Security Model
//! - Passwords stored as `SHA-256(password ++ salt ++ pepper)`, salt per account
//! - Tokens are stateless HMAC-SHA256 signed claims; no session table
//! - Unknown usernames and wrong passwords are indistinguishable to callers
//! - The pepper lives only in `platform::secret::SecretProvider`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::{
    AuthConfig, CredentialStore, IssuedToken, TokenRejection, TokenService, TokenVerification,
};
pub use domain::{Account, AccountRepository};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAccountRepository, PgAccountRepository};
