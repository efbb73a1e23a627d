//! Application Layer
//!
//! Credential store and token service.

pub mod config;
pub mod credential_store;
pub mod token_service;

// Re-exports
pub use config::AuthConfig;
pub use credential_store::CredentialStore;
pub use token_service::{IssuedToken, TokenRejection, TokenService, TokenVerification};
