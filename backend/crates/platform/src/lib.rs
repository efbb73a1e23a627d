//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, HMAC-SHA256, base64url)
//! - The process-wide secret (pepper) holder
//! - Salted + peppered password hashing
//! - A clock abstraction for token expiry

pub mod clock;
pub mod crypto;
pub mod password;
pub mod secret;
