//! Token Header and Claims
//!
//! The two JSON documents carried by an access token. Field order is fixed
//! by the struct definitions, so serializing the same values always yields
//! the same bytes, which keeps signatures reproducible.

use kernel::username::Username;
use serde::{Deserialize, Serialize};

/// Only supported signing algorithm
pub const TOKEN_ALGORITHM: &str = "HS256";

/// Token type marker
pub const TOKEN_TYPE: &str = "JWT";

/// Token header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

impl TokenHeader {
    pub fn hs256() -> Self {
        Self {
            alg: TOKEN_ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.alg == TOKEN_ALGORITHM
    }
}

/// Signed claims: subject plus validity window (Unix seconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    /// `exp` saturates at `i64::MAX` for very long lifetimes
    pub fn new(username: &Username, issued_at: i64, ttl_secs: i64) -> Self {
        Self {
            username: username.as_str().to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(ttl_secs),
        }
    }

    /// Expired strictly after `exp`
    pub fn is_expired_at(&self, now_unix: i64) -> bool {
        now_unix > self.exp
    }
}
