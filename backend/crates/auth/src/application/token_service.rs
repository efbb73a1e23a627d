//! Token Service
//!
//! Issues and verifies stateless access tokens:
//!
//! ```text
//! base64url(header) "." base64url(claims) "." base64url(HMAC-SHA256(secret, header "." claims))
//! ```
//!
//! No session table backs a token. Validity depends only on the secret and
//! the clock, so verification is safe to run concurrently from any request.

use kernel::username::Username;
use platform::clock::{Clock, SystemClock};
use platform::crypto::{constant_time_eq, from_base64url, hmac_sha256, to_base64url};
use platform::secret::SecretProvider;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::application::config::AuthConfig;
use crate::domain::value_object::token_claims::{TokenClaims, TokenHeader};

/// A freshly issued token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Why a token was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    #[error("token is not three non-empty dot-separated segments")]
    Malformed,

    #[error("signature mismatch")]
    SignatureMismatch,

    #[error("unsupported or unreadable header")]
    InvalidHeader,

    #[error("payload is not a valid claim set")]
    InvalidPayload,

    #[error("token expired")]
    Expired,
}

/// Outcome of [`TokenService::verify`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenVerification {
    Valid { username: Username, expires_at: i64 },
    Invalid(TokenRejection),
}

impl TokenVerification {
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenVerification::Valid { .. })
    }

    /// Embedded username, only for valid tokens
    pub fn username(&self) -> Option<&Username> {
        match self {
            TokenVerification::Valid { username, .. } => Some(username),
            TokenVerification::Invalid(_) => None,
        }
    }

    pub fn into_username(self) -> Option<Username> {
        match self {
            TokenVerification::Valid { username, .. } => Some(username),
            TokenVerification::Invalid(_) => None,
        }
    }
}

/// HMAC-SHA256 signed token issuer/verifier
pub struct TokenService<C = SystemClock>
where
    C: Clock,
{
    secret: SecretProvider,
    ttl_secs: i64,
    clock: C,
}

impl TokenService<SystemClock> {
    pub fn new(secret: SecretProvider, config: &AuthConfig) -> Self {
        Self::with_clock(secret, config, SystemClock)
    }
}

impl<C> TokenService<C>
where
    C: Clock,
{
    pub fn with_clock(secret: SecretProvider, config: &AuthConfig, clock: C) -> Self {
        Self {
            secret,
            ttl_secs: config.token_ttl_secs(),
            clock,
        }
    }

    /// Issue a token for `username`, valid from now for the configured TTL
    pub fn issue(&self, username: &Username) -> IssuedToken {
        let claims = TokenClaims::new(username, self.clock.now_unix(), self.ttl_secs);

        let header_b64 = encode_segment(&TokenHeader::hs256());
        let claims_b64 = encode_segment(&claims);
        let signing_input = format!("{header_b64}.{claims_b64}");
        let signature_b64 = self.sign(&signing_input);

        tracing::debug!(username = %username, expires_at = claims.exp, "Token issued");

        IssuedToken {
            token: format!("{signing_input}.{signature_b64}"),
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }

    /// Verify a token
    ///
    /// Never panics on hostile input; every failure is reported as
    /// [`TokenVerification::Invalid`].
    pub fn verify(&self, token: &str) -> TokenVerification {
        match self.check(token) {
            Ok(claims) => match Username::new(claims.username) {
                Ok(username) => TokenVerification::Valid {
                    username,
                    expires_at: claims.exp,
                },
                Err(_) => TokenVerification::Invalid(TokenRejection::InvalidPayload),
            },
            Err(rejection) => {
                match rejection {
                    TokenRejection::SignatureMismatch | TokenRejection::InvalidHeader => {
                        tracing::warn!(reason = %rejection, "Token rejected");
                    }
                    _ => tracing::debug!(reason = %rejection, "Token rejected"),
                }
                TokenVerification::Invalid(rejection)
            }
        }
    }

    fn check(&self, token: &str) -> Result<TokenClaims, TokenRejection> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenRejection::Malformed);
        };
        if header_b64.is_empty() || claims_b64.is_empty() || signature_b64.is_empty() {
            return Err(TokenRejection::Malformed);
        }

        // Signature first: nothing inside an unauthenticated token is parsed.
        let expected = self.sign(&format!("{header_b64}.{claims_b64}"));
        if !constant_time_eq(expected.as_bytes(), signature_b64.as_bytes()) {
            return Err(TokenRejection::SignatureMismatch);
        }

        let header: TokenHeader =
            decode_segment(header_b64).ok_or(TokenRejection::InvalidHeader)?;
        if !header.is_supported() {
            return Err(TokenRejection::InvalidHeader);
        }

        let claims: TokenClaims =
            decode_segment(claims_b64).ok_or(TokenRejection::InvalidPayload)?;
        if claims.is_expired_at(self.clock.now_unix()) {
            return Err(TokenRejection::Expired);
        }

        Ok(claims)
    }

    fn sign(&self, signing_input: &str) -> String {
        to_base64url(&hmac_sha256(self.secret.expose(), signing_input.as_bytes()))
    }
}

fn encode_segment<T: serde::Serialize>(value: &T) -> String {
    // Plain structs of strings and integers cannot fail to serialize.
    let json = serde_json::to_vec(value).unwrap_or_default();
    to_base64url(&json)
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Option<T> {
    let bytes = from_base64url(segment).ok()?;
    serde_json::from_slice(&bytes).ok()
}
