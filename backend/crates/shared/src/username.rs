//! Username Value Object
//!
//! The username is the account's primary key and the subject carried in
//! tokens. Record ownership is keyed by it as well, which is why it lives in
//! the kernel rather than in the `auth` crate.
//!
//! ## 不変条件
//! - 空文字列は不可
//! - 大文字・小文字を区別する（正規化・トリムは一切しない）
//! - 作成後は不変

use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

/// Username validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("Username must not be empty")]
    Empty,
}

/// Case-sensitive, untrimmed account identifier
///
/// Equality is byte equality of the original input: `"Alice"`, `"alice"` and
/// `" alice"` are three different users.
///
/// ## Examples
/// ```rust
/// use kernel::username::Username;
///
/// let name = Username::new("alice").unwrap();
/// assert_eq!(name.as_str(), "alice");
/// assert!(Username::new("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Validate and wrap a username
    pub fn new(raw: impl Into<String>) -> Result<Self, UsernameError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Username({:?})", self.0)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets `HashMap<Username, _>` be queried with a plain `&str`.
impl Borrow<str> for Username {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Username {
    type Error = UsernameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
