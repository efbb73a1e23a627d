//! Domain Value Objects

use std::fmt;

use serde::Serialize;

/// Operation selected by the request's `mode` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Create,
    Authenticate,
    Push,
    Pull,
}

impl RequestMode {
    /// Exact, case-sensitive match on the wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CREATE" => Some(RequestMode::Create),
            "AUTHENTICATE" => Some(RequestMode::Authenticate),
            "PUSH" => Some(RequestMode::Push),
            "PULL" => Some(RequestMode::Pull),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMode::Create => "CREATE",
            RequestMode::Authenticate => "AUTHENTICATE",
            RequestMode::Push => "PUSH",
            RequestMode::Pull => "PULL",
        }
    }
}

impl fmt::Display for RequestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one dispatched request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failed => "failed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_is_exact() {
        for mode in [
            RequestMode::Create,
            RequestMode::Authenticate,
            RequestMode::Push,
            RequestMode::Pull,
        ] {
            assert_eq!(RequestMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(RequestMode::parse("create"), None);
        assert_eq!(RequestMode::parse(" PUSH"), None);
        assert_eq!(RequestMode::parse(""), None);
    }

    #[test]
    fn test_outcome_wire_name() {
        assert_eq!(
            serde_json::to_string(&Outcome::Success).unwrap(),
            r#""success""#
        );
        assert_eq!(Outcome::Failed.to_string(), "failed");
    }
}
