//! Server Configuration
//!
//! Read from the environment after `.env` has been loaded. The pepper is not
//! part of this struct; it goes straight into `platform::secret::SecretProvider`.

use std::net::SocketAddr;

use anyhow::Context;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
pub const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// PostgreSQL URL; in-memory storage when absent
    pub database_url: Option<String>,
    pub frontend_origins: Vec<String>,
    pub token_ttl_secs: Option<u64>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("TRACKER_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("TRACKER_BIND_ADDR must be host:port")?;

        let token_ttl_secs = get("TRACKER_TOKEN_TTL_SECS")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("TRACKER_TOKEN_TTL_SECS must be a whole number of seconds")?;
        if let Some(secs) = token_ttl_secs {
            i64::try_from(secs).context("TRACKER_TOKEN_TTL_SECS is out of range")?;
        }

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL"),
            frontend_origins,
            token_ttl_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr.port(), 31113);
        assert!(config.database_url.is_none());
        assert!(config.token_ttl_secs.is_none());
        assert_eq!(config.frontend_origins.len(), 2);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("TRACKER_BIND_ADDR", "127.0.0.1:8080"),
            ("DATABASE_URL", "postgres://localhost/tracker"),
            ("TRACKER_TOKEN_TTL_SECS", "600"),
            ("FRONTEND_ORIGINS", " https://a.example , ,https://b.example"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/tracker")
        );
        assert_eq!(config.token_ttl_secs, Some(600));
        assert_eq!(
            config.frontend_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_empty_database_url_means_in_memory() {
        assert!(config(&[("DATABASE_URL", "")]).unwrap().database_url.is_none());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(config(&[("TRACKER_BIND_ADDR", "nowhere")]).is_err());
        assert!(config(&[("TRACKER_TOKEN_TTL_SECS", "1h")]).is_err());
    }

    #[test]
    fn test_token_ttl_must_fit_unix_seconds() {
        let max = i64::MAX.to_string();
        assert_eq!(
            config(&[("TRACKER_TOKEN_TTL_SECS", &max)]).unwrap().token_ttl_secs,
            Some(i64::MAX as u64)
        );

        let over = (i64::MAX as u64 + 1).to_string();
        assert!(config(&[("TRACKER_TOKEN_TTL_SECS", &over)]).is_err());
        assert!(config(&[("TRACKER_TOKEN_TTL_SECS", &u64::MAX.to_string())]).is_err());
    }
}
