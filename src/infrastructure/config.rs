use std::env;
use std::fmt;
use std::time::Duration;

use crate::infrastructure::tmdb_client::DEFAULT_BASE_URL;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub session_secret: String,
    pub port: u16,
    pub environment: Environment,
    pub catalog_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} environment variable is required", key),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let environment = match get("ENVIRONMENT").as_deref() {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        };

        Ok(Self {
            database_url: require("DATABASE_URL")?,
            tmdb_api_key: require("TMDB_API_KEY")?,
            session_secret: require("SESSION_SECRET")?,
            tmdb_base_url: get("TMDB_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            port: get("PORT").and_then(|p| p.parse().ok()).unwrap_or(8080),
            environment,
            catalog_timeout: Duration::from_secs(
                get("CATALOG_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DATABASE_URL", "sqlite::memory:"),
        ("TMDB_API_KEY", "key"),
        ("SESSION_SECRET", "secret"),
    ];

    #[test]
    fn defaults_apply_when_optional_keys_are_absent() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.tmdb_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.catalog_timeout, Duration::from_secs(10));
        assert!(!config.is_production());
    }

    #[test]
    fn optional_keys_override_defaults() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("PORT", "9000"),
            ("ENVIRONMENT", "production"),
            ("CATALOG_TIMEOUT_SECS", "3"),
        ]);
        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.port, 9000);
        assert!(config.is_production());
        assert_eq!(config.catalog_timeout, Duration::from_secs(3));
    }

    #[test]
    fn each_required_key_is_reported_when_missing() {
        for missing in ["DATABASE_URL", "TMDB_API_KEY", "SESSION_SECRET"] {
            let pairs: Vec<(&str, &str)> = REQUIRED
                .iter()
                .copied()
                .filter(|(k, _)| *k != missing)
                .collect();
            let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
            assert_eq!(err, ConfigError::Missing(missing));
        }
    }

    #[test]
    fn empty_required_value_counts_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs[1] = ("TMDB_API_KEY", "");
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("TMDB_API_KEY"));
    }

    #[test]
    fn unparseable_port_falls_back_to_default() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "eighty"));
        assert_eq!(Config::from_lookup(lookup(&pairs)).unwrap().port, 8080);
    }
}
