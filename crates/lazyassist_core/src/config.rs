//! Runtime configuration from environment variables.
//!
//! # Responsibility
//! - Collect storage, logging and feed settings in one validated value.
//!
//! # Invariants
//! - Every setting has a default except the log directory and news API key,
//!   whose absence disables file logging and the GNews provider.
//! - Validation fails fast; a bad value is never silently replaced.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "LAZYASSIST_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "LAZYASSIST_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "LAZYASSIST_LOG_DIR";
pub const ENV_DEFAULT_LOCATION: &str = "LAZYASSIST_DEFAULT_LOCATION";
pub const ENV_HTTP_TIMEOUT_MS: &str = "LAZYASSIST_HTTP_TIMEOUT_MS";
pub const ENV_GNEWS_API_KEY: &str = "GNEWS_API_KEY";

const DEFAULT_DB_FILE_NAME: &str = "lazyassist.sqlite3";
const DEFAULT_LOCATION: &str = "New York";
const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    RelativeLogDir(String),
    InvalidTimeout(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{ENV_LOG_LEVEL}: {message}"),
            Self::RelativeLogDir(value) => {
                write!(f, "{ENV_LOG_DIR} must be an absolute path, got `{value}`")
            }
            Self::InvalidTimeout(value) => write!(
                f,
                "{ENV_HTTP_TIMEOUT_MS} must be a positive integer, got `{value}`"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Validated assistant settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
    /// Replaces the "current location" weather placeholder.
    pub default_location: String,
    pub http_timeout: Duration,
    /// Enables the GNews provider; curated headlines are used otherwise.
    pub news_api_key: Option<String>,
}

impl AssistantConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = get(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let log_level = match get(ENV_LOG_LEVEL) {
            Some(raw) => normalize_level(&raw).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        let log_dir = match get(ENV_LOG_DIR) {
            Some(raw) => {
                let path = PathBuf::from(&raw);
                if !path.is_absolute() {
                    return Err(ConfigError::RelativeLogDir(raw));
                }
                Some(path)
            }
            None => None,
        };

        let http_timeout_ms = match get(ENV_HTTP_TIMEOUT_MS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(value) if value > 0 => value,
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => DEFAULT_HTTP_TIMEOUT_MS,
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir,
            default_location: get(ENV_DEFAULT_LOCATION)
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            http_timeout: Duration::from_millis(http_timeout_ms),
            news_api_key: get(ENV_GNEWS_API_KEY),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AssistantConfig, ConfigError, ENV_HTTP_TIMEOUT_MS, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::time::Duration;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AssistantConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AssistantConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.default_location, "New York");
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert!(config.log_dir.is_none());
        assert!(config.news_api_key.is_none());
        assert!(config.db_path.ends_with("lazyassist.sqlite3"));
    }

    #[test]
    fn blank_api_key_counts_as_unset() {
        let config = config_from(&[("GNEWS_API_KEY", "   ")]).unwrap();
        assert!(config.news_api_key.is_none());
    }

    #[test]
    fn log_level_is_normalized() {
        let config = config_from(&[(ENV_LOG_LEVEL, " Warning ")]).unwrap();
        assert_eq!(config.log_level, "warn");

        let err = config_from(&[(ENV_LOG_LEVEL, "loud")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }

    #[test]
    fn relative_log_dir_and_zero_timeout_are_rejected() {
        let err = config_from(&[(ENV_LOG_DIR, "logs/dev")]).unwrap_err();
        assert_eq!(err, ConfigError::RelativeLogDir("logs/dev".to_string()));

        let err = config_from(&[(ENV_HTTP_TIMEOUT_MS, "0")]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidTimeout("0".to_string()));
    }
}
