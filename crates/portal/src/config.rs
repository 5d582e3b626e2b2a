//! Portal configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `PHARMCONNECT_DATA_DIR` - Directory holding the stored session (default: .pharmconnect)
//! - `PHARMCONNECT_LATENCY_MS` - Simulated backend latency in milliseconds (default: 1000)
//! - `PHARMCONNECT_DIRECTORY_FILE` - JSON user directory replacing the built-in one
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

use crate::services::latency::Latency;

const DEFAULT_DATA_DIR: &str = ".pharmconnect";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Portal configuration.
#[derive(Clone)]
pub struct PortalConfig {
    /// Directory the session record is stored in
    pub data_dir: PathBuf,
    /// Delay applied to login and registration
    pub latency: Latency,
    /// User directory file; the built-in directory when unset
    pub directory_file: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<SecretString>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl std::fmt::Debug for PortalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalConfig")
            .field("data_dir", &self.data_dir)
            .field("latency", &self.latency)
            .field("directory_file", &self.directory_file)
            .field(
                "sentry_dsn",
                &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"),
            )
            .field("sentry_environment", &self.sentry_environment)
            .finish()
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            latency: Latency::from_millis(Latency::DEFAULT_MILLIS),
            directory_file: None,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl PortalConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set to an
    /// unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from a variable lookup.
    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("PHARMCONNECT_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let latency_ms = lookup("PHARMCONNECT_LATENCY_MS")
            .map_or(Ok(Latency::DEFAULT_MILLIS), |value| {
                value.trim().parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("PHARMCONNECT_LATENCY_MS".to_string(), e.to_string())
                })
            })?;

        let directory_file = lookup("PHARMCONNECT_DIRECTORY_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let sentry_dsn = lookup("SENTRY_DSN")
            .filter(|dsn| !dsn.is_empty())
            .map(SecretString::from);
        let sentry_environment = lookup("SENTRY_ENVIRONMENT").filter(|env| !env.is_empty());

        Ok(Self {
            data_dir,
            latency: Latency::from_millis(latency_ms),
            directory_file,
            sentry_dsn,
            sentry_environment,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<PortalConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        PortalConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".pharmconnect"));
        assert_eq!(config.latency, Latency::Fixed(Duration::from_secs(1)));
        assert!(config.directory_file.is_none());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PHARMCONNECT_DATA_DIR", "/var/lib/pharmconnect"),
            ("PHARMCONNECT_LATENCY_MS", "0"),
            ("PHARMCONNECT_DIRECTORY_FILE", "users.json"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
            ("SENTRY_ENVIRONMENT", "staging"),
        ])
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/pharmconnect"));
        assert_eq!(config.latency, Latency::None);
        assert_eq!(config.directory_file, Some(PathBuf::from("users.json")));
        assert_eq!(
            config.sentry_dsn.as_ref().unwrap().expose_secret(),
            "https://key@sentry.example.com/1"
        );
        assert_eq!(config.sentry_environment.as_deref(), Some("staging"));
    }

    #[test]
    fn test_invalid_latency() {
        let result = load(&[("PHARMCONNECT_LATENCY_MS", "soon")]);
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(ref key, _)) if key == "PHARMCONNECT_LATENCY_MS"));
    }

    #[test]
    fn test_debug_redacts_dsn() {
        let config = load(&[("SENTRY_DSN", "https://key@sentry.example.com/1")]).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("key@sentry"));
        assert!(debug.contains("[REDACTED]"));
    }
}
