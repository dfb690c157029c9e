//! Application configuration.
//!
//! Settings are read from a JSON file (`--config <path>` or
//! `<config dir>/iftar/config.json`). Every field has a serde default, so a
//! partial file or no file at all yields a usable configuration. Command-line
//! flags are applied on top by the CLI.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Coordinates, Language};

/// Default endpoint for the IP-based country lookup.
pub const DEFAULT_COUNTRY_LOOKUP_URL: &str = "http://ip-api.com/json/?fields=status,countryCode";

/// Default base URL of the prayer-times service.
pub const DEFAULT_PRAYER_TIMES_URL: &str = "https://api.aladhan.com";

fn default_country_lookup_url() -> String {
    DEFAULT_COUNTRY_LOOKUP_URL.to_string()
}

fn default_prayer_times_url() -> String {
    DEFAULT_PRAYER_TIMES_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_notifications() -> bool {
    true
}

/// Errors raised while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// External service endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Full URL of the IP geolocation lookup.
    #[serde(default = "default_country_lookup_url")]
    pub country_lookup_url: String,

    /// Base URL of the prayer-times service (without `/v1/timings`).
    #[serde(default = "default_prayer_times_url")]
    pub prayer_times_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            country_lookup_url: default_country_lookup_url(),
            prayer_times_url: default_prayer_times_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Top-level configuration.
///
/// # Example
///
/// ```
/// use iftar::config::AppConfig;
///
/// let config: AppConfig = serde_json::from_str(r#"{ "latitude": 41.0, "longitude": 29.0 }"#).unwrap();
/// assert!(config.notifications);
/// assert_eq!(config.coordinates().unwrap().latitude, 41.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    /// Country code that bypasses the IP lookup.
    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub language: Language,

    /// Whether boundary notifications may be shown at all.
    #[serde(default = "default_notifications")]
    pub notifications: bool,

    #[serde(default)]
    pub service: ServiceConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            country: None,
            language: Language::default(),
            notifications: default_notifications(),
            service: ServiceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Returns the default config file location, if a config dir exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("iftar").join("config.json"))
    }

    /// Loads configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads from `path` if given, else from the default location when that
    /// file exists, else returns defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a selected file cannot be read or parsed.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(default) if default.exists() => Self::load(&default),
            _ => Ok(Self::default()),
        }
    }

    /// Returns the configured coordinates when both halves are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is zero or the country override is
    /// not a two-letter code.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "service.timeout_seconds must be at least 1".to_string(),
            ));
        }
        if let Some(country) = &self.country {
            if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ConfigError::Invalid(format!(
                    "country must be a two-letter code, got '{country}'"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.coordinates().is_none());
        assert!(config.notifications);
        assert_eq!(config.language, Language::En);
        assert_eq!(config.service.prayer_times_url, DEFAULT_PRAYER_TIMES_URL);
        assert_eq!(config.service.country_lookup_url, DEFAULT_COUNTRY_LOOKUP_URL);
        assert_eq!(config.service.timeout_seconds, 10);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "language": "ru", "service": { "timeout_seconds": 3 } }"#)
                .unwrap();
        assert_eq!(config.language, Language::Ru);
        assert_eq!(config.service.timeout_seconds, 3);
        assert_eq!(config.service.prayer_times_url, DEFAULT_PRAYER_TIMES_URL);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "latitude": 55.75, "longitude": 37.61, "country": "RU", "notifications": false }}"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.coordinates(), Some(Coordinates::new(55.75, 37.61)));
        assert_eq!(config.country.as_deref(), Some("RU"));
        assert!(!config.notifications);
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/iftar.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_country() {
        let config = AppConfig {
            country: Some("TUR".to_string()),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.service.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
