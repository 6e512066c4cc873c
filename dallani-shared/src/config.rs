//! # Configuration
//!
//! Client settings shared by the CLI and the web dashboard. Native builds
//! load them from defaults, an optional file, the environment and finally a
//! command-line override, in that order of increasing precedence.

use crate::query::debounce::{DEFAULT_DEBOUNCE, MIN_DEBOUNCE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// API root used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Environment variable overriding [`ClientConfig::api_url`].
pub const ENV_API_URL: &str = "DALLANI_API_URL";
/// Environment variable overriding [`ClientConfig::search_debounce_ms`].
pub const ENV_SEARCH_DEBOUNCE_MS: &str = "DALLANI_SEARCH_DEBOUNCE_MS";
/// Environment variable overriding [`ClientConfig::log_level`].
pub const ENV_LOG_LEVEL: &str = "DALLANI_LOG_LEVEL";
/// Environment variable overriding [`ClientConfig::log_format`].
pub const ENV_LOG_FORMAT: &str = "DALLANI_LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::EnumString, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be parsed
    #[error("failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    /// Extension other than yaml, yml, json or toml
    #[error("unsupported configuration format '{0}', use yaml, json or toml")]
    UnsupportedFormat(String),

    /// An environment variable holds an unusable value
    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },

    /// A setting is out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Settings of an admin client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root, e.g. `http://localhost:3000/api`
    pub api_url: String,

    /// Delay before a typed server-side search is sent
    pub search_debounce_ms: u64,

    /// Default tracing filter; `RUST_LOG` wins when set
    pub log_level: String,

    pub log_format: LogFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ClientConfig {
    /// Generates a default configuration.
    pub fn with_defaults() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            search_debounce_ms: u64::try_from(DEFAULT_DEBOUNCE.as_millis()).unwrap_or(500),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }

    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Checks the API URL and the debounce floor.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] describing the first bad setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.api_url)
            .map_err(|err| ConfigError::Invalid(format!("api_url '{}': {err}", self.api_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "api_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.search_debounce() < MIN_DEBOUNCE {
            return Err(ConfigError::Invalid(format!(
                "search_debounce_ms must be at least {} ms, got {}",
                MIN_DEBOUNCE.as_millis(),
                self.search_debounce_ms
            )));
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod loader {
    use super::{
        ClientConfig, ConfigError, ENV_API_URL, ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_SEARCH_DEBOUNCE_MS,
    };
    use std::path::Path;
    use std::{env, fs};

    impl ClientConfig {
        /// Loads the configuration from a file, environment variables, or defaults.
        ///
        /// # Arguments
        /// * `config_path` - Optional path to a `.yaml`, `.yml`, `.json` or `.toml` file
        /// * `api_url_override` - Optional API root taking precedence over everything
        ///
        /// # Errors
        /// Returns a [`ConfigError`] when the file cannot be read or parsed, an
        /// environment value is malformed, or the result fails validation.
        pub fn load(config_path: Option<&Path>, api_url_override: Option<&str>) -> Result<Self, ConfigError> {
            let mut config = match config_path {
                Some(path) => Self::from_file(path)?,
                None => Self::with_defaults(),
            };

            config.apply_env()?;

            if let Some(api_url) = api_url_override {
                config.api_url = api_url.to_string();
            }

            config.validate()?;
            Ok(config)
        }

        /// Parses a configuration file; missing fields take their defaults.
        ///
        /// # Errors
        /// Returns a [`ConfigError`] when the file cannot be read or parsed.
        pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
            let display = path.display().to_string();
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: display.clone(),
                source,
            })?;
            let parse_error = |message: String| ConfigError::Parse {
                path: display.clone(),
                message,
            };
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("yaml" | "yml") => serde_yml::from_str(&content).map_err(|err| parse_error(err.to_string())),
                Some("json") => serde_json::from_str(&content).map_err(|err| parse_error(err.to_string())),
                Some("toml") => toml::from_str(&content).map_err(|err| parse_error(err.to_string())),
                other => Err(ConfigError::UnsupportedFormat(other.unwrap_or_default().to_string())),
            }
        }

        /// Serializes the configuration in the format implied by `path`.
        ///
        /// # Errors
        /// Returns a [`ConfigError`] for unknown extensions or write failures.
        pub fn write_to(&self, path: &Path) -> Result<(), ConfigError> {
            let display = path.display().to_string();
            let rendered = match path.extension().and_then(|ext| ext.to_str()) {
                Some("yaml" | "yml") => serde_yml::to_string(self).map_err(|err| err.to_string()),
                Some("json") => serde_json::to_string_pretty(self).map_err(|err| err.to_string()),
                Some("toml") => toml::to_string_pretty(self).map_err(|err| err.to_string()),
                other => return Err(ConfigError::UnsupportedFormat(other.unwrap_or_default().to_string())),
            }
            .map_err(|message| ConfigError::Parse {
                path: display.clone(),
                message,
            })?;
            fs::write(path, rendered).map_err(|source| ConfigError::Io { path: display, source })
        }

        fn apply_env(&mut self) -> Result<(), ConfigError> {
            if let Ok(api_url) = env::var(ENV_API_URL) {
                self.api_url = api_url;
            }
            if let Ok(value) = env::var(ENV_SEARCH_DEBOUNCE_MS) {
                self.search_debounce_ms = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    name: ENV_SEARCH_DEBOUNCE_MS,
                    value: value.clone(),
                })?;
            }
            if let Ok(level) = env::var(ENV_LOG_LEVEL) {
                self.log_level = level;
            }
            if let Ok(value) = env::var(ENV_LOG_FORMAT) {
                self.log_format = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    name: ENV_LOG_FORMAT,
                    value: value.clone(),
                })?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn cleanup_env_vars() {
        unsafe {
            std::env::remove_var(ENV_API_URL);
            std::env::remove_var(ENV_SEARCH_DEBOUNCE_MS);
            std::env::remove_var(ENV_LOG_LEVEL);
            std::env::remove_var(ENV_LOG_FORMAT);
        }
    }

    #[test]
    fn test_config_with_defaults() {
        let config = ClientConfig::with_defaults();
        assert_eq!(config.api_url, "http://localhost:3000/api");
        assert_eq!(config.search_debounce_ms, 500);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_debounce() {
        let config = ClientConfig {
            search_debounce_ms: 299,
            ..ClientConfig::with_defaults()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = ClientConfig {
            search_debounce_ms: 300,
            ..ClientConfig::with_defaults()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        for api_url in ["not a url", "ftp://example.com/api"] {
            let config = ClientConfig {
                api_url: api_url.to_string(),
                ..ClientConfig::with_defaults()
            };
            assert!(config.validate().is_err(), "{api_url} should be rejected");
        }
    }

    #[test]
    #[serial]
    fn test_load_without_file() {
        cleanup_env_vars();
        let config = ClientConfig::load(None, None).unwrap();
        assert_eq!(config, ClientConfig::with_defaults());
    }

    #[test]
    #[serial]
    fn test_load_yaml_json_toml() {
        cleanup_env_vars();
        let temp_dir = TempDir::new().unwrap();

        let yaml = temp_dir.path().join("dallani.yaml");
        fs::write(&yaml, "api_url: \"https://admin.dallani.app/api\"\nsearch_debounce_ms: 700\n").unwrap();
        let config = ClientConfig::load(Some(&yaml), None).unwrap();
        assert_eq!(config.api_url, "https://admin.dallani.app/api");
        assert_eq!(config.search_debounce_ms, 700);
        assert_eq!(config.log_level, "info");

        let json = temp_dir.path().join("dallani.json");
        fs::write(&json, r#"{"log_level": "debug", "log_format": "json"}"#).unwrap();
        let config = ClientConfig::load(Some(&json), None).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);

        let toml_file = temp_dir.path().join("dallani.toml");
        fs::write(&toml_file, "api_url = \"http://10.0.0.5:3000/api\"\n").unwrap();
        let config = ClientConfig::load(Some(&toml_file), None).unwrap();
        assert_eq!(config.api_url, "http://10.0.0.5:3000/api");
    }

    #[test]
    #[serial]
    fn test_unsupported_extension() {
        cleanup_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dallani.ini");
        fs::write(&path, "api_url=x").unwrap();
        assert!(matches!(
            ClientConfig::load(Some(&path), None),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "ini"
        ));
    }

    #[test]
    #[serial]
    fn test_precedence_file_env_override() {
        cleanup_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dallani.yaml");
        fs::write(&path, "api_url: \"http://file.example/api\"\nlog_level: \"warn\"\n").unwrap();

        unsafe {
            std::env::set_var(ENV_API_URL, "http://env.example/api");
            std::env::set_var(ENV_SEARCH_DEBOUNCE_MS, "900");
        }
        let config = ClientConfig::load(Some(&path), None).unwrap();
        assert_eq!(config.api_url, "http://env.example/api");
        assert_eq!(config.search_debounce_ms, 900);
        assert_eq!(config.log_level, "warn");

        let config = ClientConfig::load(Some(&path), Some("http://cli.example/api")).unwrap();
        assert_eq!(config.api_url, "http://cli.example/api");
        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_invalid_env_values() {
        cleanup_env_vars();
        unsafe {
            std::env::set_var(ENV_SEARCH_DEBOUNCE_MS, "fast");
        }
        assert!(matches!(
            ClientConfig::load(None, None),
            Err(ConfigError::InvalidEnv { name, .. }) if name == ENV_SEARCH_DEBOUNCE_MS
        ));

        unsafe {
            std::env::set_var(ENV_SEARCH_DEBOUNCE_MS, "100");
        }
        assert!(matches!(ClientConfig::load(None, None), Err(ConfigError::Invalid(_))));
        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_write_then_load() {
        cleanup_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("written.toml");
        let config = ClientConfig {
            api_url: "https://admin.dallani.app/api".into(),
            ..ClientConfig::with_defaults()
        };
        config.write_to(&path).unwrap();
        assert_eq!(ClientConfig::load(Some(&path), None).unwrap(), config);
    }
}
