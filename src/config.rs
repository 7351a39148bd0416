//! Startup configuration.
//!
//! Read once in `main` and handed to the widget and the generator; nothing
//! else looks at the environment.

use crate::generate::GeminiConfig;
use std::time::Duration;

pub const ENV_MAX_FILES: &str = "UPLOADER_MAX_FILES";
pub const ENV_MAX_FILE_SIZE_MB: &str = "UPLOADER_MAX_FILE_SIZE_MB";
pub const ENV_ACCEPT: &str = "UPLOADER_ACCEPT";
pub const ENV_API_KEY: &str = "GOOGLE_GENERATIVE_AI_API_KEY";
pub const ENV_MODEL: &str = "GEMINI_MODEL";
pub const ENV_BASE_URL: &str = "GEMINI_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "GEMINI_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Options fixed for the widget's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub max_files: usize,
    pub max_file_size_mb: f64,
    pub accept: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            max_files: 5,
            max_file_size_mb: 5.0,
            accept: "*".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub widget: WidgetConfig,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = AppConfig::default();

        if let Some(value) = get(ENV_MAX_FILES) {
            config.widget.max_files = match value.parse::<usize>() {
                Ok(max) if max > 0 => max,
                _ => return Err(invalid(ENV_MAX_FILES, value, "expected a positive integer")),
            };
        }
        if let Some(value) = get(ENV_MAX_FILE_SIZE_MB) {
            config.widget.max_file_size_mb = match value.parse::<f64>() {
                Ok(size) if size.is_finite() && size > 0.0 => size,
                _ => return Err(invalid(ENV_MAX_FILE_SIZE_MB, value, "expected a positive number")),
            };
        }
        if let Some(value) = get(ENV_ACCEPT) {
            config.widget.accept = value;
        }

        if let Some(value) = get(ENV_API_KEY) {
            config.gemini.api_key = value;
        }
        if let Some(value) = get(ENV_MODEL) {
            config.gemini.model = value;
        }
        if let Some(value) = get(ENV_BASE_URL) {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(invalid(ENV_BASE_URL, value, "expected an http(s) URL"));
            }
            config.gemini.base_url = value;
        }
        if let Some(value) = get(ENV_TIMEOUT_SECS) {
            config.gemini.timeout = match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(invalid(ENV_TIMEOUT_SECS, value, "expected a positive integer")),
            };
        }

        Ok(config)
    }
}

fn invalid(key: &'static str, value: String, reason: &'static str) -> ConfigError {
    ConfigError::InvalidValue { key, value, reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.widget, WidgetConfig::default());
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert!(config.gemini.api_key.is_empty());
        assert_eq!(config.gemini.timeout, Duration::from_secs(120));
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            (ENV_MAX_FILES, "3"),
            (ENV_MAX_FILE_SIZE_MB, "2.5"),
            (ENV_ACCEPT, ".jpg,.pdf"),
            (ENV_API_KEY, " key-123 "),
            (ENV_MODEL, "gemini-2.0-flash"),
            (ENV_TIMEOUT_SECS, "30"),
        ])
        .unwrap();
        assert_eq!(config.widget.max_files, 3);
        assert_eq!(config.widget.max_file_size_mb, 2.5);
        assert_eq!(config.widget.accept, ".jpg,.pdf");
        assert_eq!(config.gemini.api_key, "key-123");
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.timeout, Duration::from_secs(30));
    }

    #[test]
    fn blank_values_keep_defaults() {
        let config = load(&[(ENV_MAX_FILES, "  "), (ENV_ACCEPT, "")]).unwrap();
        assert_eq!(config.widget, WidgetConfig::default());
    }

    #[test]
    fn invalid_numbers_are_reported_with_their_key() {
        assert_eq!(
            load(&[(ENV_MAX_FILES, "0")]).unwrap_err(),
            ConfigError::InvalidValue {
                key: ENV_MAX_FILES,
                value: "0".to_string(),
                reason: "expected a positive integer",
            }
        );
        assert!(load(&[(ENV_MAX_FILE_SIZE_MB, "NaN")]).is_err());
        assert!(load(&[(ENV_TIMEOUT_SECS, "-1")]).is_err());
    }

    #[test]
    fn base_url_must_be_http() {
        assert!(load(&[(ENV_BASE_URL, "ftp://example.com")]).is_err());
        let config = load(&[(ENV_BASE_URL, "http://localhost:9000/v1beta")]).unwrap();
        assert_eq!(config.gemini.base_url, "http://localhost:9000/v1beta");
    }
}
