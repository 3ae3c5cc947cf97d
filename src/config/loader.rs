use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::EngineConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl EngineConfig {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/memehub/config.toml` on Unix/macOS, or equivalent
    /// on other platforms via `dirs::config_dir()`. Falls back to the
    /// current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("memehub").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `EngineConfig::default()`.
    /// - If the file exists, parses it as TOML and validates.
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from a specific path, with the same missing-file
    /// fallback as [`EngineConfig::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(EngineConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: EngineConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks that both endpoint URLs are present and http(s), and that
    /// the request timeout is nonzero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (label, url) in [
            ("content_url", &self.remote.content_url),
            ("template_url", &self.remote.template_url),
        ] {
            if url.is_empty() {
                return Err(ConfigError::ValidationError {
                    message: format!("{label} must not be empty"),
                });
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::ValidationError {
                    message: format!("{label} must be an http(s) URL, got '{url}'"),
                });
            }
        }

        if self.remote.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "timeout_seconds must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
