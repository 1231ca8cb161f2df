//! Configuration loading, validation, and management for citeforge.
//!
//! Loads configuration from a TOML file with environment variable overrides.
//! Validates all settings at load time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Locales with a full citation template table.
pub const SUPPORTED_LOCALES: &[&str] = &["fa"];

/// The root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Output locale for citation markup
    #[serde(default = "default_locale")]
    pub locale: String,

    /// User-agent header sent with every fetch
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Responses larger than this are rejected as ContentLength failures
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: u64,

    /// Bibliographic source endpoints
    #[serde(default)]
    pub sources: SourcesConfig,
}

fn default_locale() -> String {
    "fa".into()
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; citeforge/0.1)".into()
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_max_response_bytes() -> u64 {
    2_000_000
}

/// Endpoints of the bibliographic record providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Generalist citation metadata REST service
    #[serde(default = "default_citoid_base_url")]
    pub citoid_base_url: String,

    /// Regional book catalog (queried for regional ISBNs only)
    #[serde(default = "default_regional_base_url")]
    pub regional_base_url: String,

    /// WorldCat record export service (OCLC lookups)
    #[serde(default = "default_worldcat_base_url")]
    pub worldcat_base_url: String,
}

fn default_citoid_base_url() -> String {
    "https://en.wikipedia.org/api/rest_v1/data/citation/mediawiki".into()
}
fn default_regional_base_url() -> String {
    "http://www.adinebook.com/gp/product".into()
}
fn default_worldcat_base_url() -> String {
    "https://www.worldcat.org/oclc".into()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            citoid_base_url: default_citoid_base_url(),
            regional_base_url: default_regional_base_url(),
            worldcat_base_url: default_worldcat_base_url(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_timeout_secs(),
            max_response_bytes: default_max_response_bytes(),
            sources: SourcesConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (`~/.citeforge/config.toml`).
    ///
    /// Environment overrides (highest priority):
    /// - `CITEFORGE_LOCALE`
    /// - `CITEFORGE_USER_AGENT`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(locale) = std::env::var("CITEFORGE_LOCALE") {
            config.locale = locale;
        }
        if let Ok(user_agent) = std::env::var("CITEFORGE_USER_AGENT") {
            config.user_agent = user_agent;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".citeforge")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_LOCALES.contains(&self.locale.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Unsupported locale {:?} (supported: {})",
                self.locale,
                SUPPORTED_LOCALES.join(", ")
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.max_response_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "max_response_bytes must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
