//! Configuration management for outpages.
//!
//! Parses `outpages.toml` with serde and provides auto-discovery of the
//! config file in parent directories.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `outline.base_url`
//! - `outline.api_token`
//! - `cloudflare.account_id`
//! - `cloudflare.api_token`
//! - `cloudflare.project`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use uuid::Uuid;

use crate::expand::expand_value;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "outpages.toml";

/// Application configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Outline source configuration.
    pub outline: Option<OutlineConfig>,
    /// Cloudflare Pages target configuration.
    pub cloudflare: Option<CloudflareConfig>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Outline source configuration.
#[derive(Debug, Deserialize)]
pub struct OutlineConfig {
    /// Outline instance base URL, not including `/api`.
    pub base_url: String,
    /// Outline API token.
    pub api_token: String,
    /// Id of the collection to build the site from.
    pub collection_id: Uuid,
}

impl OutlineConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "outline.base_url")?;
        require_http_url(&self.base_url, "outline.base_url")?;
        require_non_empty(&self.api_token, "outline.api_token")?;
        Ok(())
    }
}

/// Cloudflare Pages target configuration.
#[derive(Debug, Deserialize)]
pub struct CloudflareConfig {
    /// Cloudflare account id.
    pub account_id: String,
    /// Cloudflare API token.
    pub api_token: String,
    /// Pages project name; the site deploys to `https://{project}.pages.dev`.
    pub project: String,
}

impl CloudflareConfig {
    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.account_id, "cloudflare.account_id")?;
        require_non_empty(&self.api_token, "cloudflare.api_token")?;
        require_non_empty(&self.project, "cloudflare.project")?;
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`outline.api_token`").
        field: String,
        /// Error message (e.g., "${`OUTLINE_API_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `outpages.toml` in the current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, parsing
    /// fails, or env expansion fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }
        match Self::discover_config() {
            Some(discovered) => Self::load_from_file(&discovered),
            None => Ok(Self::default()),
        }
    }

    /// Get validated Outline configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_outline(&self) -> Result<&OutlineConfig, ConfigError> {
        let outline = self.outline.as_ref().ok_or_else(|| {
            ConfigError::Validation("[outline] section required in config".into())
        })?;
        outline.validate()?;
        Ok(outline)
    }

    /// Get validated Cloudflare configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_cloudflare(&self) -> Result<&CloudflareConfig, ConfigError> {
        let cloudflare = self.cloudflare.as_ref().ok_or_else(|| {
            ConfigError::Validation("[cloudflare] section required in config".into())
        })?;
        cloudflare.validate()?;
        Ok(cloudflare)
    }

    /// Search for the config file in the current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Expand environment variables in secret-bearing string fields.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(outline) = &mut self.outline {
            outline.base_url = expand_value(&outline.base_url, "outline.base_url")?;
            outline.api_token = expand_value(&outline.api_token, "outline.api_token")?;
        }
        if let Some(cloudflare) = &mut self.cloudflare {
            cloudflare.account_id =
                expand_value(&cloudflare.account_id, "cloudflare.account_id")?;
            cloudflare.api_token = expand_value(&cloudflare.api_token, "cloudflare.api_token")?;
            cloudflare.project = expand_value(&cloudflare.project, "cloudflare.project")?;
        }
        Ok(())
    }
}
