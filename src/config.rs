//! Configuration management for Panelist
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::collection::PAGE_SIZES;
use crate::constants::CONFIG_GENERATED;
use crate::utils::datetime;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Screens that can be opened on startup
pub const SCREENS: [&str; 3] = ["categories", "banners", "users"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the admin API, without trailing slash
    pub base_url: String,
    /// Environment variable holding the bearer token
    pub token_env: String,
    /// File the token is read from (and saved to after signing in).
    /// Defaults to `<config dir>/panelist/token`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Screen opened on startup: "categories", "banners" or "users"
    pub default_screen: String,
    /// Rows per page: 5, 10, 25 or 50
    pub page_size: usize,
    /// How long notifications stay visible, in milliseconds
    pub notification_ttl_ms: u64,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Date format for timestamp columns
    pub date_format: String,
    /// Time format for timestamp columns
    pub time_format: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging to a file
    pub enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://business-branding.synoventum.site".to_string(),
            token_env: "PANELIST_TOKEN".to_string(),
            token_file: None,
            timeout_secs: 30,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_screen: "categories".to_string(),
            page_size: 10,
            notification_ttl_ms: 6000,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: datetime::DEFAULT_DATE_FORMAT.to_string(),
            time_format: datetime::DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

impl ApiConfig {
    /// Token file to use, falling back to the XDG location.
    pub fn resolved_token_file(&self) -> Option<PathBuf> {
        self.token_file
            .clone()
            .or_else(|| Config::get_xdg_config_dir().ok().map(|dir| dir.join("token")))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl UiConfig {
    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("panelist.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("panelist").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let base_url = &self.api.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            anyhow::bail!("base_url must start with http:// or https://, got '{}'", base_url);
        }

        if self.api.token_env.trim().is_empty() {
            anyhow::bail!("token_env cannot be empty");
        }

        if self.api.timeout_secs == 0 || self.api.timeout_secs > 300 {
            anyhow::bail!("timeout_secs must be between 1 and 300, got {}", self.api.timeout_secs);
        }

        if !SCREENS.contains(&self.ui.default_screen.as_str()) {
            anyhow::bail!(
                "default_screen must be one of {}, got '{}'",
                SCREENS.join(", "),
                self.ui.default_screen
            );
        }

        if !PAGE_SIZES.contains(&self.ui.page_size) {
            anyhow::bail!("page_size must be one of {:?}, got {}", PAGE_SIZES, self.ui.page_size);
        }

        if self.ui.notification_ttl_ms < 500 {
            anyhow::bail!("notification_ttl_ms must be at least 500");
        }

        // Validate date/time formats
        if let Err(e) = chrono::NaiveDate::parse_from_str("2025-01-01", &self.display.date_format) {
            anyhow::bail!("Invalid date_format '{}': {}", self.display.date_format, e);
        }

        if let Err(e) = chrono::NaiveTime::parse_from_str("12:00", &self.display.time_format) {
            anyhow::bail!("Invalid time_format '{}': {}", self.display.time_format, e);
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# Panelist Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format(datetime::DEFAULT_DATE_FORMAT)
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("panelist"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
