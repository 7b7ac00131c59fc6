//! # Configuration Management
//!
//! Handles application configuration, directory management, and settings
//! for citadel, including XDG base directory support.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

/// Base address of the public character API
pub const DEFAULT_API_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Environment variable overriding the API base address
pub const ENV_API_URL: &str = "CITADEL_API_URL";

/// User-tunable settings read from `config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// Base address the character endpoint is appended to
  pub api_base_url: String,
  /// Quiet period after the last keystroke before a lookup fires
  pub debounce_ms: u64,
  /// Delay injected before each lookup to make loading observable
  pub simulated_latency_ms: u64,
  /// Upper bound on a single HTTP request
  pub request_timeout_secs: u64,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      api_base_url: DEFAULT_API_BASE_URL.to_string(),
      debounce_ms: 200,
      simulated_latency_ms: 0,
      request_timeout_secs: 10,
    }
  }
}

impl Settings {
  pub fn debounce(&self) -> Duration {
    Duration::from_millis(self.debounce_ms)
  }

  pub fn simulated_latency(&self) -> Duration {
    Duration::from_millis(self.simulated_latency_ms)
  }

  pub fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.request_timeout_secs)
  }

  /// Apply the `CITADEL_API_URL` override if it is set and non-empty
  pub fn with_env_overrides(mut self) -> Self {
    if let Ok(url) = std::env::var(ENV_API_URL)
      && !url.trim().is_empty()
    {
      tracing::debug!("Using API base URL from {ENV_API_URL}");
      self.api_base_url = url;
    }
    self
  }

  /// Check that the settings can be used to talk to the API
  pub fn validate(&self) -> Result<()> {
    let url = Url::parse(&self.api_base_url).with_context(|| format!("Invalid API base URL '{}'", self.api_base_url))?;

    if !matches!(url.scheme(), "http" | "https") {
      anyhow::bail!("API base URL must use http or https, got '{}'", url.scheme());
    }
    if self.request_timeout_secs == 0 {
      anyhow::bail!("request_timeout_secs must be greater than 0");
    }

    Ok(())
  }
}

/// Represents the configuration directories for the citadel application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
  pub cache_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("dev", "citadel", "citadel").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
      data_dir: proj_dirs.data_dir().to_path_buf(),
      cache_dir: proj_dirs.cache_dir().to_path_buf(),
    })
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the data directory
  pub fn data_dir(&self) -> &PathBuf {
    &self.data_dir
  }

  /// Get the cache directory
  pub fn cache_dir(&self) -> &PathBuf {
    &self.cache_dir
  }

  /// Get the path to the settings file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join("config.toml")
  }

  /// Get the path the interactive picker logs to
  pub fn log_path(&self) -> PathBuf {
    self.cache_dir.join("citadel.log")
  }

  /// Create the directories and write default settings if none exist.
  ///
  /// Returns `true` when a new settings file was written.
  pub fn init(&self) -> Result<bool> {
    fs::create_dir_all(&self.config_dir).context("Failed to create config directory")?;
    fs::create_dir_all(&self.data_dir).context("Failed to create data directory")?;
    fs::create_dir_all(&self.cache_dir).context("Failed to create cache directory")?;

    if self.config_path().exists() {
      return Ok(false);
    }

    self.save_settings(&Settings::default())?;
    Ok(true)
  }

  /// Load settings from file or return defaults
  pub fn load_settings(&self) -> Result<Settings> {
    let config_path = self.config_path();

    if !config_path.exists() {
      return Ok(Settings::default());
    }

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read settings from {}", config_path.display()))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse settings from {}", config_path.display()))
  }

  /// Save settings to file
  pub fn save_settings(&self, settings: &Settings) -> Result<()> {
    let config_path = self.config_path();

    if let Some(parent) = config_path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(settings).context("Failed to serialize settings to TOML")?;

    fs::write(&config_path, content).with_context(|| format!("Failed to write settings to {}", config_path.display()))
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}
