//! Options shared by every command that talks to the character API

use anyhow::Result;
use citadel_core::{Settings, get_config_dirs};
use clap::Args;
use tracing::debug;

/// Lookup options overriding the configuration file
#[derive(Args, Debug, Clone, Default)]
pub struct LookupArgs {
  /// Simulated latency in milliseconds added before each lookup
  #[arg(long, value_name = "MS")]
  pub latency: Option<u64>,

  /// Base URL of the character API
  #[arg(long, value_name = "URL")]
  pub api_url: Option<String>,
}

impl LookupArgs {
  /// Layer these flags over `settings`
  pub fn apply(&self, mut settings: Settings) -> Settings {
    if let Some(latency) = self.latency {
      settings.simulated_latency_ms = latency;
    }
    if let Some(url) = &self.api_url {
      settings.api_base_url = url.clone();
    }
    settings
  }

  /// Resolve settings from the config file, the environment, then these
  /// flags, and validate the result
  pub fn resolve(&self) -> Result<Settings> {
    let file_settings = get_config_dirs()?.load_settings()?;
    let settings = self.apply(file_settings.with_env_overrides());
    settings.validate()?;
    debug!("Using settings: {settings:?}");
    Ok(settings)
  }
}
