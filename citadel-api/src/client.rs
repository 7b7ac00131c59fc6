//! # Character API HTTP Client
//!
//! HTTP client for the Rick and Morty API. The client holds no state beyond
//! its connection pool: it does not cache, retry, or paginate.

use std::time::Duration;

use anyhow::{Context, Result};
use citadel_core::Settings;
use reqwest::Client;

use crate::consts::USER_AGENT;

/// Represents a character API client
#[derive(Debug, Clone)]
pub struct RickAndMortyClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
}

impl RickAndMortyClient {
  /// Create a new client for the given base URL
  pub fn new(base_url: &str) -> Self {
    Self {
      client: Client::new(),
      base_url: base_url.trim_end_matches('/').to_string(),
    }
  }

  /// Create a client whose requests give up after `timeout`
  pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
    let client = Client::builder()
      .user_agent(USER_AGENT)
      .timeout(timeout)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
    })
  }

  /// The base URL requests are issued against
  pub fn base_url(&self) -> &str {
    &self.base_url
  }
}

/// Create a character API client from validated settings
pub fn create_client(settings: &Settings) -> Result<RickAndMortyClient> {
  settings.validate()?;
  RickAndMortyClient::with_timeout(&settings.api_base_url, settings.request_timeout())
}
