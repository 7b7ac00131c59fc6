//! # Character Endpoints
//!
//! Character search by name. The API answers a name with no matches with a
//! 404 and `{"error": "There is nothing here"}`, which is treated as an empty
//! result rather than a failure. Only the first page of results is used.

use std::time::Duration;

use citadel_core::{CharactersResponse, LookupError};
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::client::RickAndMortyClient;
use crate::consts::CHARACTER_PATH;

impl RickAndMortyClient {
  /// Search characters whose name contains `name`
  pub async fn search_characters(&self, name: &str) -> Result<CharactersResponse, LookupError> {
    let url = format!("{}{}", self.base_url, CHARACTER_PATH);
    debug!("Searching characters matching {name:?}");

    let response = self
      .client
      .get(&url)
      .query(&[("name", name)])
      .send()
      .await
      .map_err(|e| {
        warn!("Character request failed: {e}");
        LookupError::default()
      })?;

    match response.status() {
      StatusCode::OK => response.json::<CharactersResponse>().await.map_err(|e| {
        warn!("Failed to parse character response: {e}");
        LookupError::default()
      }),
      StatusCode::NOT_FOUND => {
        debug!("No characters match {name:?}");
        Ok(CharactersResponse::empty())
      }
      status => {
        warn!("Unexpected character response: HTTP {status}");
        Err(LookupError::default())
      }
    }
  }

  /// Wait `simulated_delay`, then search. The delay only exists to make the
  /// loading state observable and never changes the outcome.
  pub async fn search(&self, query: &str, simulated_delay: Duration) -> Result<CharactersResponse, LookupError> {
    if !simulated_delay.is_zero() {
      tokio::time::sleep(simulated_delay).await;
    }
    self.search_characters(query).await
  }
}
