//! The seam between the picker runtime and the character API.
//!
//! The runtime only needs "search this name after this delay"; abstracting it
//! lets the dispatcher be driven by a scripted lookup in tests.

use std::future::Future;
use std::time::Duration;

use citadel_core::{Character, LookupError};

/// Something that can resolve a name query into matching characters
pub trait CharacterLookup: Send + Sync + 'static {
  /// Wait `simulated_delay`, then look up characters whose name contains
  /// `query`. An unmatched name resolves to an empty list.
  fn search(
    &self,
    query: &str,
    simulated_delay: Duration,
  ) -> impl Future<Output = Result<Vec<Character>, LookupError>> + Send;
}

impl CharacterLookup for crate::RickAndMortyClient {
  async fn search(&self, query: &str, simulated_delay: Duration) -> Result<Vec<Character>, LookupError> {
    let response = crate::RickAndMortyClient::search(self, query, simulated_delay).await?;
    Ok(response.results)
  }
}
