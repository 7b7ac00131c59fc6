//! # Error Types
//!
//! Errors that can surface from a single user interaction. None of them are
//! fatal; each is scoped to the lookup or edit that produced it.

use thiserror::Error;

/// Message shown for every failed character lookup
pub const LOOKUP_ERROR_MESSAGE: &str = "Error fetching character";

/// A character lookup failed in transport or while parsing the response.
///
/// Carries only a message; the underlying cause is logged where it happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LookupError {
  message: String,
}

impl LookupError {
  /// The message to show the user
  pub fn message(&self) -> &str {
    &self.message
  }
}

impl Default for LookupError {
  fn default() -> Self {
    Self {
      message: LOOKUP_ERROR_MESSAGE.to_string(),
    }
  }
}

/// Latency text that is not a non-negative whole number of milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid latency '{0}': expected a non-negative number of milliseconds")]
pub struct InvalidLatencyError(pub String);
