//! # Simulated Latency
//!
//! A configurable pause injected before every lookup so the loading state is
//! observable. The value never affects which results are shown.

use std::time::Duration;

use crate::error::InvalidLatencyError;

/// Latency used when nothing (or something invalid) has been entered
pub const DEFAULT_SIMULATED_LATENCY_MS: u64 = 0;

/// Parse latency text typed by the user.
///
/// Empty text counts as zero. Anything else must be a finite, non-negative
/// number of milliseconds; fractions round to the nearest millisecond and
/// surrounding whitespace is ignored.
pub fn parse_latency(input: &str) -> Result<u64, InvalidLatencyError> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Ok(0);
  }

  match trimmed.parse::<f64>() {
    Ok(value) if value.is_finite() && value >= 0.0 => Ok(value.round() as u64),
    _ => Err(InvalidLatencyError(input.to_string())),
  }
}

/// Editable latency field state: the raw text plus the effective value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedLatency {
  text: String,
  millis: u64,
}

impl Default for SimulatedLatency {
  fn default() -> Self {
    Self::from_millis(DEFAULT_SIMULATED_LATENCY_MS)
  }
}

impl SimulatedLatency {
  /// Start from a known-good value
  pub fn from_millis(millis: u64) -> Self {
    Self {
      text: millis.to_string(),
      millis,
    }
  }

  /// The text currently shown in the field
  pub fn text(&self) -> &str {
    &self.text
  }

  /// Effective latency in milliseconds
  pub fn millis(&self) -> u64 {
    self.millis
  }

  /// Effective latency as a duration
  pub fn duration(&self) -> Duration {
    Duration::from_millis(self.millis)
  }

  /// Replace the field text. Invalid input is recovered silently by reverting
  /// both the text and the value to the default.
  pub fn set_text(&mut self, text: &str) {
    match parse_latency(text) {
      Ok(millis) => {
        self.text = text.to_string();
        self.millis = millis;
      }
      Err(error) => {
        tracing::debug!("{error}; reverting to default");
        *self = Self::default();
      }
    }
  }

  /// Append a typed character to the field
  pub fn push(&mut self, c: char) {
    let mut text = self.text.clone();
    text.push(c);
    self.set_text(&text);
  }

  /// Delete the last character of the field
  pub fn pop(&mut self) {
    let mut text = self.text.clone();
    text.pop();
    self.set_text(&text);
  }
}
