//! # Output Formatting
//!
//! Provides formatted output functions with colors, emojis, and consistent
//! styling for user-facing messages and terminal output.

use owo_colors::{OwoColorize, Stream, Style};
use {clap, emojis};

use crate::character::Status;
use crate::highlight::{Highlighted, highlight_match};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply this mode as the global `owo-colors` override
  pub fn apply(self) {
    match self {
      ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
      ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
      // Leave terminal detection to owo-colors
      ColorMode::Auto => {}
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", check.green().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", info.blue().bold(), message);
}

/// Format a filesystem path
pub fn format_path(path: &str) -> String {
  path.bright_green().to_string()
}

/// Format a character name, emphasising the part matching `key`
pub fn format_highlighted_name(name: &str, key: &str) -> String {
  match highlight_match(name, key) {
    Highlighted::Match { before, matched, after } => format!(
      "{before}{}{after}",
      matched.if_supports_color(Stream::Stdout, |text| text.style(Style::new().bright_cyan().bold()))
    ),
    Highlighted::Plain(name) => name.to_string(),
  }
}

/// Format a character's life status
pub fn format_status(status: &Status) -> String {
  let label = status.to_string();
  match status {
    Status::Alive => label.if_supports_color(Stream::Stdout, |text| text.green()).to_string(),
    Status::Dead => label.if_supports_color(Stream::Stdout, |text| text.red()).to_string(),
    Status::Unknown => label
      .if_supports_color(Stream::Stdout, |text| text.bright_black())
      .to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_get_emoji_or_default() {
    let result = get_emoji_or_default("check_mark", "✓");
    assert!(!result.is_empty());

    let result = get_emoji_or_default("nonexistent_emoji", "fallback");
    assert_eq!(result, "fallback");
  }

  #[test]
  fn test_highlighted_name_keeps_text() {
    owo_colors::set_override(false);

    assert_eq!(format_highlighted_name("Pickle Rick", "rick"), "Pickle Rick");
    assert_eq!(format_highlighted_name("Summer", "zzz"), "Summer");
  }

  #[test]
  fn test_status_formatting() {
    assert!(format_status(&Status::Alive).contains("Alive"));
    assert!(format_status(&Status::Dead).contains("Dead"));
    assert!(format_status(&Status::Unknown).contains("unknown"));
  }
}
