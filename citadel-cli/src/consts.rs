//! Constants for the citadel CLI

/// Display name used in panic messages and crash reports
pub const APP_NAME: &str = "citadel";

/// How long the picker waits for terminal input before redrawing
pub const INPUT_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(50);

/// Frames of the loading spinner, advanced once per redraw tick
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
