//! # Tracing Setup
//!
//! Installs the global `tracing` subscriber. Verbosity comes from the `-v`
//! count; `RUST_LOG` directives are honoured on top of it.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Where log lines are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
  Stderr,
  /// Append to a file; used while the picker owns the terminal
  File(PathBuf),
  Discard,
}

/// Map the `-v` count to a level
pub fn level_for_verbosity(verbose: u8) -> Level {
  match verbose {
    0 => Level::WARN,  // Default: warnings and errors
    1 => Level::INFO,  // -v: info, warnings, and errors
    2 => Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => Level::TRACE, // -vvv or more: trace and everything else
  }
}

/// Initialize the global subscriber
pub fn init_tracing(level: Level, target: LogTarget) -> Result<()> {
  let filter = EnvFilter::from_default_env().add_directive(level.into());

  match target {
    LogTarget::Stderr => tracing_subscriber::registry()
      .with(fmt::layer().with_writer(io::stderr))
      .with(filter)
      .try_init(),
    LogTarget::File(path) => {
      if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create log directory {}", parent.display()))?;
      }
      let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

      tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter)
        .try_init()
    }
    LogTarget::Discard => tracing_subscriber::registry()
      .with(fmt::layer().with_writer(io::sink))
      .with(filter)
      .try_init(),
  }
  .context("Failed to initialize tracing")
}
