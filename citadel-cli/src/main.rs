//! # Citadel CLI Entry Point
//!
//! The main entry point for the citadel command-line tool, an interactive
//! picker for Rick and Morty characters.

use anyhow::Result;
use citadel_cli::cli::{self, Commands, handle_cli};
use citadel_cli::logging::{self, LogTarget};
use citadel_cli::panic::{self as panic_handler, PanicConfig};
use citadel_core::get_config_dirs;
use clap::Parser;
use tracing::debug;

fn main() -> Result<()> {
  let report_directory = get_config_dirs().ok().map(|dirs| dirs.cache_dir().clone());
  panic_handler::install(PanicConfig {
    report_directory,
    ..Default::default()
  });

  // Parse CLI arguments using the derive-based implementation
  let cmd = cli::Cli::parse();

  // The picker owns the terminal, so its logs go to a file instead of stderr
  let target = match cmd.command {
    Commands::Pick(_) => match get_config_dirs() {
      Ok(dirs) => LogTarget::File(dirs.log_path()),
      Err(_) => LogTarget::Discard,
    },
    _ => LogTarget::Stderr,
  };
  let level = logging::level_for_verbosity(cmd.verbose);
  logging::init_tracing(level, target)?;

  debug!("Tracing initialized with level: {}", level);

  handle_cli(cmd)
}
