//! # Init Command
//!
//! Derive-based implementation of the init command for initializing citadel
//! configuration.

use anyhow::Result;
use citadel_core::get_config_dirs;
use citadel_core::output::format_path;
use citadel_core::{print_info, print_success};

pub(crate) fn handle_init_command() -> Result<()> {
  let config_dirs = get_config_dirs()?;
  let config_path = config_dirs.config_path();
  let path = config_path.display().to_string();

  if config_dirs.init()? {
    print_success(&format!("Wrote default settings to {}", format_path(&path)));
  } else {
    print_info(&format!("Settings already exist at {}", format_path(&path)));
  }

  Ok(())
}
