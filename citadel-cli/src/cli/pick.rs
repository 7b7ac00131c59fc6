//! # Pick Command
//!
//! Runs the interactive picker and prints the confirmed selection to stdout,
//! either as `id<TAB>name` lines or as a JSON array.

use anyhow::{Context, Result};
use citadel_api::create_client;
use citadel_core::{Character, SearchController, SimulatedLatency};
use clap::Args;
use is_terminal::IsTerminal;
use tracing::info;

use super::LookupArgs;
use crate::picker::{Picker, PickerExit};

/// Command for the interactive picker
#[derive(Args)]
pub struct PickArgs {
  #[command(flatten)]
  pub lookup: LookupArgs,

  /// Print the selection as a JSON array of full character records
  #[arg(long)]
  pub json: bool,
}

pub(crate) fn handle_pick_command(args: PickArgs) -> Result<()> {
  if !std::io::stdout().is_terminal() || !std::io::stdin().is_terminal() {
    anyhow::bail!("citadel pick needs an interactive terminal; use 'citadel search' in scripts");
  }

  let settings = args.lookup.resolve()?;
  let client = create_client(&settings)?;
  let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

  let controller = SearchController::new(
    settings.debounce(),
    SimulatedLatency::from_millis(settings.simulated_latency_ms),
  );
  let exit = Picker::new(controller, client, runtime.handle().clone()).run()?;

  match exit {
    PickerExit::Confirmed(selection) => {
      info!("Printing {} selected characters", selection.len());
      let output = format_selection(&selection, args.json)?;
      if !output.is_empty() {
        println!("{output}");
      }
    }
    PickerExit::Cancelled => info!("Picker cancelled"),
  }

  Ok(())
}

/// Render the selection for stdout
fn format_selection(selection: &[Character], json: bool) -> Result<String> {
  if json {
    return serde_json::to_string_pretty(selection).context("Failed to serialize selection");
  }

  Ok(
    selection
      .iter()
      .map(|character| format!("{}\t{}", character.id, character.name))
      .collect::<Vec<_>>()
      .join("\n"),
  )
}
