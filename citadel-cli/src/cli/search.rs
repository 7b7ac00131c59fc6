//! # Search Command
//!
//! One-shot, non-interactive character lookup printed as a table.

use anyhow::{Context, Result};
use citadel_api::create_client;
use citadel_core::output::{format_highlighted_name, format_status};
use citadel_core::{Character, print_info};
use clap::Args;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::LookupArgs;

/// Command for a single lookup
#[derive(Args)]
pub struct SearchArgs {
  /// Name (or part of a name) to search for
  pub name: String,

  #[command(flatten)]
  pub lookup: LookupArgs,
}

#[derive(Tabled)]
struct CharacterRow {
  #[tabled(rename = "ID")]
  id: String,
  #[tabled(rename = "Name")]
  name: String,
  #[tabled(rename = "Status")]
  status: String,
  #[tabled(rename = "Species")]
  species: String,
  #[tabled(rename = "Episodes")]
  episodes: usize,
}

impl CharacterRow {
  fn new(character: &Character, key: &str) -> Self {
    Self {
      id: character.id.to_string(),
      name: format_highlighted_name(&character.name, key),
      status: format_status(&character.status),
      species: character.species.to_string(),
      episodes: character.episode_count(),
    }
  }
}

pub(crate) fn handle_search_command(args: SearchArgs) -> Result<()> {
  let name = args.name.trim();
  if name.is_empty() {
    anyhow::bail!("Search name cannot be empty");
  }

  let settings = args.lookup.resolve()?;
  let client = create_client(&settings)?;
  let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;

  let response = runtime.block_on(client.search(name, settings.simulated_latency()))?;

  if response.results.is_empty() {
    print_info(&format!("No characters found matching '{name}'"));
    return Ok(());
  }

  println!("{}", render_table(&response.results, name));
  if let Some(info) = response.info
    && info.count as usize > response.results.len()
  {
    print_info(&format!(
      "Showing {} of {} matching characters",
      response.results.len(),
      info.count
    ));
  }

  Ok(())
}

fn render_table(characters: &[Character], key: &str) -> String {
  let rows: Vec<CharacterRow> = characters.iter().map(|c| CharacterRow::new(c, key)).collect();
  Table::new(rows).with(Style::sharp()).to_string()
}
