//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for citadel: the
//! interactive picker, a one-shot search and configuration setup.

mod init;
mod lookup_args;
mod pick;
mod search;

use anyhow::Result;
use citadel_core::ColorMode;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};

pub use lookup_args::LookupArgs;

/// Top-level CLI command for citadel
#[derive(Parser)]
#[command(name = "citadel")]
#[command(display_name = "🧪 Citadel")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Search and pick Rick and Morty characters from the terminal")]
#[command(
  long_about = "Citadel searches the Rick and Morty character API as you type and lets you\n\
        collect any number of characters as tags.\n\n\
        Lookups are debounced, stale responses are discarded, and an optional\n\
        simulated latency makes the loading state easy to observe."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages\n\n\
             While the picker is open, logs go to citadel.log in the cache directory."
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for citadel
#[derive(Subcommand)]
pub enum Commands {
  /// Interactively search and select characters
  #[command(long_about = "Open the interactive character picker.\n\n\
            Type to search by name; results appear after a short pause. Use the arrow\n\
            keys and Enter/Space (or the mouse) to toggle characters, Backspace on an\n\
            empty query to drop the last tag, and Esc to clear the query.\n\n\
            Press Enter in the search field or Ctrl+S to print the selection, or Ctrl+C\n\
            to quit without printing anything.")]
  #[command(alias = "p")]
  Pick(pick::PickArgs),

  /// Look up characters by name and print them as a table
  #[command(long_about = "Perform a single character lookup and print the first page of matches.\n\n\
            Names are matched case-insensitively anywhere in the character's name.")]
  #[command(alias = "s")]
  Search(search::SearchArgs),

  /// Initialize citadel configuration
  #[command(long_about = "Writes a default config.toml to the citadel configuration directory.\n\n\
            Existing settings are left untouched.")]
  Init,

  /// Intentionally panic (for testing error handling)
  #[command(hide = true)]
  Panic,
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();

  match cli.command {
    Commands::Pick(pick) => pick::handle_pick_command(pick),
    Commands::Search(search) => search::handle_search_command(search),
    Commands::Init => init::handle_init_command(),
    Commands::Panic => {
      panic!("This is an intentional test panic to verify the panic handler");
    }
  }
}
