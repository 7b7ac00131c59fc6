//! Terminal ownership for the picker.
//!
//! [`TerminalSession`] switches the terminal into raw mode, the alternate
//! screen and mouse capture when created, and undoes all three when dropped,
//! including on early returns and unwinding.

use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Set while a session holds the terminal
static ACTIVE: AtomicBool = AtomicBool::new(false);

pub type PickerTerminal = Terminal<CrosstermBackend<Stdout>>;

/// An acquired interactive terminal
pub struct TerminalSession {
  terminal: PickerTerminal,
}

impl TerminalSession {
  /// Take over the terminal
  pub fn enter() -> Result<Self> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    ACTIVE.store(true, Ordering::SeqCst);

    let setup = || -> Result<PickerTerminal> {
      let mut stdout = io::stdout();
      execute!(stdout, EnterAlternateScreen, EnableMouseCapture).context("Failed to enter the alternate screen")?;
      Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
    };

    match setup() {
      Ok(terminal) => Ok(Self { terminal }),
      Err(e) => {
        restore_terminal();
        Err(e)
      }
    }
  }

  pub fn terminal_mut(&mut self) -> &mut PickerTerminal {
    &mut self.terminal
  }
}

impl Drop for TerminalSession {
  fn drop(&mut self) {
    restore_terminal();
    let _ = self.terminal.show_cursor();
  }
}

/// Hand the terminal back to the shell if a session is active. Errors are
/// ignored; this also runs from the panic hook.
pub fn restore_terminal() {
  if ACTIVE.swap(false, Ordering::SeqCst) {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
  }
}
