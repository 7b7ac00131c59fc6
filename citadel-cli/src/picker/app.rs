//! # Picker Event Loop
//!
//! Ties the controller, the lookup dispatcher and the terminal together. The
//! loop itself is synchronous: it redraws, drains lookup progress from the
//! dispatcher's channel, and polls crossterm for input with a short timeout
//! so the spinner keeps moving while a lookup is in flight.

use anyhow::{Context, Result};
use citadel_api::CharacterLookup;
use citadel_core::{Character, Effect, SearchController};
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use crate::consts::INPUT_POLL_INTERVAL;
use crate::picker::dispatch::{LookupDispatcher, LookupEvent};
use crate::picker::input::{self, KeyOutcome};
use crate::picker::terminal::TerminalSession;
use crate::picker::ui::{self, HitMap};

/// How a picker session ended
#[derive(Debug, Clone, PartialEq)]
pub enum PickerExit {
  /// The user confirmed; the selection in selection order
  Confirmed(Vec<Character>),
  Cancelled,
}

/// The interactive picker
pub struct Picker<L: CharacterLookup> {
  controller: SearchController,
  dispatcher: LookupDispatcher<L>,
  events: UnboundedReceiver<LookupEvent>,
  tick: usize,
}

impl<L: CharacterLookup> Picker<L> {
  /// Create a picker whose lookups run on `runtime`
  pub fn new(controller: SearchController, lookup: L, runtime: Handle) -> Self {
    let (dispatcher, events) = LookupDispatcher::new(lookup, runtime);
    Self {
      controller,
      dispatcher,
      events,
      tick: 0,
    }
  }

  pub fn controller(&self) -> &SearchController {
    &self.controller
  }

  /// Take over the terminal and run until the user confirms or cancels
  pub fn run(mut self) -> Result<PickerExit> {
    let mut session = TerminalSession::enter()?;
    info!("Picker started");

    loop {
      self.drain_lookup_events();

      let mut hits = HitMap::default();
      session
        .terminal_mut()
        .draw(|frame| hits = ui::render(frame, &self.controller, self.tick))
        .context("Failed to draw picker")?;
      self.tick = self.tick.wrapping_add(1);

      if !event::poll(INPUT_POLL_INTERVAL).context("Failed to poll terminal events")? {
        continue;
      }
      let event = event::read().context("Failed to read terminal event")?;
      if let Some(exit) = self.handle_event(event, &hits) {
        info!("Picker finished");
        return Ok(exit);
      }
    }
  }

  /// Apply lookup progress reported since the last frame
  pub fn drain_lookup_events(&mut self) {
    while let Ok(event) = self.events.try_recv() {
      match event {
        LookupEvent::Started(token) => self.controller.on_lookup_started(token),
        LookupEvent::Finished(token, outcome) => {
          self.controller.on_lookup_finished(token, outcome);
        }
      }
    }
  }

  /// Apply one terminal event. Returns the exit once the session is over.
  pub fn handle_event(&mut self, event: Event, hits: &HitMap) -> Option<PickerExit> {
    match event {
      Event::Key(key) if key.kind == KeyEventKind::Press => match input::handle_key(&mut self.controller, key) {
        KeyOutcome::Continue(effect) => self.apply(effect),
        KeyOutcome::Confirm => {
          let selection = self.controller.selected().as_slice().to_vec();
          debug!("Confirmed {} selected characters", selection.len());
          return Some(PickerExit::Confirmed(selection));
        }
        KeyOutcome::Cancel => return Some(PickerExit::Cancelled),
      },
      Event::Mouse(mouse) => match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
          if let Some(target) = hits.target_at(mouse.column, mouse.row) {
            let effect = input::handle_click(&mut self.controller, target);
            self.apply(effect);
          }
        }
        MouseEventKind::ScrollDown => self.controller.move_next(),
        MouseEventKind::ScrollUp => self.controller.move_previous(),
        _ => {}
      },
      _ => {}
    }
    None
  }

  fn apply(&mut self, effect: Option<Effect>) {
    if let Some(effect) = effect {
      self.dispatcher.apply(effect);
    }
  }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use citadel_core::{CharacterId, LookupError, PopoverView, SearchPhase, SimulatedLatency};
  use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
  use ratatui::Terminal;
  use ratatui::backend::TestBackend;

  use super::*;
  use crate::picker::dispatch::tests::ScriptedLookup;
  use crate::picker::ui::HitTarget;

  fn character(id: u32, name: &str) -> Character {
    serde_json::from_value(citadel_test_utils::character_json(id, name, 2)).unwrap()
  }

  fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
  }

  fn click(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
      kind: MouseEventKind::Down(MouseButton::Left),
      column,
      row,
      modifiers: KeyModifiers::NONE,
    })
  }

  fn type_text<L: CharacterLookup>(picker: &mut Picker<L>, text: &str) {
    for c in text.chars() {
      assert_eq!(picker.handle_event(press(KeyCode::Char(c)), &HitMap::default()), None);
    }
  }

  fn draw<L: CharacterLookup>(picker: &Picker<L>) -> HitMap {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let mut hits = HitMap::default();
    terminal
      .draw(|frame| hits = ui::render(frame, picker.controller(), 0))
      .unwrap();
    hits
  }

  /// Let the dispatcher's timers run, then apply what it reported
  async fn settle<L: CharacterLookup>(picker: &mut Picker<L>, wait: Duration) {
    tokio::time::sleep(wait).await;
    picker.drain_lookup_events();
  }

  fn picker(lookup: ScriptedLookup) -> Picker<ScriptedLookup> {
    Picker::new(
      SearchController::new(Duration::from_millis(200), SimulatedLatency::default()),
      lookup,
      Handle::current(),
    )
  }

  #[tokio::test(start_paused = true)]
  async fn test_search_select_and_confirm() {
    let lookup = ScriptedLookup::default().answer(
      "pickle",
      Ok(vec![character(265, "Pickle Rick"), character(266, "Pickle")]),
    );
    let mut picker = picker(lookup);

    type_text(&mut picker, "pickle");
    settle(&mut picker, Duration::from_millis(300)).await;
    assert!(matches!(picker.controller().view(), PopoverView::Listing { .. }));

    let hits = draw(&picker);
    let row = hits.area_of(HitTarget::Row(CharacterId(265))).unwrap();
    assert_eq!(picker.handle_event(click(row.x + 2, row.y + 1), &hits), None);
    assert!(picker.controller().selected().contains(CharacterId(265)));

    // Focus is on the clicked row; moving back to the query and pressing Enter
    // confirms the selection
    picker.handle_event(press(KeyCode::Esc), &hits);
    let exit = picker.handle_event(press(KeyCode::Enter), &hits);
    assert_eq!(exit, Some(PickerExit::Confirmed(vec![character(265, "Pickle Rick")])));
  }

  #[tokio::test(start_paused = true)]
  async fn test_only_latest_query_is_looked_up() {
    let lookup = ScriptedLookup::default();
    let calls = std::sync::Arc::clone(&lookup.calls);
    let mut picker = picker(lookup);

    type_text(&mut picker, "ri");
    settle(&mut picker, Duration::from_millis(100)).await;
    type_text(&mut picker, "ck");
    settle(&mut picker, Duration::from_millis(300)).await;

    assert_eq!(*calls.lock().unwrap(), vec!["rick".to_string()]);
    assert_eq!(picker.controller().phase(), &SearchPhase::Results);
  }

  #[tokio::test(start_paused = true)]
  async fn test_escape_cancels_pending_lookup() {
    let lookup = ScriptedLookup::default();
    let calls = std::sync::Arc::clone(&lookup.calls);
    let mut picker = picker(lookup);

    type_text(&mut picker, "rick");
    picker.handle_event(press(KeyCode::Esc), &HitMap::default());
    settle(&mut picker, Duration::from_secs(1)).await;

    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(picker.controller().view(), PopoverView::Hidden);
  }

  #[tokio::test(start_paused = true)]
  async fn test_failed_lookup_is_shown() {
    let lookup = ScriptedLookup::default().answer("rick", Err(LookupError::default()));
    let mut picker = picker(lookup);

    type_text(&mut picker, "rick");
    settle(&mut picker, Duration::from_millis(300)).await;

    assert_eq!(
      picker.controller().view(),
      PopoverView::Failed {
        message: "Error fetching character"
      }
    );
  }

  #[tokio::test(start_paused = true)]
  async fn test_clicking_tag_remove_and_ctrl_c() {
    let lookup = ScriptedLookup::default().answer("morty", Ok(vec![character(2, "Morty Smith")]));
    let mut picker = picker(lookup);

    type_text(&mut picker, "morty");
    settle(&mut picker, Duration::from_millis(300)).await;
    picker.handle_event(press(KeyCode::Down), &HitMap::default());
    picker.handle_event(press(KeyCode::Char(' ')), &HitMap::default());
    assert_eq!(picker.controller().selected().len(), 1);

    let hits = draw(&picker);
    let remove = hits.area_of(HitTarget::RemoveTag(CharacterId(2))).unwrap();
    picker.handle_event(click(remove.x, remove.y), &hits);
    assert!(picker.controller().selected().is_empty());

    let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(picker.handle_event(ctrl_c, &hits), Some(PickerExit::Cancelled));
  }
}
