//! Keyboard and mouse bindings for the picker.
//!
//! Translates crossterm events into controller calls. Anything that needs a
//! lookup scheduled or cancelled comes back as an [`Effect`] for the
//! dispatcher.

use citadel_core::{Effect, Focus, SearchController};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::picker::ui::HitTarget;

/// What the event loop should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
  Continue(Option<Effect>),
  /// Finish and hand back the selection
  Confirm,
  /// Finish without a selection
  Cancel,
}

/// Apply a key press to the controller
pub fn handle_key(controller: &mut SearchController, key: KeyEvent) -> KeyOutcome {
  if key.modifiers.contains(KeyModifiers::CONTROL) {
    return match key.code {
      KeyCode::Char('c') => KeyOutcome::Cancel,
      KeyCode::Char('s') => KeyOutcome::Confirm,
      KeyCode::Char('u') => KeyOutcome::Continue(controller.clear_query()),
      KeyCode::Char('x') => {
        controller.deselect_all();
        KeyOutcome::Continue(None)
      }
      _ => KeyOutcome::Continue(None),
    };
  }

  match key.code {
    KeyCode::Esc => KeyOutcome::Continue(controller.clear_query()),
    KeyCode::Tab | KeyCode::BackTab => {
      controller.cycle_focus();
      KeyOutcome::Continue(None)
    }
    KeyCode::Up => {
      controller.move_previous();
      KeyOutcome::Continue(None)
    }
    KeyCode::Down => {
      controller.move_next();
      KeyOutcome::Continue(None)
    }
    _ => match controller.focus() {
      Focus::Latency => latency_key(controller, key.code),
      Focus::Search => search_key(controller, key.code),
      Focus::Results => results_key(controller, key.code),
    },
  }
}

fn latency_key(controller: &mut SearchController, code: KeyCode) -> KeyOutcome {
  match code {
    KeyCode::Char(c) => controller.latency_push(c),
    KeyCode::Backspace => controller.latency_pop(),
    KeyCode::Enter => controller.set_focus(Focus::Search),
    _ => {}
  }
  KeyOutcome::Continue(None)
}

fn search_key(controller: &mut SearchController, code: KeyCode) -> KeyOutcome {
  match code {
    KeyCode::Char(c) => KeyOutcome::Continue(controller.push_char(c)),
    KeyCode::Backspace => KeyOutcome::Continue(controller.backspace()),
    KeyCode::Enter => KeyOutcome::Confirm,
    _ => KeyOutcome::Continue(None),
  }
}

fn results_key(controller: &mut SearchController, code: KeyCode) -> KeyOutcome {
  match code {
    KeyCode::Enter | KeyCode::Char(' ') => {
      controller.toggle_focused();
      KeyOutcome::Continue(None)
    }
    // Typing goes back to the query
    KeyCode::Char(c) => {
      controller.set_focus(Focus::Search);
      KeyOutcome::Continue(controller.push_char(c))
    }
    KeyCode::Backspace => {
      controller.set_focus(Focus::Search);
      KeyOutcome::Continue(controller.backspace())
    }
    _ => KeyOutcome::Continue(None),
  }
}

/// Apply a left click on `target`
pub fn handle_click(controller: &mut SearchController, target: HitTarget) -> Option<Effect> {
  match target {
    HitTarget::LatencyField => controller.set_focus(Focus::Latency),
    HitTarget::SearchField => controller.set_focus(Focus::Search),
    HitTarget::ClearQuery => return controller.clear_query(),
    HitTarget::RemoveTag(id) => {
      controller.remove_selected(id);
    }
    HitTarget::DeselectAll => controller.deselect_all(),
    HitTarget::Row(id) => {
      controller.click_result(id);
    }
  }
  None
}

#[cfg(test)]
mod tests {
  use citadel_core::{Character, CharacterId, LookupRequest, SearchPhase};

  use super::*;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
  }

  fn character(id: u32, name: &str) -> Character {
    serde_json::from_value(citadel_test_utils::character_json(id, name, 1)).unwrap()
  }

  fn type_text(controller: &mut SearchController, text: &str) -> Option<LookupRequest> {
    let mut last = None;
    for c in text.chars() {
      if let KeyOutcome::Continue(Some(Effect::Schedule(request))) = handle_key(controller, key(KeyCode::Char(c))) {
        last = Some(request);
      }
    }
    last
  }

  fn with_results(query: &str, results: Vec<Character>) -> SearchController {
    let mut controller = SearchController::default();
    let request = type_text(&mut controller, query).unwrap();
    controller.on_lookup_finished(request.token, Ok(results));
    controller
  }

  #[test]
  fn test_typing_schedules_lookups() {
    let mut controller = SearchController::default();
    let request = type_text(&mut controller, "rick").unwrap();

    assert_eq!(request.query, "rick");
    assert_eq!(controller.phase(), &SearchPhase::Debouncing(request.token));
  }

  #[test]
  fn test_escape_clears_query_and_cancels() {
    let mut controller = SearchController::default();
    type_text(&mut controller, "rick");

    assert_eq!(
      handle_key(&mut controller, key(KeyCode::Esc)),
      KeyOutcome::Continue(Some(Effect::CancelPending))
    );
    assert_eq!(controller.query(), "");
  }

  #[test]
  fn test_enter_in_search_confirms_and_ctrl_c_cancels() {
    let mut controller = SearchController::default();
    assert_eq!(handle_key(&mut controller, key(KeyCode::Enter)), KeyOutcome::Confirm);
    assert_eq!(handle_key(&mut controller, ctrl('s')), KeyOutcome::Confirm);
    assert_eq!(handle_key(&mut controller, ctrl('c')), KeyOutcome::Cancel);
  }

  #[test]
  fn test_arrows_then_space_toggle_row() {
    let mut controller = with_results("pickle", vec![character(265, "Pickle Rick"), character(266, "Pickle")]);

    handle_key(&mut controller, key(KeyCode::Down));
    handle_key(&mut controller, key(KeyCode::Down));
    assert_eq!(controller.focus(), Focus::Results);

    assert_eq!(
      handle_key(&mut controller, key(KeyCode::Char(' '))),
      KeyOutcome::Continue(None)
    );
    assert!(controller.selected().contains(CharacterId(266)));

    // Enter toggles in the list instead of confirming
    assert_eq!(handle_key(&mut controller, key(KeyCode::Enter)), KeyOutcome::Continue(None));
    assert!(controller.selected().is_empty());
  }

  #[test]
  fn test_typing_in_results_returns_to_search() {
    let mut controller = with_results("pickle", vec![character(265, "Pickle Rick")]);
    handle_key(&mut controller, key(KeyCode::Down));

    let outcome = handle_key(&mut controller, key(KeyCode::Char('s')));
    assert!(matches!(outcome, KeyOutcome::Continue(Some(Effect::Schedule(_)))));
    assert_eq!(controller.focus(), Focus::Search);
    assert_eq!(controller.query(), "pickles");
  }

  #[test]
  fn test_backspace_on_empty_query_removes_last_tag() {
    let mut controller = SearchController::default();
    controller.toggle(&character(1, "Rick"));
    controller.toggle(&character(2, "Morty"));

    handle_key(&mut controller, key(KeyCode::Backspace));
    let names: Vec<_> = controller.selected().iter().map(|c| c.name.clone()).collect();
    assert_eq!(names, vec!["Rick"]);
  }

  #[test]
  fn test_tab_edits_latency() {
    let mut controller = SearchController::default();
    handle_key(&mut controller, key(KeyCode::Tab));
    assert_eq!(controller.focus(), Focus::Latency);

    handle_key(&mut controller, key(KeyCode::Backspace));
    type_text(&mut controller, "750");
    assert_eq!(controller.latency().millis(), 750);
    assert_eq!(controller.query(), "");

    handle_key(&mut controller, key(KeyCode::BackTab));
    let request = type_text(&mut controller, "r").unwrap();
    assert_eq!(request.simulated_delay.as_millis(), 750);
  }

  #[test]
  fn test_ctrl_x_deselects_all() {
    let mut controller = SearchController::default();
    controller.toggle(&character(1, "Rick"));
    handle_key(&mut controller, ctrl('x'));
    assert!(controller.selected().is_empty());
  }

  #[test]
  fn test_clicks() {
    let mut controller = with_results("rick", vec![character(1, "Rick Sanchez"), character(8, "Adjudicator Rick")]);

    assert_eq!(handle_click(&mut controller, HitTarget::Row(CharacterId(8))), None);
    assert!(controller.selected().contains(CharacterId(8)));
    assert_eq!(controller.focused_index(), Some(1));

    handle_click(&mut controller, HitTarget::RemoveTag(CharacterId(8)));
    assert!(controller.selected().is_empty());

    handle_click(&mut controller, HitTarget::Row(CharacterId(1)));
    handle_click(&mut controller, HitTarget::DeselectAll);
    assert!(controller.selected().is_empty());

    handle_click(&mut controller, HitTarget::LatencyField);
    assert_eq!(controller.focus(), Focus::Latency);

    // Nothing is pending once results have landed
    assert_eq!(handle_click(&mut controller, HitTarget::ClearQuery), None);
    assert_eq!(controller.query(), "");
    assert_eq!(controller.focus(), Focus::Search);
  }
}
