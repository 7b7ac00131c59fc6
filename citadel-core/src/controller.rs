//! # Search/Selection Controller
//!
//! The picker's state machine. It owns the query, the selected set, the last
//! loaded results and the focus, and reconciles keyboard and mouse events
//! against them. Timers and network calls are not performed here: edits
//! return an [`Effect`] describing the lookup to schedule, and the runtime
//! reports progress back through [`SearchController::on_lookup_started`] and
//! [`SearchController::on_lookup_finished`].
//!
//! Every scheduled lookup carries a fresh [`RequestToken`]. Only the token of
//! the most recent schedule may change state, so a slow response for an old
//! query can never overwrite newer results.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, trace};

use crate::character::{Character, CharacterId};
use crate::error::LookupError;
use crate::latency::SimulatedLatency;
use crate::navigation::NavigationTracker;
use crate::selection::{SelectedSet, Toggled};
use crate::view::{LookupStatus, PopoverView, present};

/// Quiet period between the last edit and the lookup it triggers
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Identity of a scheduled lookup. Tokens increase monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
  pub fn value(self) -> u64 {
    self.0
  }
}

/// A lookup the runtime should run once the debounce window elapses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
  pub token: RequestToken,
  pub query: String,
  pub debounce: Duration,
  pub simulated_delay: Duration,
}

/// Side effects requested by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
  /// Replace any pending lookup with this one
  Schedule(LookupRequest),
  /// Drop any pending lookup
  CancelPending,
}

/// Conceptual phase of the search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPhase {
  /// Empty query
  Idle,
  /// Lookup scheduled, debounce window still open
  Debouncing(RequestToken),
  /// Lookup in flight
  Searching(RequestToken),
  /// Latest lookup resolved; the list may be empty
  Results,
  /// Latest lookup failed
  Failed(LookupError),
}

impl SearchPhase {
  fn pending_token(&self) -> Option<RequestToken> {
    match self {
      SearchPhase::Debouncing(token) | SearchPhase::Searching(token) => Some(*token),
      _ => None,
    }
  }
}

/// Which part of the widget receives typed input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  Latency,
  Search,
  Results,
}

/// Identifier-to-row lookup, rebuilt whenever the result list is replaced
#[derive(Debug, Clone, Default)]
struct RowIndex(HashMap<CharacterId, usize>);

impl RowIndex {
  fn rebuild(results: &[Character]) -> Self {
    Self(
      results
        .iter()
        .enumerate()
        .map(|(index, character)| (character.id, index))
        .collect(),
    )
  }

  fn get(&self, id: CharacterId) -> Option<usize> {
    self.0.get(&id).copied()
  }
}

#[derive(Debug, Clone)]
pub struct SearchController {
  query: String,
  selected: SelectedSet,
  results: Vec<Character>,
  rows: RowIndex,
  navigation: NavigationTracker,
  phase: SearchPhase,
  latency: SimulatedLatency,
  debounce: Duration,
  focus: Focus,
  last_token: u64,
}

impl Default for SearchController {
  fn default() -> Self {
    Self::new(DEFAULT_DEBOUNCE, SimulatedLatency::default())
  }
}

impl SearchController {
  pub fn new(debounce: Duration, latency: SimulatedLatency) -> Self {
    Self {
      query: String::new(),
      selected: SelectedSet::new(),
      results: Vec::new(),
      rows: RowIndex::default(),
      navigation: NavigationTracker::default(),
      phase: SearchPhase::Idle,
      latency,
      debounce,
      focus: Focus::Search,
      last_token: 0,
    }
  }

  pub fn query(&self) -> &str {
    &self.query
  }

  pub fn selected(&self) -> &SelectedSet {
    &self.selected
  }

  /// The last list delivered by a lookup, whether or not it is visible
  pub fn results(&self) -> &[Character] {
    &self.results
  }

  pub fn phase(&self) -> &SearchPhase {
    &self.phase
  }

  pub fn focus(&self) -> Focus {
    self.focus
  }

  pub fn focused_index(&self) -> Option<usize> {
    self.navigation.focused()
  }

  pub fn latency(&self) -> &SimulatedLatency {
    &self.latency
  }

  pub fn is_searching(&self) -> bool {
    matches!(self.phase, SearchPhase::Searching(_))
  }

  /// Whether the results popover is shown at all
  pub fn popover_open(&self) -> bool {
    !self.query.is_empty()
  }

  /// Move typed input to another part of the widget
  pub fn set_focus(&mut self, focus: Focus) {
    if focus == Focus::Results && self.navigation.focused().is_none() {
      return;
    }
    if focus != Focus::Results {
      self.navigation.blur();
    }
    self.focus = focus;
  }

  /// Alternate between the latency and search fields
  pub fn cycle_focus(&mut self) {
    let next = match self.focus {
      Focus::Latency => Focus::Search,
      Focus::Search | Focus::Results => Focus::Latency,
    };
    self.set_focus(next);
  }

  /// Replace the query. A non-empty query schedules a debounced lookup that
  /// supersedes any pending one; an empty query cancels it and returns to idle.
  pub fn set_query(&mut self, query: &str) -> Option<Effect> {
    if query == self.query {
      return None;
    }
    self.query = query.to_string();

    if self.query.is_empty() {
      let had_pending = self.phase.pending_token().is_some();
      self.phase = SearchPhase::Idle;
      self.navigation.blur();
      debug!("Query cleared, search idle");
      return had_pending.then_some(Effect::CancelPending);
    }

    self.last_token += 1;
    let token = RequestToken(self.last_token);
    self.phase = SearchPhase::Debouncing(token);
    trace!(token = token.value(), query = %self.query, "Scheduling lookup");

    Some(Effect::Schedule(LookupRequest {
      token,
      query: self.query.clone(),
      debounce: self.debounce,
      simulated_delay: self.latency.duration(),
    }))
  }

  /// Append a typed character to the query
  pub fn push_char(&mut self, c: char) -> Option<Effect> {
    let mut query = self.query.clone();
    query.push(c);
    self.set_query(&query)
  }

  /// Backspace in the search field: delete the last character, or remove the
  /// most recently selected tag when the query is already empty.
  pub fn backspace(&mut self) -> Option<Effect> {
    if self.query.is_empty() {
      if let Some(removed) = self.selected.pop_last() {
        debug!("Removed last selected tag {}", removed.name);
      }
      return None;
    }

    let mut query = self.query.clone();
    query.pop();
    self.set_query(&query)
  }

  /// Escape or the clear control: empty the query, collapse the popover and
  /// return focus to the search field. The selection is untouched.
  pub fn clear_query(&mut self) -> Option<Effect> {
    self.focus = Focus::Search;
    self.navigation.blur();
    self.set_query("")
  }

  /// Result rows currently on screen, if the listing is visible
  fn visible_rows(&self) -> Option<&[Character]> {
    match self.phase {
      SearchPhase::Debouncing(_) | SearchPhase::Results if self.popover_open() && !self.results.is_empty() => {
        Some(&self.results)
      }
      _ => None,
    }
  }

  fn after_navigation(&mut self) {
    if self.navigation.focused().is_some() {
      self.focus = Focus::Results;
    }
  }

  /// Arrow down
  pub fn move_next(&mut self) {
    if self.visible_rows().is_some() {
      self.navigation.move_next();
      self.after_navigation();
    }
  }

  /// Arrow up
  pub fn move_previous(&mut self) {
    if self.visible_rows().is_some() {
      self.navigation.move_previous();
      self.after_navigation();
    }
  }

  /// Enter or Space on the focused row
  pub fn toggle_focused(&mut self) -> Option<Toggled> {
    let index = self.navigation.focused()?;
    let character = self.visible_rows()?.get(index)?.clone();
    Some(self.toggle(&character))
  }

  /// A click on a result row: focus it and toggle its membership
  pub fn click_result(&mut self, id: CharacterId) -> Option<Toggled> {
    self.visible_rows()?;
    let index = self.rows.get(id)?;
    self.navigation.focus(index);
    self.after_navigation();
    let character = self.results.get(index)?.clone();
    Some(self.toggle(&character))
  }

  /// Toggle membership of a character by identifier
  pub fn toggle(&mut self, character: &Character) -> Toggled {
    let toggled = self.selected.toggle(character);
    debug!("{:?} {} ({})", toggled, character.name, character.id);
    toggled
  }

  /// Remove a tag explicitly
  pub fn remove_selected(&mut self, id: CharacterId) -> Option<Character> {
    self.selected.remove(id)
  }

  /// Empty the selected set unconditionally
  pub fn deselect_all(&mut self) {
    self.selected.clear();
  }

  /// Type into the latency field
  pub fn latency_push(&mut self, c: char) {
    self.latency.push(c);
  }

  /// Backspace in the latency field
  pub fn latency_pop(&mut self) {
    self.latency.pop();
  }

  /// The debounce window for a request has elapsed and the lookup is running
  pub fn on_lookup_started(&mut self, token: RequestToken) {
    if self.phase == SearchPhase::Debouncing(token) {
      self.phase = SearchPhase::Searching(token);
    } else {
      trace!(token = token.value(), "Ignoring start of superseded lookup");
    }
  }

  /// A lookup resolved. Returns `false` when the response was stale and
  /// discarded.
  pub fn on_lookup_finished(&mut self, token: RequestToken, outcome: Result<Vec<Character>, LookupError>) -> bool {
    if self.phase.pending_token() != Some(token) {
      debug!(token = token.value(), "Discarding stale lookup response");
      return false;
    }

    match outcome {
      Ok(results) => {
        debug!(token = token.value(), count = results.len(), "Lookup resolved");
        self.rows = RowIndex::rebuild(&results);
        self.navigation.set_item_count(results.len());
        self.results = results;
        self.phase = SearchPhase::Results;
      }
      Err(error) => {
        debug!(token = token.value(), "Lookup failed: {error}");
        self.rows = RowIndex::default();
        self.results.clear();
        self.navigation.set_item_count(0);
        self.phase = SearchPhase::Failed(error);
      }
    }

    if self.focus == Focus::Results && self.navigation.focused().is_none() {
      self.focus = Focus::Search;
    }
    true
  }

  /// What the results popover should show right now
  pub fn view(&self) -> PopoverView<'_> {
    let status = match &self.phase {
      SearchPhase::Searching(_) => LookupStatus::Searching,
      SearchPhase::Failed(error) => LookupStatus::Failed(error),
      _ => LookupStatus::Settled,
    };
    let results: &[Character] = match self.phase {
      SearchPhase::Failed(_) => &[],
      _ => &self.results,
    };

    present(results, &self.selected, &self.query, status, self.navigation.focused())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::selection::tests::character;

  fn scheduled(effect: Option<Effect>) -> LookupRequest {
    match effect {
      Some(Effect::Schedule(request)) => request,
      other => panic!("expected a scheduled lookup, got {other:?}"),
    }
  }

  fn type_query(controller: &mut SearchController, text: &str) -> LookupRequest {
    let mut last = None;
    for c in text.chars() {
      last = Some(scheduled(controller.push_char(c)));
    }
    last.expect("query must not be empty")
  }

  fn pickles() -> Vec<Character> {
    vec![character(265, "Pickle Rick"), character(266, "Pickle")]
  }

  #[test]
  fn test_pickle_scenario() {
    let mut controller = SearchController::default();

    let request = type_query(&mut controller, "pickle");
    assert_eq!(request.query, "pickle");
    assert_eq!(request.debounce, Duration::from_millis(200));
    assert_eq!(controller.phase(), &SearchPhase::Debouncing(request.token));

    controller.on_lookup_started(request.token);
    assert_eq!(controller.view(), PopoverView::Searching);

    assert!(controller.on_lookup_finished(request.token, Ok(pickles())));
    let PopoverView::Listing { header, rows } = controller.view() else {
      panic!("expected a listing");
    };
    assert_eq!(header.label(), "0 selected.");
    assert!(rows.iter().all(|row| row.name.matched() == Some("Pickle")));

    assert_eq!(controller.click_result(CharacterId(265)), Some(Toggled::Added));
    let PopoverView::Listing { header, .. } = controller.view() else {
      panic!("expected a listing");
    };
    assert_eq!(header.label(), "1 selected.");

    assert_eq!(controller.clear_query(), None);
    assert_eq!(controller.backspace(), None);
    assert!(controller.selected().is_empty());
    assert_eq!(controller.view(), PopoverView::Hidden);
  }

  #[test]
  fn test_each_edit_supersedes_previous_token() {
    let mut controller = SearchController::default();

    let first = scheduled(controller.push_char('r'));
    let second = scheduled(controller.push_char('i'));
    assert!(second.token > first.token);

    // The superseded lookup cannot start or land
    controller.on_lookup_started(first.token);
    assert_eq!(controller.phase(), &SearchPhase::Debouncing(second.token));
    assert!(!controller.on_lookup_finished(first.token, Ok(pickles())));
    assert!(controller.results().is_empty());

    controller.on_lookup_started(second.token);
    assert!(controller.on_lookup_finished(second.token, Ok(vec![character(1, "Rick Sanchez")])));
    assert_eq!(controller.results().len(), 1);
  }

  #[test]
  fn test_stale_response_after_results_is_discarded() {
    let mut controller = SearchController::default();
    let old = scheduled(controller.push_char('p'));
    let new = scheduled(controller.push_char('i'));

    controller.on_lookup_finished(new.token, Ok(vec![character(1, "Rick Sanchez")]));
    assert!(!controller.on_lookup_finished(old.token, Ok(pickles())));
    assert_eq!(controller.results()[0].name, "Rick Sanchez");
  }

  #[test]
  fn test_clearing_query_cancels_and_keeps_selection() {
    let mut controller = SearchController::default();
    let rick = character(1, "Rick Sanchez");
    controller.toggle(&rick);

    let request = type_query(&mut controller, "rick");
    assert_eq!(controller.clear_query(), Some(Effect::CancelPending));
    assert_eq!(controller.phase(), &SearchPhase::Idle);
    assert_eq!(controller.selected().len(), 1);

    // A response for the abandoned query is not displayed
    assert!(!controller.on_lookup_finished(request.token, Ok(pickles())));
    assert_eq!(controller.view(), PopoverView::Hidden);
  }

  #[test]
  fn test_backspace_edits_query_before_removing_tags() {
    let mut controller = SearchController::default();
    controller.toggle(&character(1, "Rick"));
    controller.toggle(&character(2, "Morty"));
    type_query(&mut controller, "ab");

    assert!(matches!(controller.backspace(), Some(Effect::Schedule(_))));
    assert_eq!(controller.query(), "a");
    assert_eq!(controller.backspace(), Some(Effect::CancelPending));
    assert_eq!(controller.selected().len(), 2);

    controller.backspace();
    let names: Vec<_> = controller.selected().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Rick"]);
  }

  #[test]
  fn test_backspace_on_empty_selection_is_noop() {
    let mut controller = SearchController::default();
    assert_eq!(controller.backspace(), None);
    assert!(controller.selected().is_empty());
  }

  #[test]
  fn test_keyboard_navigation_and_toggle() {
    let mut controller = SearchController::default();
    let request = type_query(&mut controller, "pickle");
    controller.on_lookup_finished(request.token, Ok(pickles()));

    controller.move_next();
    controller.move_next();
    controller.move_next();
    assert_eq!(controller.focused_index(), Some(1));
    assert_eq!(controller.focus(), Focus::Results);

    assert_eq!(controller.toggle_focused(), Some(Toggled::Added));
    assert!(controller.selected().contains(CharacterId(266)));
    assert_eq!(controller.toggle_focused(), Some(Toggled::Removed));

    controller.move_previous();
    controller.move_previous();
    assert_eq!(controller.focused_index(), Some(0));
  }

  #[test]
  fn test_navigation_ignored_while_popover_hidden_or_searching() {
    let mut controller = SearchController::default();
    controller.move_next();
    assert_eq!(controller.focused_index(), None);

    let request = type_query(&mut controller, "x");
    controller.on_lookup_started(request.token);
    controller.move_next();
    assert_eq!(controller.focused_index(), None);
    assert_eq!(controller.focus(), Focus::Search);
  }

  #[test]
  fn test_shrinking_results_clamps_focus() {
    let mut controller = SearchController::default();
    let request = type_query(&mut controller, "pickle");
    controller.on_lookup_finished(request.token, Ok(pickles()));
    controller.move_next();
    controller.move_next();

    let request = scheduled(controller.push_char('s'));
    controller.on_lookup_finished(request.token, Ok(vec![character(300, "Pickles")]));
    assert_eq!(controller.focused_index(), Some(0));

    let request = scheduled(controller.push_char('z'));
    controller.on_lookup_finished(request.token, Ok(vec![]));
    assert_eq!(controller.focused_index(), None);
    assert_eq!(controller.focus(), Focus::Search);
    assert_eq!(controller.view(), PopoverView::Empty);
  }

  #[test]
  fn test_failure_is_displayed_and_recoverable() {
    let mut controller = SearchController::default();
    let request = type_query(&mut controller, "rick");
    controller.on_lookup_finished(request.token, Err(LookupError::default()));

    assert_eq!(
      controller.view(),
      PopoverView::Failed {
        message: "Error fetching character"
      }
    );

    let request = scheduled(controller.push_char('y'));
    controller.on_lookup_finished(request.token, Ok(pickles()));
    assert!(matches!(controller.view(), PopoverView::Listing { .. }));
  }

  #[test]
  fn test_failure_drops_previous_results() {
    let mut controller = SearchController::default();
    let request = type_query(&mut controller, "rick");
    controller.on_lookup_finished(
      request.token,
      Ok(vec![character(1, "Rick Sanchez"), character(2, "Rick Prime")]),
    );

    let request = scheduled(controller.push_char('y'));
    controller.on_lookup_finished(request.token, Err(LookupError::default()));
    assert!(controller.results().is_empty());

    // Editing again must not resurrect the rows from before the failure
    scheduled(controller.push_char('q'));
    assert_eq!(controller.view(), PopoverView::Empty);

    controller.move_next();
    assert_eq!(controller.focused_index(), None);
    assert_eq!(controller.click_result(CharacterId(1)), None);
    assert!(controller.selected().is_empty());
  }

  #[test]
  fn test_selection_survives_new_results() {
    let mut controller = SearchController::default();
    let request = type_query(&mut controller, "pickle");
    controller.on_lookup_finished(request.token, Ok(pickles()));
    controller.click_result(CharacterId(265));

    controller.clear_query();
    let request = type_query(&mut controller, "morty");
    controller.on_lookup_finished(request.token, Ok(vec![character(2, "Morty Smith")]));

    assert!(controller.selected().contains(CharacterId(265)));
    assert!(controller.click_result(CharacterId(265)).is_none());
  }

  #[test]
  fn test_latency_feeds_next_request() {
    let mut controller = SearchController::default();
    controller.set_focus(Focus::Latency);
    controller.latency_pop();
    for c in "500".chars() {
      controller.latency_push(c);
    }

    let request = scheduled(controller.push_char('x'));
    assert_eq!(request.simulated_delay, Duration::from_millis(500));

    controller.latency_push('a');
    let request = scheduled(controller.push_char('y'));
    assert_eq!(request.simulated_delay, Duration::ZERO);
    assert_eq!(controller.latency().text(), "0");
  }

  #[test]
  fn test_focus_cycling() {
    let mut controller = SearchController::default();
    assert_eq!(controller.focus(), Focus::Search);

    controller.cycle_focus();
    assert_eq!(controller.focus(), Focus::Latency);
    controller.cycle_focus();
    assert_eq!(controller.focus(), Focus::Search);

    // Results cannot take focus without a focused row
    controller.set_focus(Focus::Results);
    assert_eq!(controller.focus(), Focus::Search);
  }

  #[test]
  fn test_deselect_all_and_remove() {
    let mut controller = SearchController::default();
    controller.toggle(&character(1, "Rick"));
    controller.toggle(&character(2, "Morty"));

    assert!(controller.remove_selected(CharacterId(1)).is_some());
    assert_eq!(controller.selected().len(), 1);
    controller.deselect_all();
    assert!(controller.selected().is_empty());
  }
}
