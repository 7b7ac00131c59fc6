//! # Result Presentation
//!
//! Pure mapping from (result list, selected set, search key, lookup status)
//! to what the results popover should show. Rendering backends only draw
//! what this module decides; selection and focus changes flow back through
//! the controller.

use crate::character::Character;
use crate::error::LookupError;
use crate::highlight::{Highlighted, highlight_match};
use crate::selection::SelectedSet;

/// Status of the lookup feeding the popover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStatus<'a> {
  /// Nothing in flight; whatever results exist are current
  Settled,
  /// A lookup has been issued and not yet resolved
  Searching,
  /// The latest lookup failed
  Failed(&'a LookupError),
}

/// What the results popover displays. The variants are mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum PopoverView<'a> {
  /// Empty query, popover collapsed
  Hidden,
  /// Spinner
  Searching,
  /// The latest lookup failed
  Failed { message: &'a str },
  /// Query is non-empty, nothing is loading, and no results matched
  Empty,
  /// Zero or more result rows under a selection header
  Listing {
    header: SelectionHeader,
    rows: Vec<ResultRow<'a>>,
  },
}

/// Popover header: how many characters are selected and whether "Deselect
/// All" is offered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionHeader {
  pub selected_count: usize,
}

impl SelectionHeader {
  pub fn label(&self) -> String {
    format!("{} selected.", self.selected_count)
  }

  pub fn show_deselect_all(&self) -> bool {
    self.selected_count > 0
  }
}

/// A single result row
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow<'a> {
  pub character: &'a Character,
  pub name: Highlighted<'a>,
  pub selected: bool,
  pub focused: bool,
}

impl ResultRow<'_> {
  pub fn episodes_label(&self) -> String {
    format!("{} Episodes", self.character.episode_count())
  }
}

/// Decide the popover contents
pub fn present<'a>(
  results: &'a [Character],
  selected: &SelectedSet,
  search_key: &str,
  status: LookupStatus<'a>,
  focused: Option<usize>,
) -> PopoverView<'a> {
  if search_key.is_empty() {
    return PopoverView::Hidden;
  }

  match status {
    LookupStatus::Searching => PopoverView::Searching,
    LookupStatus::Failed(error) => PopoverView::Failed {
      message: error.message(),
    },
    LookupStatus::Settled if results.is_empty() => PopoverView::Empty,
    LookupStatus::Settled => PopoverView::Listing {
      header: SelectionHeader {
        selected_count: selected.len(),
      },
      rows: results
        .iter()
        .enumerate()
        .map(|(index, character)| ResultRow {
          character,
          name: highlight_match(&character.name, search_key),
          selected: selected.contains(character.id),
          focused: focused == Some(index),
        })
        .collect(),
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::selection::tests::character;

  fn pickles() -> Vec<Character> {
    vec![character(265, "Pickle Rick"), character(266, "Pickle")]
  }

  #[test]
  fn test_hidden_on_empty_key() {
    let results = pickles();
    let view = present(&results, &SelectedSet::new(), "", LookupStatus::Searching, None);
    assert_eq!(view, PopoverView::Hidden);
  }

  #[test]
  fn test_searching_wins_over_results() {
    let results = pickles();
    let view = present(&results, &SelectedSet::new(), "pickle", LookupStatus::Searching, None);
    assert_eq!(view, PopoverView::Searching);
  }

  #[test]
  fn test_empty_when_settled_without_results() {
    let view = present(&[], &SelectedSet::new(), "zzz", LookupStatus::Settled, None);
    assert_eq!(view, PopoverView::Empty);
  }

  #[test]
  fn test_failed_shows_message() {
    let error = LookupError::default();
    let view = present(&[], &SelectedSet::new(), "rick", LookupStatus::Failed(&error), None);
    assert_eq!(
      view,
      PopoverView::Failed {
        message: "Error fetching character"
      }
    );
  }

  #[test]
  fn test_listing_highlights_and_marks_selection() {
    let results = pickles();
    let mut selected = SelectedSet::new();
    selected.toggle(&results[0]);

    let PopoverView::Listing { header, rows } = present(&results, &selected, "pickle", LookupStatus::Settled, Some(1))
    else {
      panic!("expected a listing");
    };

    assert_eq!(header.label(), "1 selected.");
    assert!(header.show_deselect_all());
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.name.matched() == Some("Pickle")));
    assert!(rows[0].selected && !rows[0].focused);
    assert!(!rows[1].selected && rows[1].focused);
    assert_eq!(rows[0].episodes_label(), "1 Episodes");
  }

  #[test]
  fn test_header_without_selection_hides_deselect_all() {
    let header = SelectionHeader { selected_count: 0 };
    assert_eq!(header.label(), "0 selected.");
    assert!(!header.show_deselect_all());
  }
}
