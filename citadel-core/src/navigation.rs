//! # Keyboard Navigation Tracker
//!
//! Tracks a single focused index over a list whose length changes as results
//! arrive. `None` means nothing is focused. The index is clamped whenever the
//! item count changes so it can never point past the end of the list.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationTracker {
  focused: Option<usize>,
  item_count: usize,
}

impl NavigationTracker {
  pub fn new(item_count: usize) -> Self {
    Self {
      focused: None,
      item_count,
    }
  }

  /// Currently focused index
  pub fn focused(&self) -> Option<usize> {
    self.focused
  }

  /// Move to the next item, stopping at the last one
  pub fn move_next(&mut self) -> Option<usize> {
    if self.item_count == 0 {
      return self.focused;
    }

    let last = self.item_count - 1;
    self.focused = Some(match self.focused {
      None => 0,
      Some(index) => (index + 1).min(last),
    });
    self.focused
  }

  /// Move to the previous item, stopping at the first one
  pub fn move_previous(&mut self) -> Option<usize> {
    if self.item_count == 0 {
      return self.focused;
    }

    self.focused = Some(self.focused.map_or(0, |index| index.saturating_sub(1)));
    self.focused
  }

  /// Focus a specific item (e.g. after a click). Out-of-range indices are
  /// ignored.
  pub fn focus(&mut self, index: usize) {
    if index < self.item_count {
      self.focused = Some(index);
    }
  }

  /// Drop focus without changing the tracked list
  pub fn blur(&mut self) {
    self.focused = None;
  }

  /// Track a new item count. A count of zero resets focus; a shrinking list
  /// clamps focus to its new last item.
  pub fn set_item_count(&mut self, item_count: usize) {
    self.item_count = item_count;
    self.focused = match (self.focused, item_count) {
      (_, 0) => None,
      (Some(index), count) if index >= count => Some(count - 1),
      (focused, _) => focused,
    };
  }
}
