//! # Selected Set
//!
//! Ordered, identifier-unique collection of selected characters. Insertion
//! order drives tag rendering and Backspace removal (last in, first out).
//! Membership is decided by [`CharacterId`] only, never by list position, so
//! a character stays selected after it drops out of the visible results.

use crate::character::{Character, CharacterId};

/// Outcome of toggling a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
  Added,
  Removed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedSet {
  items: Vec<Character>,
}

impl SelectedSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Whether a character with this identifier is selected
  pub fn contains(&self, id: CharacterId) -> bool {
    self.items.iter().any(|selected| selected.id == id)
  }

  /// Selected characters in insertion order
  pub fn iter(&self) -> impl Iterator<Item = &Character> {
    self.items.iter()
  }

  /// Selected characters in insertion order
  pub fn as_slice(&self) -> &[Character] {
    &self.items
  }

  /// Add the character if absent, remove it if present
  pub fn toggle(&mut self, character: &Character) -> Toggled {
    if self.remove(character.id).is_some() {
      Toggled::Removed
    } else {
      self.items.push(character.clone());
      Toggled::Added
    }
  }

  /// Remove by identifier, returning the removed character
  pub fn remove(&mut self, id: CharacterId) -> Option<Character> {
    let position = self.items.iter().position(|selected| selected.id == id)?;
    Some(self.items.remove(position))
  }

  /// Remove the most recently added character
  pub fn pop_last(&mut self) -> Option<Character> {
    self.items.pop()
  }

  /// Empty the set unconditionally
  pub fn clear(&mut self) {
    self.items.clear();
  }
}
