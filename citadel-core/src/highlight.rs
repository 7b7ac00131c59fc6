//! # Match Highlighting
//!
//! Splits a display name around the first case-insensitive occurrence of the
//! search key so the matched part can be rendered distinctly while the
//! original casing is preserved.

use std::ops::Range;

/// A display name split around the matched search key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Highlighted<'a> {
  /// The key was found; `matched` keeps the name's own casing
  Match {
    before: &'a str,
    matched: &'a str,
    after: &'a str,
  },
  /// No occurrence, render the name unmodified
  Plain(&'a str),
}

impl<'a> Highlighted<'a> {
  /// The matched fragment, if any
  pub fn matched(&self) -> Option<&'a str> {
    match self {
      Highlighted::Match { matched, .. } => Some(matched),
      Highlighted::Plain(_) => None,
    }
  }
}

/// Split `name` around the first case-insensitive occurrence of `key`.
///
/// An empty key never matches.
pub fn highlight_match<'a>(name: &'a str, key: &str) -> Highlighted<'a> {
  match find_case_insensitive(name, key) {
    Some(range) => Highlighted::Match {
      before: &name[..range.start],
      matched: &name[range.clone()],
      after: &name[range.end..],
    },
    None => Highlighted::Plain(name),
  }
}

/// Byte range of the first case-insensitive occurrence of `needle`.
///
/// Comparison is per character using full Unicode lowercasing, so the range
/// always lies on character boundaries of `haystack` even when lowercasing
/// changes byte lengths.
pub fn find_case_insensitive(haystack: &str, needle: &str) -> Option<Range<usize>> {
  if needle.is_empty() {
    return None;
  }

  let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();

  for (start, _) in haystack.char_indices() {
    if let Some(end) = match_at(&haystack[start..], &needle) {
      return Some(start..start + end);
    }
  }

  None
}

/// Length in bytes of the prefix of `text` whose lowercase form equals
/// `needle`, if there is one.
fn match_at(text: &str, needle: &[char]) -> Option<usize> {
  let mut matched = 0;

  for (offset, c) in text.char_indices() {
    for lower in c.to_lowercase() {
      if needle.get(matched) != Some(&lower) {
        return None;
      }
      matched += 1;
    }

    if matched == needle.len() {
      return Some(offset + c.len_utf8());
    }
  }

  None
}
