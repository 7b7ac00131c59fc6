//! # Character Model
//!
//! Wire and domain types for characters returned by the Rick and Morty
//! character endpoint. Entities are immutable once deserialized; the picker
//! only ever compares them by [`CharacterId`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// A single character search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
  pub id: CharacterId,
  pub name: String,
  pub status: Status,
  pub species: Species,
  #[serde(rename = "type", default)]
  pub kind: String,
  pub gender: Gender,
  pub origin: LocationRef,
  pub location: LocationRef,
  pub image: String,
  #[serde(default)]
  pub episode: Vec<String>,
  pub url: String,
  pub created: DateTime<Utc>,
}

impl Character {
  /// Number of episodes this character appears in
  pub fn episode_count(&self) -> usize {
    self.episode.len()
  }
}

/// Reference to an origin or last known location
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationRef {
  pub name: String,
  #[serde(default)]
  pub url: String,
}

/// Pagination metadata attached to every list response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
  pub count: u32,
  pub pages: u32,
  pub next: Option<String>,
  pub prev: Option<String>,
}

/// Body of a character search response
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CharactersResponse {
  /// Absent when the API answered "nothing here"
  #[serde(default)]
  pub info: Option<PageInfo>,
  #[serde(default)]
  pub results: Vec<Character>,
}

impl CharactersResponse {
  /// An empty response, used when a name matches nothing
  pub fn empty() -> Self {
    Self::default()
  }
}

/// Life status of a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
  Alive,
  Dead,
  Unknown,
}

impl From<String> for Status {
  fn from(value: String) -> Self {
    match value.as_str() {
      "Alive" => Status::Alive,
      "Dead" => Status::Dead,
      _ => Status::Unknown,
    }
  }
}

impl From<Status> for String {
  fn from(value: Status) -> Self {
    value.to_string()
  }
}

impl fmt::Display for Status {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Status::Alive => write!(f, "Alive"),
      Status::Dead => write!(f, "Dead"),
      Status::Unknown => write!(f, "unknown"),
    }
  }
}

/// Species of a character. The API's list is open-ended, so anything beyond
/// the common values is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Species {
  Alien,
  Human,
  Other(String),
}

impl From<String> for Species {
  fn from(value: String) -> Self {
    match value.as_str() {
      "Alien" => Species::Alien,
      "Human" => Species::Human,
      _ => Species::Other(value),
    }
  }
}

impl From<Species> for String {
  fn from(value: Species) -> Self {
    value.to_string()
  }
}

impl fmt::Display for Species {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Species::Alien => write!(f, "Alien"),
      Species::Human => write!(f, "Human"),
      Species::Other(other) => write!(f, "{other}"),
    }
  }
}

/// Gender of a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
  Female,
  Male,
  Genderless,
  Unknown,
}

impl From<String> for Gender {
  fn from(value: String) -> Self {
    match value.as_str() {
      "Female" => Gender::Female,
      "Male" => Gender::Male,
      "Genderless" => Gender::Genderless,
      _ => Gender::Unknown,
    }
  }
}

impl From<Gender> for String {
  fn from(value: Gender) -> Self {
    value.to_string()
  }
}

impl fmt::Display for Gender {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Gender::Female => write!(f, "Female"),
      Gender::Male => write!(f, "Male"),
      Gender::Genderless => write!(f, "Genderless"),
      Gender::Unknown => write!(f, "unknown"),
    }
  }
}
