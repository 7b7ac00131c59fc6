//! JSON fixtures shaped like the character API
//!
//! Bodies are built as `serde_json::Value` so any crate can deserialize them
//! into its own types or hand them to a mock server.

use serde_json::{Value, json};

/// A single character as the API returns it
pub fn character_json(id: u32, name: &str, episodes: usize) -> Value {
  let episode: Vec<String> = (1..=episodes)
    .map(|n| format!("https://rickandmortyapi.com/api/episode/{n}"))
    .collect();

  json!({
      "id": id,
      "name": name,
      "status": "Alive",
      "species": "Human",
      "type": "",
      "gender": "Male",
      "origin": { "name": "Earth (C-137)", "url": "https://rickandmortyapi.com/api/location/1" },
      "location": { "name": "Citadel of Ricks", "url": "https://rickandmortyapi.com/api/location/3" },
      "image": format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
      "episode": episode,
      "url": format!("https://rickandmortyapi.com/api/character/{id}"),
      "created": "2017-11-04T18:48:46.250Z"
  })
}

/// A single-page search response wrapping `characters`
pub fn characters_page(characters: Vec<Value>) -> Value {
  json!({
      "info": {
          "count": characters.len(),
          "pages": 1,
          "next": null,
          "prev": null
      },
      "results": characters
  })
}

/// The body the API sends with a 404 when a name matches nothing
pub fn nothing_here() -> Value {
  json!({ "error": "There is nothing here" })
}
