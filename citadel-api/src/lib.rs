//! # Citadel API
//!
//! Client for the public Rick and Morty character API, plus the
//! [`CharacterLookup`] seam the interactive picker schedules lookups through.

pub mod client;
pub mod consts;
pub mod endpoints;
pub mod lookup;

pub use client::{RickAndMortyClient, create_client};
pub use lookup::CharacterLookup;
