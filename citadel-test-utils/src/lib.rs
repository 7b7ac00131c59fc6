//! Test utilities shared across the citadel workspace
//!
//! This crate provides common testing infrastructure including:
//! - XDG directory and API URL isolation ([`EnvTestGuard`])
//! - JSON bodies shaped like the character API's responses ([`fixtures`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

// Re-export commonly used items
pub use env::EnvTestGuard;
pub use fixtures::{character_json, characters_page, nothing_here};
