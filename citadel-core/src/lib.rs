//! # Citadel Core Library
//!
//! Core library for citadel providing the character model, the
//! search/selection state machine behind the interactive picker, result
//! presentation, and configuration. Nothing here performs I/O on its own:
//! lookups are requested as effects and executed by the caller.

pub mod character;
pub mod config;
pub mod controller;
pub mod error;
pub mod highlight;
pub mod latency;
pub mod navigation;
pub mod output;
pub mod selection;
pub mod view;

// Re-export main types
pub use character::{Character, CharacterId, CharactersResponse, Gender, LocationRef, PageInfo, Species, Status};
pub use config::{ConfigDirs, Settings, get_config_dirs};
pub use controller::{Effect, Focus, LookupRequest, RequestToken, SearchController, SearchPhase};
pub use error::{InvalidLatencyError, LookupError};
pub use latency::SimulatedLatency;
pub use navigation::NavigationTracker;
pub use output::{ColorMode, print_info, print_success};
pub use selection::{SelectedSet, Toggled};
pub use view::{PopoverView, ResultRow, SelectionHeader};
