//! # Interactive Character Picker
//!
//! Terminal rendition of the search-and-multi-select widget: a latency field,
//! a search field carrying the selected tags, and a results popover. State
//! lives in [`citadel_core::SearchController`]; this module supplies the
//! runtime around it.

pub mod app;
pub mod dispatch;
pub mod input;
pub mod terminal;
pub mod ui;

pub use app::{Picker, PickerExit};
