//! # Citadel CLI Library
//!
//! Modules behind the `citadel` binary: the command-line surface, tracing
//! setup, the panic handler and the interactive picker.

pub mod cli;
pub mod consts;
pub mod logging;
pub mod panic;
pub mod picker;
