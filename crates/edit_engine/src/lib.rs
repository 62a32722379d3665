//! Edit Engine - selection state machine and text editing
//!
//! This crate implements the write side of the editor: the directional
//! selection state machine driven by arrow keys, single-paragraph text
//! replacement that keeps formatting runs consistent, range formatting and
//! the editor settings that tune them.

mod command;
mod error;
mod executor;
mod selection;
mod settings;

pub use command::*;
pub use error::*;
pub use executor::*;
pub use selection::*;
pub use settings::*;
