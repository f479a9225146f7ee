//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GridAction`] and tracks the
//! keyboard cursor that stands in for a pointer over the field. Mouse clicks are
//! mapped to cells by the terminal view, which knows the on-screen layout.

pub mod cursor;
pub mod map;

pub use tui_match3_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, should_quit};
