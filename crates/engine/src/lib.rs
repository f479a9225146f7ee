//! Engine module - automated play on top of the core grid.
//!
//! The core exposes a single mutating entry point (`Grid::select`). Everything here
//! drives the grid through that entry point only, exactly as a player would.

pub mod autoplay;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use autoplay::{Direction, MoveRecord, RandomMover};
