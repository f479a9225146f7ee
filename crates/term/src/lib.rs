//! Terminal rendering for the match-three grid.
//!
//! A small game-oriented rendering layer: the view paints a snapshot into a plain
//! framebuffer, and the renderer flushes framebuffers to the terminal as diffs.
//! No widget toolkit sits in between, which keeps tile aspect ratio under direct
//! control (2 columns per tile by default).

pub mod fb;
pub mod grid_view;
pub mod renderer;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use grid_view::{tile_rgb, GridView, Layout, Viewport};
pub use renderer::{changed_runs, encode_into, TerminalRenderer};
