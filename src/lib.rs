//! TUI match-three (workspace facade crate).
//!
//! The rules live in dedicated crates under `crates/`; this package re-exports them as
//! `tui_match3::{core,engine,input,term,types}` and adds the process-level pieces shared
//! by both binaries: layered configuration and tracing setup.

pub mod config;
pub mod logging;

pub use tui_match3_core as core;
pub use tui_match3_engine as engine;
pub use tui_match3_input as input;
pub use tui_match3_term as term;
pub use tui_match3_types as types;
