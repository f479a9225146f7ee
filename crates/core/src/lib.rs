//! Core match-three logic - pure, deterministic, and testable
//!
//! This crate contains the match-three rules: the token model, the constrained
//! generator, match detection, and the grid state machine that resolves a swap into
//! its full cascade. It has no dependencies on terminal I/O, which makes it:
//!
//! - **Deterministic**: the same seed and call sequence rebuild the same field
//! - **Testable**: scenarios can be laid out literally with [`Grid::from_rows`]
//! - **Portable**: any front end drives it through [`Grid::select`] and snapshots
//!
//! # Module Structure
//!
//! - [`token`]: one grid occupant with selection/destroy notifications
//! - [`generator`]: [`FieldGenerator`] trait and the seeded [`RandomGenerator`]
//! - [`matching`]: three-in-a-row windows and restricted color sets
//! - [`grid`]: selection, swap, cascade, collapse, and refill
//! - [`rng`]: small LCG used by the generator
//! - [`snapshot`]: read-only copy of the field for rendering
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{Grid, RandomGenerator, SelectOutcome};
//! use tui_match3_types::Position;
//!
//! let mut grid = Grid::new(8, 8, RandomGenerator::new(7)).unwrap();
//! assert!(grid.find_any_match().is_none());
//!
//! grid.select(Position::new(3, 3)).unwrap();
//! let outcome = grid.select(Position::new(4, 3)).unwrap();
//! assert!(matches!(outcome, SelectOutcome::Swapped { .. }));
//!
//! // Whatever the swap triggered has been fully resolved.
//! assert!(grid.find_any_match().is_none());
//! ```

pub mod error;
pub mod generator;
pub mod grid;
pub mod matching;
pub mod rng;
pub mod snapshot;
pub mod token;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use error::GeneratorError;
pub use generator::{FieldGenerator, RandomGenerator};
pub use grid::{CascadeReport, FieldChanged, Grid, SelectOutcome};
pub use matching::{find_any_match, find_match, restricted_colors, Axis, Match, Window};
pub use rng::SimpleRng;
pub use snapshot::{GridSnapshot, TokenSnapshot};
pub use token::{Token, TokenEvent, TokenId};
