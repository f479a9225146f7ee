//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behavior beyond parsing and geometry, so they
//! can be shared by the core engine, the terminal front end, and the autoplay report.
//!
//! # Coordinates
//!
//! Grid positions are `(x, y)` with `x` growing to the right and `y` growing
//! **upward**: row `y = 0` is the bottom of the field and tokens fall toward it.
//! Coordinates are signed so callers can express neighbors (and out-of-range
//! clicks) without wrapping.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_GRID_WIDTH` | 8 | Columns of a new field |
//! | `DEFAULT_GRID_HEIGHT` | 8 | Rows of a new field |
//! | `DEFAULT_SEED` | 0 | Generator seed used when none is configured |
//! | `MATCH_LEN` | 3 | Tokens in one match window |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{GridAction, Position, TileColor};
//!
//! let color = TileColor::from_str("red").unwrap();
//! assert_eq!(color, TileColor::Red);
//!
//! let a = Position::new(2, 3);
//! assert!(a.is_adjacent(Position::new(2, 4)));
//! assert!(!a.is_adjacent(Position::new(3, 4)));
//!
//! assert_eq!(GridAction::from_str("select"), Some(GridAction::Select));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default field width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 8;

/// Default field height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 8;

/// Default generator seed.
pub const DEFAULT_SEED: u32 = 0;

/// Number of tokens in a match window.
pub const MATCH_LEN: usize = 3;

/// Smallest dimension on which a match can geometrically form.
pub const MIN_PLAYABLE_DIM: u16 = MATCH_LEN as u16;

/// Tile colors available to the generator.
///
/// The default palette is all six colors; a generator may be configured with any
/// subset of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileColor {
    Blue,
    Cyan,
    Green,
    Magenta,
    Red,
    Yellow,
}

impl TileColor {
    /// Every color, in palette order.
    pub const ALL: [TileColor; 6] = [
        TileColor::Blue,
        TileColor::Cyan,
        TileColor::Green,
        TileColor::Magenta,
        TileColor::Red,
        TileColor::Yellow,
    ];

    /// Parse a color from its name or first letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::TileColor;
    ///
    /// assert_eq!(TileColor::from_str("Blue"), Some(TileColor::Blue));
    /// assert_eq!(TileColor::from_str("m"), Some(TileColor::Magenta));
    /// assert_eq!(TileColor::from_str("orange"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "blue" | "b" => Some(TileColor::Blue),
            "cyan" | "c" => Some(TileColor::Cyan),
            "green" | "g" => Some(TileColor::Green),
            "magenta" | "m" => Some(TileColor::Magenta),
            "red" | "r" => Some(TileColor::Red),
            "yellow" | "y" => Some(TileColor::Yellow),
            _ => None,
        }
    }

    /// Convert to lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            TileColor::Blue => "blue",
            TileColor::Cyan => "cyan",
            TileColor::Green => "green",
            TileColor::Magenta => "magenta",
            TileColor::Red => "red",
            TileColor::Yellow => "yellow",
        }
    }

    /// Single uppercase letter, used by text dumps and the side panel.
    pub fn letter(&self) -> char {
        match self {
            TileColor::Blue => 'B',
            TileColor::Cyan => 'C',
            TileColor::Green => 'G',
            TileColor::Magenta => 'M',
            TileColor::Red => 'R',
            TileColor::Yellow => 'Y',
        }
    }
}

impl fmt::Display for TileColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cell coordinate on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// True when `other` is exactly one step away along exactly one axis.
    ///
    /// Diagonal neighbors and anything two or more steps away are not adjacent.
    pub fn is_adjacent(self, other: Position) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx + dy == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Player-facing actions produced by the input layer.
///
/// Cursor movement uses screen directions: `MoveUp` moves toward larger `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    /// Move the cursor one cell left
    MoveLeft,
    /// Move the cursor one cell right
    MoveRight,
    /// Move the cursor one row up
    MoveUp,
    /// Move the cursor one row down
    MoveDown,
    /// Select the cell under the cursor (or swap with the pending selection)
    Select,
    /// Let the autoplay driver make one random move
    RandomMove,
    /// Replace the field with a freshly generated one
    NewBoard,
}

impl GridAction {
    /// Parse action from its camelCase name
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GridAction::MoveLeft),
            "moveright" => Some(GridAction::MoveRight),
            "moveup" => Some(GridAction::MoveUp),
            "movedown" => Some(GridAction::MoveDown),
            "select" => Some(GridAction::Select),
            "randommove" => Some(GridAction::RandomMove),
            "newboard" => Some(GridAction::NewBoard),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GridAction::MoveLeft => "moveLeft",
            GridAction::MoveRight => "moveRight",
            GridAction::MoveUp => "moveUp",
            GridAction::MoveDown => "moveDown",
            GridAction::Select => "select",
            GridAction::RandomMove => "randomMove",
            GridAction::NewBoard => "newBoard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_is_four_directional() {
        let p = Position::new(3, 3);
        assert!(p.is_adjacent(Position::new(2, 3)));
        assert!(p.is_adjacent(Position::new(4, 3)));
        assert!(p.is_adjacent(Position::new(3, 2)));
        assert!(p.is_adjacent(Position::new(3, 4)));

        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Position::new(4, 4)));
        assert!(!p.is_adjacent(Position::new(5, 3)));
        assert!(!p.is_adjacent(Position::new(3, 1)));
    }

    #[test]
    fn color_names_roundtrip() {
        for color in TileColor::ALL {
            assert_eq!(TileColor::from_str(color.as_str()), Some(color));
        }
    }

    #[test]
    fn action_names_roundtrip() {
        for action in [
            GridAction::MoveLeft,
            GridAction::MoveRight,
            GridAction::MoveUp,
            GridAction::MoveDown,
            GridAction::Select,
            GridAction::RandomMove,
            GridAction::NewBoard,
        ] {
            assert_eq!(GridAction::from_str(action.as_str()), Some(action));
        }
    }
}
