//! Keyboard cursor over the field.

use crate::types::{GridAction, Position};

/// A cell pointer clamped to the field.
///
/// `MoveUp` moves toward larger `y`, which is drawn higher on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    position: Position,
    width: u16,
    height: u16,
}

impl Cursor {
    /// Cursor starting at the bottom-left cell.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            position: Position::new(0, 0),
            width,
            height,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move the cursor to `p`, clamped into the field.
    pub fn set(&mut self, p: Position) {
        let max_x = (self.width as i32 - 1).max(0);
        let max_y = (self.height as i32 - 1).max(0);
        self.position = Position::new(p.x.clamp(0, max_x), p.y.clamp(0, max_y));
    }

    /// Apply a cursor action. Returns true if the cursor moved.
    ///
    /// Non-movement actions are ignored.
    pub fn apply(&mut self, action: GridAction) -> bool {
        let (dx, dy) = match action {
            GridAction::MoveLeft => (-1, 0),
            GridAction::MoveRight => (1, 0),
            GridAction::MoveUp => (0, 1),
            GridAction::MoveDown => (0, -1),
            _ => return false,
        };
        let before = self.position;
        self.set(before.offset(dx, dy));
        self.position != before
    }

    /// Adopt new field dimensions, keeping the cursor inside them.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.set(self.position);
    }
}
