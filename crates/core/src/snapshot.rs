use crate::grid::CascadeReport;
use crate::token::TokenId;
use crate::types::{Position, TileColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenSnapshot {
    pub id: TokenId,
    pub position: Position,
    pub color: TileColor,
    pub selected: bool,
    pub destroyed: bool,
}

/// Read-only copy of a grid for rendering.
///
/// `tokens` is row-major with the bottom row first, matching the grid's storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridSnapshot {
    pub width: u16,
    pub height: u16,
    pub tokens: Vec<TokenSnapshot>,
    pub selection: Option<Position>,
    pub swaps: u32,
    pub last_report: Option<CascadeReport>,
}

impl GridSnapshot {
    pub fn get(&self, p: Position) -> Option<&TokenSnapshot> {
        if p.x < 0 || p.y < 0 || p.x >= self.width as i32 || p.y >= self.height as i32 {
            return None;
        }
        self.tokens
            .get(p.y as usize * self.width as usize + p.x as usize)
    }

    /// One string per row, top row first, a color letter per cell (`.` if destroyed).
    pub fn rows(&self) -> Vec<String> {
        (0..self.height as i32)
            .rev()
            .map(|y| {
                (0..self.width as i32)
                    .map(|x| match self.get(Position::new(x, y)) {
                        Some(t) if !t.destroyed => t.color.letter(),
                        _ => '.',
                    })
                    .collect()
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.tokens.clear();
        self.selection = None;
        self.swaps = 0;
        self.last_report = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap_1x2() -> GridSnapshot {
        let token = |y: i32, color: TileColor| TokenSnapshot {
            id: TokenId(y as u32),
            position: Position::new(0, y),
            color,
            selected: false,
            destroyed: false,
        };
        GridSnapshot {
            width: 1,
            height: 2,
            tokens: vec![token(0, TileColor::Red), token(1, TileColor::Blue)],
            ..GridSnapshot::default()
        }
    }

    #[test]
    fn rows_list_top_first() {
        assert_eq!(snap_1x2().rows(), vec!["B".to_string(), "R".to_string()]);
    }

    #[test]
    fn destroyed_cells_render_as_dots() {
        let mut snap = snap_1x2();
        snap.tokens[1].destroyed = true;
        assert_eq!(snap.rows(), vec![".".to_string(), "R".to_string()]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut snap = snap_1x2();
        snap.swaps = 4;
        snap.clear();
        assert_eq!(snap, GridSnapshot::default());
    }
}
