use tracing::debug;

use crate::core::{FieldGenerator, GeneratorError, Grid, SelectOutcome, SimpleRng};
use crate::types::Position;

/// Swap direction from the first selected cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// One automated move and what the grid made of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Position,
    pub to: Position,
    pub outcome: SelectOutcome,
}

/// Issues random select pairs against a grid.
///
/// The first cell is drawn from the interior of the field (one cell in from every
/// edge) so that all four neighbors exist; on fields narrower than three cells the
/// whole axis is used and an out-of-range neighbor simply cancels the move.
#[derive(Debug, Clone)]
pub struct RandomMover {
    rng: SimpleRng,
}

impl RandomMover {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Pick the next pair of cells for a `width` x `height` field.
    pub fn next_pair(&mut self, width: u16, height: u16) -> (Position, Position) {
        let x = self.pick_coord(width);
        let y = self.pick_coord(height);
        let direction = Direction::ALL[self.rng.next_index(Direction::ALL.len())];
        let (dx, dy) = direction.delta();
        let from = Position::new(x, y);
        (from, from.offset(dx, dy))
    }

    fn pick_coord(&mut self, len: u16) -> i32 {
        match len {
            0 => 0,
            1 | 2 => self.rng.next_range(len as u32) as i32,
            _ => 1 + self.rng.next_range(len as u32 - 2) as i32,
        }
    }

    /// Make one random move: select two cells in sequence.
    ///
    /// Any selection left pending by the caller is cleared first so the pair is
    /// interpreted as a fresh swap attempt.
    pub fn play<G: FieldGenerator>(
        &mut self,
        grid: &mut Grid<G>,
    ) -> Result<MoveRecord, GeneratorError> {
        if let Some(pending) = grid.selection() {
            grid.select(pending)?;
        }

        let (from, to) = self.next_pair(grid.width(), grid.height());
        grid.select(from)?;
        let outcome = grid.select(to)?;
        debug!(%from, %to, ?outcome, "random move");
        Ok(MoveRecord { from, to, outcome })
    }

    /// Play `moves` random moves, stopping at the first generator failure.
    pub fn play_many<G: FieldGenerator>(
        &mut self,
        grid: &mut Grid<G>,
        moves: u32,
    ) -> Result<Vec<MoveRecord>, GeneratorError> {
        (0..moves).map(|_| self.play(grid)).collect()
    }
}
