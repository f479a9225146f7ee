//! Match detection and color restriction.
//!
//! Both operate on a color lookup `Fn(Position) -> Option<TileColor>` so the grid and
//! the generator (which works on a partially filled field) share one definition of a
//! window. The lookup returns `None` for out-of-range cells, not-yet-placed cells, and
//! destroyed tokens; a `None` anywhere in a window means the window does not match.
//!
//! Windows around a position `p` on one axis, tested in this order:
//!
//! ```text
//! Preceding   [p-2][p-1][ p ]
//! Following        [ p ][p+1][p+2]
//! Straddling  [p-1][ p ][p+1]
//! ```
//!
//! Horizontal windows are tested before vertical ones, and the first qualifying window
//! wins. A cell can qualify several ways at once; only the first is acted on per call.

use arrayvec::ArrayVec;

use crate::types::{Position, TileColor, MATCH_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub const ORDER: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    fn step(self) -> (i32, i32) {
        match self {
            Axis::Horizontal => (1, 0),
            Axis::Vertical => (0, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Preceding,
    Following,
    Straddling,
}

/// A detected three-in-a-row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub axis: Axis,
    pub window: Window,
    /// The two neighbors in window order, then the center.
    pub cells: [Position; MATCH_LEN],
    pub color: TileColor,
}

/// The two neighbor positions of each window on `axis`, in test order.
fn windows(at: Position, axis: Axis) -> [(Window, Position, Position); 3] {
    let (dx, dy) = axis.step();
    let prev1 = at.offset(-dx, -dy);
    let prev2 = at.offset(-2 * dx, -2 * dy);
    let next1 = at.offset(dx, dy);
    let next2 = at.offset(2 * dx, 2 * dy);
    [
        (Window::Preceding, prev1, prev2),
        (Window::Following, next1, next2),
        (Window::Straddling, prev1, next1),
    ]
}

/// Find the first window through `at` whose three tokens share a color.
pub fn find_match<F>(color_at: F, at: Position) -> Option<Match>
where
    F: Fn(Position) -> Option<TileColor>,
{
    let color = color_at(at)?;
    for axis in Axis::ORDER {
        for (window, a, b) in windows(at, axis) {
            if color_at(a) == Some(color) && color_at(b) == Some(color) {
                return Some(Match {
                    axis,
                    window,
                    cells: [a, b, at],
                    color,
                });
            }
        }
    }
    None
}

/// Colors that would complete a window through `at` if placed there.
///
/// A window's two neighbors must both be present and equal for their color to be
/// restricted. Per axis only the colors of `p-1` and `p+1` can qualify, so at most
/// four distinct colors are ever returned.
pub fn restricted_colors<F>(color_at: F, at: Position) -> ArrayVec<TileColor, 4>
where
    F: Fn(Position) -> Option<TileColor>,
{
    let mut restricted = ArrayVec::new();
    for axis in Axis::ORDER {
        for (_, a, b) in windows(at, axis) {
            if let (Some(ca), Some(cb)) = (color_at(a), color_at(b)) {
                if ca == cb && !restricted.contains(&ca) {
                    restricted.push(ca);
                }
            }
        }
    }
    restricted
}

/// Scan every cell of a `width` x `height` field and return the first match found.
pub fn find_any_match<F>(width: u16, height: u16, color_at: F) -> Option<Match>
where
    F: Fn(Position) -> Option<TileColor>,
{
    for x in 0..width as i32 {
        for y in 0..height as i32 {
            if let Some(m) = find_match(&color_at, Position::new(x, y)) {
                return Some(m);
            }
        }
    }
    None
}
