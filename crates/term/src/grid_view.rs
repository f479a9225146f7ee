//! GridView: maps a `GridSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). Grid row `y = 0` is drawn at the bottom of the
//! frame, so "up" on screen is `+y` on the grid.

use crate::core::GridSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Position, TileColor};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the bordered grid frame lands in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub start_x: u16,
    pub start_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_W: u16 = 22;

pub struct GridView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
}

impl Default for GridView {
    fn default() -> Self {
        // 2x1 roughly squares a tile on common terminal fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GridView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Frame placement for a `grid_w` x `grid_h` field, centered with room for the panel.
    pub fn layout(&self, grid_w: u16, grid_h: u16, viewport: Viewport) -> Layout {
        let frame_w = grid_w.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = grid_h.saturating_mul(self.cell_h).saturating_add(2);
        let total_w = frame_w.saturating_add(2 + PANEL_W);
        Layout {
            start_x: viewport.width.saturating_sub(total_w) / 2,
            start_y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        }
    }

    /// Grid cell under terminal position `(col, row)`, if any.
    pub fn cell_at(
        &self,
        grid_w: u16,
        grid_h: u16,
        viewport: Viewport,
        col: u16,
        row: u16,
    ) -> Option<Position> {
        let layout = self.layout(grid_w, grid_h, viewport);
        let dx = col.checked_sub(layout.start_x + 1)?;
        let dy = row.checked_sub(layout.start_y + 1)?;
        let (cx, cy_from_top) = (dx / self.cell_w, dy / self.cell_h);
        if cx >= grid_w || cy_from_top >= grid_h {
            return None;
        }
        Some(Position::new(
            cx as i32,
            (grid_h - 1 - cy_from_top) as i32,
        ))
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GridSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(snap.width, snap.height, viewport);
        let border = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        fb.fill_rect(
            layout.start_x + 1,
            layout.start_y + 1,
            snap.width * self.cell_w,
            snap.height * self.cell_h,
            ' ',
            CellStyle::plain(BOARD_BG, BOARD_BG),
        );
        draw_border(fb, layout, border);

        for token in &snap.tokens {
            let (ch, style) = if token.destroyed {
                (
                    '░',
                    CellStyle {
                        dim: true,
                        ..CellStyle::plain(tile_rgb(token.color), BOARD_BG)
                    },
                )
            } else if token.selected {
                (
                    '▓',
                    CellStyle {
                        bold: true,
                        ..CellStyle::plain(tile_rgb(token.color), Rgb::new(235, 235, 235))
                    },
                )
            } else {
                ('█', CellStyle::plain(tile_rgb(token.color), BOARD_BG))
            };
            self.fill_tile(fb, layout, snap.height, token.position, ch, style);
        }

        if let Some(p) = cursor.filter(|p| snap.get(*p).is_some()) {
            self.draw_cursor(fb, layout, snap, p);
        }

        self.draw_side_panel(fb, snap, cursor, viewport, layout);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GridSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn tile_origin(&self, layout: Layout, grid_h: u16, p: Position) -> (u16, u16) {
        let from_top = grid_h.saturating_sub(1).saturating_sub(p.y as u16);
        (
            layout.start_x + 1 + p.x as u16 * self.cell_w,
            layout.start_y + 1 + from_top * self.cell_h,
        )
    }

    fn fill_tile(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        grid_h: u16,
        p: Position,
        ch: char,
        style: CellStyle,
    ) {
        let (px, py) = self.tile_origin(layout, grid_h, p);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// Brackets on the tile's outer columns, drawn over its color.
    fn draw_cursor(&self, fb: &mut FrameBuffer, layout: Layout, snap: &GridSnapshot, p: Position) {
        let bg = snap
            .get(p)
            .filter(|t| !t.destroyed)
            .map(|t| tile_rgb(t.color))
            .unwrap_or(BOARD_BG);
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(0, 0, 0), bg)
        };
        let (px, py) = self.tile_origin(layout, snap.height, p);
        for dy in 0..self.cell_h {
            fb.put_char(px, py + dy, '[', style);
            fb.put_char(px + self.cell_w - 1, py + dy, ']', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GridSnapshot,
        cursor: Option<Position>,
        viewport: Viewport,
        layout: Layout,
    ) {
        let panel_x = layout.start_x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::default();
        let dim = CellStyle {
            dim: true,
            ..value
        };

        let mut y = layout.start_y;
        fb.put_str(panel_x, y, "SWAPS", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.swaps, value);
        y += 2;

        fb.put_str(panel_x, y, "LAST CASCADE", label);
        y += 1;
        match snap.last_report {
            Some(report) => {
                for (name, n) in [
                    ("matches", report.matches),
                    ("cleared", report.destroyed),
                    ("passes", report.passes),
                ] {
                    fb.put_str(panel_x, y, name, value);
                    fb.put_u32(panel_x + 9, y, n, value);
                    y += 1;
                }
            }
            None => {
                fb.put_str(panel_x, y, "-", value);
                y += 1;
            }
        }
        y += 1;

        fb.put_str(panel_x, y, "SELECTED", label);
        y += 1;
        let selected = snap
            .selection
            .map(|p| p.to_string())
            .unwrap_or_else(|| "-".to_string());
        fb.put_str(panel_x, y, &selected, value);
        y += 2;

        if let Some(p) = cursor {
            fb.put_str(panel_x, y, "CURSOR", label);
            y += 1;
            fb.put_str(panel_x, y, &p.to_string(), value);
            y += 2;
        }

        for help in ["space select", "m random move", "n new board", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, help, dim);
            y += 1;
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, layout: Layout, style: CellStyle) {
    let Layout {
        start_x: x,
        start_y: y,
        frame_w: w,
        frame_h: h,
    } = layout;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Display color for each tile.
pub fn tile_rgb(color: TileColor) -> Rgb {
    match color {
        TileColor::Blue => Rgb::new(80, 120, 230),
        TileColor::Cyan => Rgb::new(80, 220, 220),
        TileColor::Green => Rgb::new(100, 220, 120),
        TileColor::Magenta => Rgb::new(210, 100, 220),
        TileColor::Red => Rgb::new(225, 80, 80),
        TileColor::Yellow => Rgb::new(240, 220, 80),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Grid, RandomGenerator};

    fn grid_2x2() -> Grid {
        // Top row first: (0,1)=R (1,1)=B, (0,0)=G (1,0)=Y.
        use TileColor::*;
        Grid::from_rows(&[[Red, Blue], [Green, Yellow]], RandomGenerator::new(0)).unwrap()
    }

    #[test]
    fn bottom_row_is_drawn_last() {
        let snap = grid_2x2().snapshot();
        let view = GridView::default();
        let vp = Viewport::new(40, 10);
        let fb = view.render(&snap, None, vp);
        let layout = view.layout(2, 2, vp);

        let top = fb.get(layout.start_x + 1, layout.start_y + 1).unwrap();
        let bottom = fb.get(layout.start_x + 1, layout.start_y + 2).unwrap();
        assert_eq!(top.style.fg, tile_rgb(TileColor::Red));
        assert_eq!(bottom.style.fg, tile_rgb(TileColor::Green));
        assert_eq!(top.ch, '█');
    }

    #[test]
    fn cell_at_inverts_tile_origin() {
        let view = GridView::default();
        let vp = Viewport::new(60, 20);
        let layout = view.layout(8, 8, vp);
        for y in 0..8 {
            for x in 0..8 {
                let p = Position::new(x, y);
                let (col, row) = view.tile_origin(layout, 8, p);
                assert_eq!(view.cell_at(8, 8, vp, col, row), Some(p));
                assert_eq!(view.cell_at(8, 8, vp, col + 1, row), Some(p));
            }
        }
        assert_eq!(view.cell_at(8, 8, vp, layout.start_x, layout.start_y), None);
        assert_eq!(view.cell_at(8, 8, vp, 59, 19), None);
    }

    #[test]
    fn selection_and_cursor_are_visible() {
        let mut grid = grid_2x2();
        grid.select(Position::new(1, 0)).unwrap();
        let snap = grid.snapshot();
        let view = GridView::default();
        let vp = Viewport::new(40, 10);
        let fb = view.render(&snap, Some(Position::new(0, 1)), vp);
        let layout = view.layout(2, 2, vp);

        let (sx, sy) = view.tile_origin(layout, 2, Position::new(1, 0));
        assert_eq!(fb.get(sx, sy).unwrap().ch, '▓');

        let (cx, cy) = view.tile_origin(layout, 2, Position::new(0, 1));
        assert_eq!(fb.get(cx, cy).unwrap().ch, '[');
        assert_eq!(fb.get(cx + 1, cy).unwrap().ch, ']');
    }

    #[test]
    fn side_panel_reports_selection() {
        let mut grid = grid_2x2();
        grid.select(Position::new(1, 1)).unwrap();
        let snap = grid.snapshot();
        let fb = GridView::default().render(&snap, None, Viewport::new(40, 14));
        let text: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.iter().any(|row| row.contains("SWAPS")));
        assert!(text.iter().any(|row| row.contains("(1, 1)")));
    }
}
