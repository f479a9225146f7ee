//! Grid module - the match-three state machine
//!
//! The grid owns every token in an arena (`tokens`) and maps cells to arena slots
//! through a dense occupancy array (`cells`, row-major `y * width + x`). Swapping two
//! tokens swaps two slot indices and rewrites both tokens' positions, so a token keeps
//! its identity as it moves.
//!
//! Row `y = 0` is the bottom. Tokens fall toward it and refills appear at the top of
//! each column.
//!
//! # Selection
//!
//! ```text
//! Idle --select(p)--> OneSelected(p)
//! OneSelected(p) --select(p)--> Idle                    (deselect)
//! OneSelected(p) --select(q), q adjacent--> Idle        (swap and resolve)
//! OneSelected(p) --select(q), otherwise--> Idle         (cancel)
//! ```
//!
//! # Resolution
//!
//! A legal swap checks both endpoints, destroys what matched, collapses the columns
//! above, refills the vacated cells, and then re-checks every token that moved. The
//! re-check list is a FIFO worklist drained to exhaustion, so the whole cascade runs
//! inside one `select` call and ends with a single [`FieldChanged`] notification.

use std::cmp::Reverse;
use std::collections::VecDeque;
use std::fmt;
use std::sync::mpsc::{channel, Receiver, Sender};

use tracing::{debug, trace};

use crate::error::GeneratorError;
use crate::generator::{FieldGenerator, RandomGenerator};
use crate::matching::{self, restricted_colors, Match};
use crate::snapshot::{GridSnapshot, TokenSnapshot};
use crate::token::{Token, TokenEvent, TokenId};
use crate::types::{Position, TileColor};

/// Summary of one resolved swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CascadeReport {
    /// Match windows acted on (swap endpoints plus cascade re-checks).
    pub matches: u32,
    /// Tokens destroyed and refilled.
    pub destroyed: u32,
    /// Destroy/collapse/refill passes. Zero when the swap matched nothing.
    pub passes: u32,
}

/// Field-level notification for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldChanged {
    /// A player swap and its whole cascade finished.
    Swap {
        a: Position,
        b: Position,
        report: CascadeReport,
    },
    /// The field was replaced by a fresh population.
    Repopulated,
}

/// Result of one `select` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Out-of-range position with nothing selected.
    Ignored,
    /// The cell is now the pending selection.
    Selected(Position),
    /// The pending selection was clicked again and cleared.
    Deselected(Position),
    /// The second cell was not adjacent (or out of range); nothing was swapped.
    Cancelled { from: Position, to: Position },
    /// The pair was swapped and resolved.
    Swapped {
        a: Position,
        b: Position,
        report: CascadeReport,
    },
}

pub struct Grid<G = RandomGenerator> {
    width: u16,
    height: u16,
    /// Token arena; a slot is reused when its token is refilled.
    tokens: Vec<Token>,
    /// Arena slot for each cell, row-major.
    cells: Vec<usize>,
    selection: Option<Position>,
    generator: G,
    next_id: u32,
    swaps: u32,
    last_report: Option<CascadeReport>,
    subscribers: Vec<Sender<FieldChanged>>,
}

impl<G: FieldGenerator> Grid<G> {
    /// Create a grid populated by `generator`.
    pub fn new(width: u16, height: u16, mut generator: G) -> Result<Self, GeneratorError> {
        let tokens = generator.populate(width, height)?;
        Self::from_tokens(width, height, tokens, generator)
    }

    /// Create a grid from an explicit layout, listed top row first.
    ///
    /// `rows[0]` becomes `y = height - 1` and the last row becomes `y = 0`, so the
    /// literal reads the way the field is drawn. The generator is only used for refills.
    pub fn from_rows<R>(rows: &[R], generator: G) -> Result<Self, GeneratorError>
    where
        R: AsRef<[TileColor]>,
    {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let actual: usize = rows.iter().map(|r| r.as_ref().len()).sum();
        if actual != width * height || rows.iter().any(|r| r.as_ref().len() != width) {
            return Err(GeneratorError::SizeMismatch {
                expected: width * height,
                actual,
            });
        }

        let mut tokens = Vec::with_capacity(actual);
        for y in 0..height {
            let row = rows[height - 1 - y].as_ref();
            for (x, &color) in row.iter().enumerate() {
                tokens.push(Token::new(Position::new(x as i32, y as i32), color));
            }
        }
        Self::from_tokens(width as u16, height as u16, tokens, generator)
    }

    fn from_tokens(
        width: u16,
        height: u16,
        tokens: Vec<Token>,
        generator: G,
    ) -> Result<Self, GeneratorError> {
        let mut grid = Self {
            width,
            height,
            tokens: Vec::new(),
            cells: Vec::new(),
            selection: None,
            generator,
            next_id: 0,
            swaps: 0,
            last_report: None,
            subscribers: Vec::new(),
        };
        grid.install(tokens)?;
        Ok(grid)
    }

    /// Replace arena and occupancy with a freshly populated field.
    fn install(&mut self, mut tokens: Vec<Token>) -> Result<(), GeneratorError> {
        let expected = self.width as usize * self.height as usize;
        if tokens.len() != expected {
            return Err(GeneratorError::SizeMismatch {
                expected,
                actual: tokens.len(),
            });
        }

        for (i, token) in tokens.iter_mut().enumerate() {
            let id = self.issue_id();
            token.set_id(id);
            token.set_position(self.position_of(i));
        }
        self.tokens = tokens;
        self.cells = (0..expected).collect();
        self.selection = None;
        Ok(())
    }

    /// Discard the current field and populate a new one from the same generator.
    pub fn repopulate(&mut self) -> Result<(), GeneratorError> {
        let tokens = self.generator.populate(self.width, self.height)?;
        self.install(tokens)?;
        self.last_report = None;
        debug!(width = self.width, height = self.height, "field repopulated");
        self.emit(FieldChanged::Repopulated);
        Ok(())
    }

    /// Drive the selection state machine with a click on `position`.
    ///
    /// Out-of-range and non-adjacent clicks are not errors; they are ignored or cancel
    /// the pending selection. Only a generator failure during refill is returned as `Err`.
    pub fn select(&mut self, position: Position) -> Result<SelectOutcome, GeneratorError> {
        let Some(prev) = self.selection.take() else {
            let Some(slot) = self.slot(position) else {
                debug!(%position, "select outside the field ignored");
                return Ok(SelectOutcome::Ignored);
            };
            self.tokens[slot].set_selected(true);
            self.selection = Some(position);
            return Ok(SelectOutcome::Selected(position));
        };

        if let Some(slot) = self.slot(prev) {
            self.tokens[slot].set_selected(false);
        }

        if prev == position {
            return Ok(SelectOutcome::Deselected(position));
        }

        if !self.in_bounds(position) || !prev.is_adjacent(position) {
            debug!(from = %prev, to = %position, "swap rejected");
            return Ok(SelectOutcome::Cancelled {
                from: prev,
                to: position,
            });
        }

        self.swap_cells(prev, position);
        let report = self.resolve(prev, position)?;
        self.swaps += 1;
        self.last_report = Some(report);
        debug!(
            a = %prev,
            b = %position,
            matches = report.matches,
            destroyed = report.destroyed,
            passes = report.passes,
            "swap resolved"
        );
        self.emit(FieldChanged::Swap {
            a: prev,
            b: position,
            report,
        });
        Ok(SelectOutcome::Swapped {
            a: prev,
            b: position,
            report,
        })
    }

    /// Check both swap endpoints, then drain the cascade worklist.
    fn resolve(&mut self, a: Position, b: Position) -> Result<CascadeReport, GeneratorError> {
        let mut report = CascadeReport::default();

        // Both endpoints are judged against the post-swap field before anything is
        // destroyed; overlapping windows are merged.
        let mut matched: Vec<usize> = Vec::new();
        for at in [a, b] {
            if let Some(m) = self.find_match_at(at) {
                trace!(%at, color = %m.color, axis = ?m.axis, window = ?m.window, "swap match");
                report.matches += 1;
                for slot in self.match_slots(&m) {
                    if !matched.contains(&slot) {
                        matched.push(slot);
                    }
                }
            }
        }
        if matched.is_empty() {
            return Ok(report);
        }

        let mut pending = VecDeque::new();
        let mut queued = vec![false; self.tokens.len()];
        self.run_pass(matched, &mut report, &mut pending, &mut queued)?;

        while let Some(slot) = pending.pop_front() {
            queued[slot] = false;
            let at = self.tokens[slot].position();
            let Some(m) = self.find_match_at(at) else {
                continue;
            };
            trace!(%at, color = %m.color, axis = ?m.axis, window = ?m.window, "cascade match");
            report.matches += 1;
            let matched = self.match_slots(&m);
            self.run_pass(matched, &mut report, &mut pending, &mut queued)?;
        }

        Ok(report)
    }

    /// Destroy `matched`, collapse the columns above them, and refill.
    ///
    /// Every token pushed down by the collapse is appended to `pending` unless it is
    /// already waiting there.
    fn run_pass(
        &mut self,
        mut matched: Vec<usize>,
        report: &mut CascadeReport,
        pending: &mut VecDeque<usize>,
        queued: &mut [bool],
    ) -> Result<(), GeneratorError> {
        report.passes += 1;
        report.destroyed += matched.len() as u32;

        for &slot in &matched {
            self.tokens[slot].destroy();
        }

        // Highest first: a lower gap rises until it meets the ones already settled at
        // the top of its column.
        matched.sort_by_key(|&slot| Reverse(self.tokens[slot].position().y));
        for &slot in &matched {
            loop {
                let at = self.tokens[slot].position();
                let above = at.offset(0, 1);
                let Some(upper) = self.slot(above) else {
                    break;
                };
                if self.tokens[upper].is_destroyed() {
                    break;
                }
                self.swap_cells(at, above);
                if !queued[upper] {
                    queued[upper] = true;
                    pending.push_back(upper);
                }
            }
        }

        for &slot in &matched {
            let at = self.tokens[slot].position();
            let restricted = restricted_colors(|p| self.color_at(p), at);
            let mut token = self.generator.generate_at(at, &restricted)?;
            let id = self.issue_id();
            token.set_id(id);
            token.set_position(at);
            trace!(%at, color = %token.color(), ?restricted, "refilled");
            self.tokens[slot] = token;
        }

        Ok(())
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}

impl<G> Grid<G> {
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Pending selection, if any.
    pub fn selection(&self) -> Option<Position> {
        self.selection
    }

    /// Number of accepted swaps since construction.
    pub fn swaps(&self) -> u32 {
        self.swaps
    }

    pub fn last_report(&self) -> Option<CascadeReport> {
        self.last_report
    }

    pub fn in_bounds(&self, p: Position) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width as i32 && p.y < self.height as i32
    }

    #[inline]
    fn cell_index(&self, p: Position) -> Option<usize> {
        if !self.in_bounds(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    #[inline]
    fn position_of(&self, index: usize) -> Position {
        let w = self.width as usize;
        Position::new((index % w) as i32, (index / w) as i32)
    }

    #[inline]
    fn slot(&self, p: Position) -> Option<usize> {
        self.cell_index(p).map(|i| self.cells[i])
    }

    fn issue_id(&mut self) -> TokenId {
        let id = TokenId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Token occupying `p`.
    pub fn token_at(&self, p: Position) -> Option<&Token> {
        self.slot(p).map(|s| &self.tokens[s])
    }

    /// Color at `p`, or `None` when out of range or destroyed.
    pub fn color_at(&self, p: Position) -> Option<TileColor> {
        self.token_at(p)
            .filter(|t| !t.is_destroyed())
            .map(Token::color)
    }

    /// Tokens in cell order (row-major, bottom row first).
    pub fn tokens(&self) -> impl Iterator<Item = &Token> + '_ {
        self.cells.iter().map(move |&s| &self.tokens[s])
    }

    /// Colors in cell order.
    pub fn colors(&self) -> Vec<TileColor> {
        self.tokens().map(Token::color).collect()
    }

    /// First match window through `p`, if any.
    pub fn find_match_at(&self, p: Position) -> Option<Match> {
        matching::find_match(|q| self.color_at(q), p)
    }

    /// First match anywhere on the field.
    pub fn find_any_match(&self) -> Option<Match> {
        matching::find_any_match(self.width, self.height, |q| self.color_at(q))
    }

    fn match_slots(&self, m: &Match) -> Vec<usize> {
        m.cells.iter().filter_map(|&c| self.slot(c)).collect()
    }

    fn swap_cells(&mut self, a: Position, b: Position) {
        let (Some(ia), Some(ib)) = (self.cell_index(a), self.cell_index(b)) else {
            return;
        };
        self.cells.swap(ia, ib);
        let (sa, sb) = (self.cells[ia], self.cells[ib]);
        self.tokens[sa].set_position(a);
        self.tokens[sb].set_position(b);
    }

    /// Subscribe to field-level notifications.
    pub fn subscribe(&mut self) -> Receiver<FieldChanged> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Subscribe to the token currently occupying `p`.
    ///
    /// The subscription follows the token, not the cell. Once the token is refilled
    /// the receiver disconnects; re-subscribe after the next [`FieldChanged`].
    pub fn subscribe_token(&mut self, p: Position) -> Option<Receiver<TokenEvent>> {
        let slot = self.slot(p)?;
        Some(self.tokens[slot].subscribe())
    }

    fn emit(&mut self, event: FieldChanged) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    /// Copy the current field into `out`, reusing its allocation.
    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        out.width = self.width;
        out.height = self.height;
        out.selection = self.selection;
        out.swaps = self.swaps;
        out.last_report = self.last_report;
        out.tokens.clear();
        out.tokens.extend(self.tokens().map(|t| TokenSnapshot {
            id: t.id(),
            position: t.position(),
            color: t.color(),
            selected: t.is_selected(),
            destroyed: t.is_destroyed(),
        }));
    }

    pub fn snapshot(&self) -> GridSnapshot {
        let mut s = GridSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl<G> fmt::Debug for Grid<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("selection", &self.selection)
            .field("swaps", &self.swaps)
            .finish_non_exhaustive()
    }
}
