//! Grid selection, swap, and cascade behavior through the public API.

use std::sync::mpsc::TryRecvError;

use tui_match3::core::{
    CascadeReport, FieldChanged, FieldGenerator, GeneratorError, Grid, RandomGenerator,
    SelectOutcome, Token, TokenEvent,
};
use tui_match3::types::{Position, TileColor};

use TileColor::*;

fn p(x: i32, y: i32) -> Position {
    Position::new(x, y)
}

fn grid(rows: &[&[TileColor]]) -> Grid {
    Grid::from_rows(rows, RandomGenerator::new(9)).unwrap()
}

fn assert_settled<G>(grid: &Grid<G>) {
    assert_eq!(grid.find_any_match(), None, "match left on the field");
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let token = grid.token_at(p(x, y)).unwrap();
            assert_eq!(token.position(), p(x, y));
            assert!(!token.is_destroyed(), "destroyed token left at ({}, {})", x, y);
            assert!(!token.is_selected());
        }
    }
}

/// Populates from a fixed layout and refills with the first palette color that is
/// not restricted, recording every restriction it was given.
struct ScriptedGenerator {
    layout: Vec<Token>,
    palette: Vec<TileColor>,
    calls: Vec<(Position, Vec<TileColor>)>,
}

impl ScriptedGenerator {
    fn new(layout: Vec<Token>, palette: &[TileColor]) -> Self {
        Self {
            layout,
            palette: palette.to_vec(),
            calls: Vec::new(),
        }
    }
}

impl FieldGenerator for ScriptedGenerator {
    fn populate(&mut self, _width: u16, _height: u16) -> Result<Vec<Token>, GeneratorError> {
        Ok(std::mem::take(&mut self.layout))
    }

    fn generate_at(
        &mut self,
        position: Position,
        restricted: &[TileColor],
    ) -> Result<Token, GeneratorError> {
        self.calls.push((position, restricted.to_vec()));
        self.palette
            .iter()
            .copied()
            .find(|c| !restricted.contains(c))
            .map(|c| Token::new(position, c))
            .ok_or(GeneratorError::PaletteExhausted {
                position,
                restricted: restricted.to_vec(),
            })
    }
}

#[test]
fn swap_completing_a_row_destroys_and_refills_it() {
    let mut g = grid(&[&[Red, Red, Blue, Red, Red]]);
    let doomed = g.subscribe_token(p(3, 0)).unwrap();
    let kept_ids: Vec<_> = [p(0, 0), p(2, 0)]
        .iter()
        .map(|&q| g.token_at(q).unwrap().id())
        .collect();

    assert_eq!(g.select(p(2, 0)).unwrap(), SelectOutcome::Selected(p(2, 0)));
    let outcome = g.select(p(1, 0)).unwrap();

    let report = CascadeReport {
        matches: 1,
        destroyed: 3,
        passes: 1,
    };
    assert_eq!(
        outcome,
        SelectOutcome::Swapped {
            a: p(2, 0),
            b: p(1, 0),
            report
        }
    );

    // The untouched red and the blue that moved keep their identity.
    assert_eq!(g.token_at(p(0, 0)).unwrap().id(), kept_ids[0]);
    assert_eq!(g.token_at(p(1, 0)).unwrap().id(), kept_ids[1]);
    assert_eq!(g.color_at(p(0, 0)), Some(Red));
    assert_eq!(g.color_at(p(1, 0)), Some(Blue));

    assert_eq!(doomed.try_recv(), Ok(TokenEvent::Destroyed));
    assert_eq!(doomed.try_recv(), Err(TryRecvError::Disconnected));

    assert_eq!(g.swaps(), 1);
    assert_eq!(g.last_report(), Some(report));
    assert_settled(&g);
}

#[test]
fn chained_matches_resolve_inside_one_select() {
    let mut g = grid(&[
        &[Yellow, Cyan, Magenta, Blue, Cyan],
        &[Magenta, Blue, Cyan, Yellow, Magenta],
        &[Cyan, Yellow, Blue, Magenta, Yellow],
        &[Blue, Green, Green, Yellow, Cyan],
        &[Red, Red, Green, Red, Blue],
    ]);
    assert_eq!(g.find_any_match(), None);
    let changes = g.subscribe();

    g.select(p(2, 0)).unwrap();
    let SelectOutcome::Swapped { report, .. } = g.select(p(3, 0)).unwrap() else {
        panic!("adjacent swap was not accepted");
    };

    // Reds clear on the first pass; the greens dropping into row 0 clear on the next.
    assert!(report.passes >= 2, "{:?}", report);
    assert!(report.matches >= 2);
    assert!(report.destroyed >= 6);
    assert_settled(&g);

    assert_eq!(
        changes.try_recv(),
        Ok(FieldChanged::Swap {
            a: p(2, 0),
            b: p(3, 0),
            report
        })
    );
    assert_eq!(changes.try_recv(), Err(TryRecvError::Empty));
}

#[test]
fn legal_swap_without_match_stays_applied() {
    let mut g = grid(&[&[Red, Blue], &[Green, Yellow]]);
    let changes = g.subscribe();
    let moving = g.token_at(p(0, 0)).unwrap().id();

    g.select(p(0, 0)).unwrap();
    let outcome = g.select(p(1, 0)).unwrap();
    assert_eq!(
        outcome,
        SelectOutcome::Swapped {
            a: p(0, 0),
            b: p(1, 0),
            report: CascadeReport::default()
        }
    );

    assert_eq!(g.color_at(p(0, 0)), Some(Yellow));
    assert_eq!(g.color_at(p(1, 0)), Some(Green));
    assert_eq!(g.token_at(p(1, 0)).unwrap().id(), moving);
    assert!(matches!(changes.try_recv(), Ok(FieldChanged::Swap { .. })));
    assert_eq!(g.swaps(), 1);
}

#[test]
fn reselecting_the_same_cell_toggles_once_each_way() {
    let mut g = grid(&[&[Red, Blue, Green]]);
    let events = g.subscribe_token(p(1, 0)).unwrap();

    g.select(p(1, 0)).unwrap();
    assert_eq!(g.select(p(1, 0)).unwrap(), SelectOutcome::Deselected(p(1, 0)));

    let got: Vec<_> = events.try_iter().collect();
    assert_eq!(
        got,
        vec![
            TokenEvent::SelectionChanged(true),
            TokenEvent::SelectionChanged(false)
        ]
    );
    assert_eq!(g.selection(), None);
}

#[test]
fn non_adjacent_second_click_cancels_without_swapping() {
    let mut g = grid(&[&[Red, Blue, Green], &[Yellow, Cyan, Magenta], &[Blue, Red, Cyan]]);
    let before = g.colors();
    let changes = g.subscribe();
    let events = g.subscribe_token(p(0, 0)).unwrap();

    g.select(p(0, 0)).unwrap();
    // Diagonal, two apart, and off the field are all rejected the same way.
    for target in [p(1, 1), p(2, 0), p(0, -1)] {
        if g.selection().is_none() {
            g.select(p(0, 0)).unwrap();
        }
        assert_eq!(
            g.select(target).unwrap(),
            SelectOutcome::Cancelled {
                from: p(0, 0),
                to: target
            }
        );
    }

    assert_eq!(g.colors(), before);
    assert_eq!(g.selection(), None);
    assert_eq!(g.swaps(), 0);
    assert_eq!(changes.try_recv(), Err(TryRecvError::Empty));
    assert!(events
        .try_iter()
        .all(|e| matches!(e, TokenEvent::SelectionChanged(_))));
    assert!(!g.token_at(p(0, 0)).unwrap().is_selected());
}

#[test]
fn out_of_range_click_while_idle_is_ignored() {
    let mut g = grid(&[&[Red, Blue]]);
    assert_eq!(g.select(p(5, 0)).unwrap(), SelectOutcome::Ignored);
    assert_eq!(g.select(p(-1, 0)).unwrap(), SelectOutcome::Ignored);
    assert_eq!(g.selection(), None);
}

#[test]
fn refill_is_restricted_across_the_straddling_pair() {
    let rows: [[TileColor; 3]; 3] = [[Yellow, Red, Yellow], [Cyan, Red, Cyan], [Red, Blue, Green]];
    let layout = Grid::from_rows(&rows, RandomGenerator::new(0))
        .unwrap()
        .tokens()
        .map(|t| Token::new(t.position(), t.color()))
        .collect();
    let mut g = Grid::new(3, 3, ScriptedGenerator::new(layout, &[Yellow, Cyan, Magenta])).unwrap();

    g.select(p(0, 0)).unwrap();
    let outcome = g.select(p(1, 0)).unwrap();
    assert!(matches!(outcome, SelectOutcome::Swapped { report, .. } if report.destroyed == 3));

    let calls = &g.generator().calls;
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], (p(1, 2), vec![Yellow]));
    assert_eq!(calls[1], (p(1, 1), vec![Cyan]));
    assert_settled(&g);
}

#[test]
fn exhausted_palette_during_refill_is_an_error() {
    let rows: [[TileColor; 3]; 3] = [[Yellow, Red, Yellow], [Cyan, Red, Cyan], [Red, Blue, Green]];
    let mut g = Grid::from_rows(&rows, RandomGenerator::with_palette(1, vec![Yellow])).unwrap();

    g.select(p(0, 0)).unwrap();
    let err = g.select(p(1, 0)).unwrap_err();
    assert_eq!(
        err,
        GeneratorError::PaletteExhausted {
            position: p(1, 2),
            restricted: vec![Yellow],
        }
    );
}

#[test]
fn generator_returning_the_wrong_size_is_rejected() {
    let layout = vec![Token::new(p(0, 0), Red), Token::new(p(1, 0), Blue)];
    let err = Grid::new(2, 2, ScriptedGenerator::new(layout, &[Red])).unwrap_err();
    assert_eq!(
        err,
        GeneratorError::SizeMismatch {
            expected: 4,
            actual: 2
        }
    );
}

#[test]
fn repopulate_replaces_the_field_and_notifies() {
    let mut g = Grid::new(6, 6, RandomGenerator::new(4)).unwrap();
    let changes = g.subscribe();
    let before = g.colors();
    let first_id = g.token_at(p(0, 0)).unwrap().id();
    g.select(p(2, 2)).unwrap();

    g.repopulate().unwrap();

    assert_ne!(g.colors(), before);
    assert_ne!(g.token_at(p(0, 0)).unwrap().id(), first_id);
    assert_eq!(g.selection(), None);
    assert_eq!(changes.try_recv(), Ok(FieldChanged::Repopulated));
    assert_settled(&g);
}
