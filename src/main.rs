//! Terminal match-three runner (default binary).
//!
//! crossterm input, framebuffer rendering, and the core grid driven only through
//! `Grid::select`. Redraws happen when the field, the cursor, or the terminal size
//! changes.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use tracing::{debug, error, info};

use tui_match3::config::{AppConfig, LogTarget, USAGE};
use tui_match3::core::{FieldChanged, Grid};
use tui_match3::engine::RandomMover;
use tui_match3::input::{handle_key_event, should_quit, Cursor};
use tui_match3::logging;
use tui_match3::term::{FrameBuffer, GridView, TerminalRenderer, Viewport};
use tui_match3::types::GridAction;

const POLL_MS: u64 = 250;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("usage: tui-match3 [options]\n{}", USAGE);
        return Ok(());
    }

    // stdout belongs to the renderer, so logging defaults to off here.
    let config = AppConfig::load(&args, LogTarget::Off)?;
    logging::init(&config)?;
    info!(?config, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        error!(error = %e, "terminated");
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut grid = Grid::new(config.width, config.height, config.generator())?;
    let changes = grid.subscribe();
    let mut cursor = Cursor::new(grid.width(), grid.height());
    let mut mover = RandomMover::new(config.seed.wrapping_add(1));

    let view = GridView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snapshot = grid.snapshot();
    let mut dirty = true;

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        if dirty {
            grid.snapshot_into(&mut snapshot);
            view.render_into(&snapshot, Some(cursor.position()), viewport, &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        if !event::poll(Duration::from_millis(POLL_MS))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    dirty |= apply_action(action, &mut grid, &mut cursor, &mut mover)?;
                }
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if let Some(p) =
                    view.cell_at(grid.width(), grid.height(), viewport, mouse.column, mouse.row)
                {
                    cursor.set(p);
                    grid.select(p)?;
                    dirty = true;
                }
            }
            Event::Resize(_, _) => {
                term.invalidate();
                dirty = true;
            }
            _ => {}
        }

        dirty |= drain_changes(&changes);
    }
}

/// Returns true if anything visible changed.
fn apply_action(
    action: GridAction,
    grid: &mut Grid,
    cursor: &mut Cursor,
    mover: &mut RandomMover,
) -> Result<bool> {
    match action {
        GridAction::MoveLeft
        | GridAction::MoveRight
        | GridAction::MoveUp
        | GridAction::MoveDown => Ok(cursor.apply(action)),
        GridAction::Select => {
            grid.select(cursor.position())?;
            Ok(true)
        }
        GridAction::RandomMove => {
            mover.play(grid)?;
            Ok(true)
        }
        GridAction::NewBoard => {
            grid.repopulate()?;
            Ok(true)
        }
    }
}

fn drain_changes(changes: &Receiver<FieldChanged>) -> bool {
    let mut any = false;
    for change in changes.try_iter() {
        debug!(?change, "field changed");
        any = true;
    }
    any
}
