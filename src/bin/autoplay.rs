//! Headless autoplay: random moves against a seeded grid, JSON report on stdout.
//!
//! Useful for soak-testing the cascade rules and for reproducing a board from a seed.

use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Serialize;
use tracing::info;

use tui_match3::config::{AppConfig, LogTarget, USAGE};
use tui_match3::core::{CascadeReport, Grid, SelectOutcome};
use tui_match3::engine::{MoveRecord, RandomMover};
use tui_match3::logging;
use tui_match3::types::{Position, TileColor};

#[derive(Debug, Serialize)]
struct MoveEntry {
    from: Position,
    to: Position,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    destroyed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    passes: Option<u32>,
}

impl From<&MoveRecord> for MoveEntry {
    fn from(record: &MoveRecord) -> Self {
        let (outcome, report): (&'static str, Option<CascadeReport>) = match record.outcome {
            SelectOutcome::Swapped { report, .. } => ("swapped", Some(report)),
            SelectOutcome::Cancelled { .. } => ("cancelled", None),
            SelectOutcome::Ignored => ("ignored", None),
            SelectOutcome::Selected(_) => ("selected", None),
            SelectOutcome::Deselected(_) => ("deselected", None),
        };
        Self {
            from: record.from,
            to: record.to,
            outcome,
            matches: report.map(|r| r.matches),
            destroyed: report.map(|r| r.destroyed),
            passes: report.map(|r| r.passes),
        }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    seed: u32,
    width: u16,
    height: u16,
    palette: Vec<TileColor>,
    swaps: u32,
    destroyed: u32,
    moves: Vec<MoveEntry>,
    /// Final field, top row first, one color letter per cell.
    board: Vec<String>,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("usage: autoplay [options]\n{}", USAGE);
        return Ok(());
    }

    let config = AppConfig::load(&args, LogTarget::Stderr)?;
    logging::init(&config)?;
    info!(?config, "autoplay starting");

    let mut grid = Grid::new(config.width, config.height, config.generator())?;
    let mut mover = RandomMover::new(config.seed.wrapping_add(1));
    let delay = Duration::from_millis(config.autoplay_delay_ms);

    let mut moves = Vec::with_capacity(config.autoplay_moves as usize);
    let mut destroyed = 0u32;
    for _ in 0..config.autoplay_moves {
        let record = mover.play(&mut grid)?;
        if let SelectOutcome::Swapped { report, .. } = record.outcome {
            destroyed += report.destroyed;
        }
        moves.push(MoveEntry::from(&record));
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    if let Some(m) = grid.find_any_match() {
        return Err(anyhow!("unresolved match left on the board: {:?}", m));
    }

    let report = Report {
        seed: config.seed,
        width: grid.width(),
        height: grid.height(),
        palette: config.palette.clone(),
        swaps: grid.swaps(),
        destroyed,
        moves,
        board: grid.snapshot().rows(),
    };
    info!(swaps = report.swaps, destroyed, "autoplay finished");
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
