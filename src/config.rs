//! Layered runtime configuration: defaults, then `MATCH3_*` environment variables,
//! then command-line flags.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::core::RandomGenerator;
use crate::types::{TileColor, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_SEED};

/// Largest accepted side length; keeps a default-sized tile grid on screen.
pub const MAX_GRID_DIM: u16 = 64;

/// A refill can be restricted by up to four colors, so a fifth is always needed.
pub const MIN_PALETTE: usize = 5;

pub const USAGE: &str = "\
options:
  --width N        grid width (MATCH3_WIDTH)
  --height N       grid height (MATCH3_HEIGHT)
  --seed N         generator seed (MATCH3_SEED)
  --colors LIST    palette of 5+ colors, comma separated names or letters (MATCH3_COLORS)
  --log TARGET     off | stderr | <file path> (MATCH3_LOG_PATH)
  --log-level F    tracing filter, overridden by MATCH3_LOG (MATCH3_LOG_LEVEL)
  --moves N        autoplay move count (MATCH3_AUTOPLAY_MOVES)
  --delay-ms N     autoplay pause between moves (MATCH3_AUTOPLAY_DELAY_MS)";

/// Where tracing output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Off,
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "" | "off" | "none" => LogTarget::Off,
            "stderr" => LogTarget::Stderr,
            path => LogTarget::File(PathBuf::from(path)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub width: u16,
    pub height: u16,
    pub seed: u32,
    pub palette: Vec<TileColor>,
    pub log: LogTarget,
    pub log_level: String,
    pub autoplay_moves: u32,
    pub autoplay_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            seed: DEFAULT_SEED,
            palette: TileColor::ALL.to_vec(),
            log: LogTarget::Off,
            log_level: "info".to_string(),
            autoplay_moves: 100,
            autoplay_delay_ms: 0,
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with the process environment and then `args`.
    ///
    /// `log` is the binary's default log target, used unless overridden.
    pub fn load(args: &[String], log: LogTarget) -> Result<Self> {
        let mut config = Self {
            log,
            ..Self::default()
        };
        config.apply_vars(|key| std::env::var(key).ok())?;
        config.apply_args(args)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay `MATCH3_*` variables looked up through `var`.
    pub fn apply_vars<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| var(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(v) = get("MATCH3_WIDTH") {
            self.width = parse_num("MATCH3_WIDTH", &v)?;
        }
        if let Some(v) = get("MATCH3_HEIGHT") {
            self.height = parse_num("MATCH3_HEIGHT", &v)?;
        }
        if let Some(v) = get("MATCH3_SEED") {
            self.seed = parse_num("MATCH3_SEED", &v)?;
        }
        if let Some(v) = get("MATCH3_COLORS") {
            self.palette = parse_palette("MATCH3_COLORS", &v)?;
        }
        if let Some(v) = get("MATCH3_LOG_PATH") {
            self.log = LogTarget::parse(&v);
        }
        if let Some(v) = get("MATCH3_LOG_LEVEL") {
            self.log_level = v;
        }
        if let Some(v) = get("MATCH3_AUTOPLAY_MOVES") {
            self.autoplay_moves = parse_num("MATCH3_AUTOPLAY_MOVES", &v)?;
        }
        if let Some(v) = get("MATCH3_AUTOPLAY_DELAY_MS") {
            self.autoplay_delay_ms = parse_num("MATCH3_AUTOPLAY_DELAY_MS", &v)?;
        }
        Ok(())
    }

    /// Overlay command-line flags (program name already stripped).
    pub fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            i += 1;
            let value = args
                .get(i)
                .ok_or_else(|| anyhow!("missing value for {}", flag));
            match flag {
                "--width" => self.width = parse_num(flag, value?)?,
                "--height" => self.height = parse_num(flag, value?)?,
                "--seed" => self.seed = parse_num(flag, value?)?,
                "--colors" => self.palette = parse_palette(flag, value?)?,
                "--log" => self.log = LogTarget::parse(value?),
                "--log-level" => self.log_level = value?.clone(),
                "--moves" => self.autoplay_moves = parse_num(flag, value?)?,
                "--delay-ms" => self.autoplay_delay_ms = parse_num(flag, value?)?,
                other => return Err(anyhow!("unknown argument: {}", other)),
            }
            i += 1;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (name, dim) in [("width", self.width), ("height", self.height)] {
            if dim == 0 || dim > MAX_GRID_DIM {
                return Err(anyhow!(
                    "{} must be between 1 and {}, got {}",
                    name,
                    MAX_GRID_DIM,
                    dim
                ));
            }
        }
        if self.palette.len() < MIN_PALETTE {
            return Err(anyhow!(
                "palette needs at least {} colors, got {}",
                MIN_PALETTE,
                self.palette.len()
            ));
        }
        Ok(())
    }

    /// Fresh generator for this configuration's seed and palette.
    pub fn generator(&self) -> RandomGenerator {
        RandomGenerator::with_palette(self.seed, self.palette.clone())
    }
}

fn parse_num<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", key, value))
}

fn parse_palette(key: &str, value: &str) -> Result<Vec<TileColor>> {
    let mut palette = Vec::new();
    for name in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let color =
            TileColor::from_str(name).ok_or_else(|| anyhow!("{}: unknown color: {}", key, name))?;
        if !palette.contains(&color) {
            palette.push(color);
        }
    }
    if palette.is_empty() {
        return Err(anyhow!("{}: no colors given", key));
    }
    Ok(palette)
}
