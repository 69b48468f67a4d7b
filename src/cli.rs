//! Command-line options and logger setup for the binary.

use std::fs::File;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

use tui_snake::term::Palette;
use tui_snake::types::TICK_MS;

/// Terminal snake: eat treasure, grow, and keep off the walls and yourself.
#[derive(Parser, Debug)]
#[command(name = "tui-snake")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Milliseconds per simulation step
    #[arg(long, env = "SNAKE_TICK_MS", default_value_t = TICK_MS)]
    pub tick_ms: u32,

    /// Treasure placement seed (default: derived from the clock)
    #[arg(long, env = "SNAKE_SEED")]
    pub seed: Option<u32>,

    /// Colour theme
    #[arg(long, value_enum, default_value_t = Theme::Dark)]
    pub theme: Theme,

    /// Log file; the terminal itself is owned by the game
    #[arg(long, env = "SNAKE_LOG_FILE", default_value = "tui-snake.log")]
    pub log_file: PathBuf,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,

    /// Save the final frame as a PNG on exit
    #[arg(long, value_name = "PATH")]
    pub screenshot: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette::dark(),
            Theme::Light => Palette::light(),
        }
    }
}

impl Cli {
    /// The explicit seed, or one taken from the wall clock.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    // Fold the high bits in so consecutive launches differ.
    (nanos ^ (nanos >> 32)) as u32
}

/// Route `log` output to a file. `LevelFilter::Off` skips creating it.
pub fn init_logging(cli: &Cli) -> Result<()> {
    if cli.log_level == LevelFilter::Off {
        return Ok(());
    }
    let file = File::create(&cli.log_file)
        .with_context(|| format!("failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level, Config::default(), file)
        .context("failed to initialise logger")?;
    Ok(())
}
