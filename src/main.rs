//! Terminal snake runner (default binary).
//!
//! It uses crossterm for input and a custom framebuffer-based renderer
//! (no ratatui widgets/layout). The game starts idle; Space begins a round.

mod cli;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::{error, info};

use tui_snake::core::{GameConfig, GameSnapshot, GameState};
use tui_snake::input::{handle_key_event, should_quit};
use tui_snake::term::{CanvasRenderer, FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_snake::types::CELL_PX;

use cli::Cli;

/// Poll interval while nothing is scheduled (idle, paused, game over).
const IDLE_POLL_MS: u64 = 250;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::init_logging(&cli)?;

    let seed = cli.resolve_seed();
    let config = GameConfig::default().with_tick_ms(cli.tick_ms);
    let mut game_state =
        GameState::with_config(config, seed).context("invalid game configuration")?;
    info!("tui-snake starting: tick {}ms, seed {}", cli.tick_ms, seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game_state, &cli);

    // Always try to restore terminal state.
    let restored = term.exit();
    if let Err(err) = &result {
        error!("run loop failed: {err:#}");
    }
    result?;
    restored?;

    if let Some(path) = &cli.screenshot {
        let canvas =
            CanvasRenderer::new(CELL_PX, cli.theme.palette()).render(&game_state.snapshot());
        canvas.save_png(path)?;
        info!("screenshot written to {}", path.display());
    }

    info!(
        "tui-snake exiting: final score {}, length {}",
        game_state.score(),
        game_state.snake().len()
    );
    Ok(())
}

fn run(term: &mut TerminalRenderer, game_state: &mut GameState, cli: &Cli) -> Result<()> {
    let view = GameView::default().with_palette(cli.theme.palette());
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut drawn_revision: Option<u64> = None;
    let mut drawn_size = (0, 0);
    let mut last_tick = Instant::now();

    loop {
        // Render only when something changed.
        let size = crossterm::terminal::size().unwrap_or((80, 24));
        if size != drawn_size {
            term.invalidate();
        }
        if drawn_revision != Some(game_state.revision()) || size != drawn_size {
            game_state.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(size.0, size.1), &mut fb);
            term.present(&mut fb)?;
            drawn_revision = Some(game_state.revision());
            drawn_size = size;
        }

        // Input with timeout until next tick.
        let timeout = game_state
            .ms_until_next_tick()
            .map(|ms| Duration::from_millis(ms as u64))
            .unwrap_or(Duration::from_millis(IDLE_POLL_MS));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        let was_running = game_state.running();
                        game_state.apply_action(action);
                        if !was_running && game_state.running() {
                            // Don't charge the time spent idle or paused.
                            last_tick = Instant::now();
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = take_whole_ms(&mut last_tick, Instant::now());
        game_state.tick(elapsed);
    }
}

/// Whole milliseconds between `last` and `now`, moving `last` forward by
/// exactly that much so the sub-millisecond rest carries into the next call.
fn take_whole_ms(last: &mut Instant, now: Instant) -> u32 {
    let ms = now
        .saturating_duration_since(*last)
        .as_millis()
        .min(u32::MAX as u128) as u32;
    *last += Duration::from_millis(ms as u64);
    ms
}
