//! Game configuration - the named parameters of a game
//!
//! `GameConfig::default()` reproduces the classic setup from the constants in
//! `tui_snake_types`. Custom configurations must pass [`GameConfig::validate`]
//! before a game can be built from them.

use thiserror::Error;

use crate::types::{
    Direction, Position, GRID_SIZE, INITIAL_DIRECTION, INITIAL_SNAKE, TICK_MS, TREASURE_REWARD,
};

/// Smallest supported board side.
pub const MIN_GRID_SIZE: u8 = 4;

/// Largest supported board side (keeps coordinates well inside `i16`).
pub const MAX_GRID_SIZE: u8 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Cells per board side.
    pub grid_size: u8,
    /// Milliseconds between snake steps.
    pub tick_ms: u32,
    /// Points per treasure eaten.
    pub treasure_reward: u32,
    /// Starting body, head first.
    pub initial_snake: Vec<Position>,
    pub initial_direction: Direction,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            tick_ms: TICK_MS,
            treasure_reward: TREASURE_REWARD,
            initial_snake: INITIAL_SNAKE.to_vec(),
            initial_direction: INITIAL_DIRECTION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid size {0} is outside {min}..={max}", min = MIN_GRID_SIZE, max = MAX_GRID_SIZE)]
    GridSize(u8),
    #[error("tick period must be at least 1ms")]
    ZeroTick,
    #[error("initial snake needs at least 2 segments, got {0}")]
    SnakeTooShort(usize),
    #[error("initial snake leaves no free cell for treasure")]
    SnakeTooLong,
    #[error("initial snake segment ({x}, {y}) is off the board")]
    OutOfBounds { x: i16, y: i16 },
    #[error("initial snake visits ({x}, {y}) twice")]
    Overlap { x: i16, y: i16 },
    #[error("initial snake segments {0} and {1} are not adjacent")]
    Disjoint(usize, usize),
    #[error("initial direction {0} points back into the body")]
    Reversed(&'static str),
}

impl GameConfig {
    pub fn with_tick_ms(mut self, tick_ms: u32) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    /// Replace the starting layout.
    pub fn with_initial_snake(mut self, segments: &[Position], direction: Direction) -> Self {
        self.initial_snake = segments.to_vec();
        self.initial_direction = direction;
        self
    }

    pub fn cell_count(&self) -> usize {
        self.grid_size as usize * self.grid_size as usize
    }

    /// Check that a game can be played with this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::GridSize(self.grid_size));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }

        let body = &self.initial_snake;
        if body.len() < 2 {
            return Err(ConfigError::SnakeTooShort(body.len()));
        }
        if body.len() >= self.cell_count() {
            return Err(ConfigError::SnakeTooLong);
        }

        for (i, &pos) in body.iter().enumerate() {
            if !pos.in_bounds(self.grid_size) {
                return Err(ConfigError::OutOfBounds { x: pos.x, y: pos.y });
            }
            if body[..i].contains(&pos) {
                return Err(ConfigError::Overlap { x: pos.x, y: pos.y });
            }
        }

        for (i, pair) in body.windows(2).enumerate() {
            let dist = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
            if dist != 1 {
                return Err(ConfigError::Disjoint(i, i + 1));
            }
        }

        if body[0].step(self.initial_direction) == body[1] {
            return Err(ConfigError::Reversed(self.initial_direction.as_str()));
        }

        Ok(())
    }
}
