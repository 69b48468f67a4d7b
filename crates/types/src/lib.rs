//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, pixel rendering).
//!
//! # Board Dimensions
//!
//! - **Grid**: 20x20 cells (indexed 0-19 on both axes)
//! - **Origin**: (0, 0) is the top-left cell, `y` grows downwards
//! - **Initial snake**: head at (9, 10), tail at (8, 10), moving right
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRID_SIZE` | 20 | Cells per board side |
//! | `CELL_PX` | 24 | Pixels per cell in the pixel renderer |
//! | `TICK_MS` | 140 | Fixed interval between snake steps |
//! | `TREASURE_REWARD` | 10 | Points per treasure eaten |
//!
//! # Examples
//!
//! ```
//! use tui_snake_types::{Direction, GameAction, Position, GRID_SIZE};
//!
//! let head = Position::new(9, 10);
//! assert_eq!(head.step(Direction::Right), Position::new(10, 10));
//!
//! assert!(Direction::Up.is_opposite(Direction::Down));
//! assert_ne!(GameAction::Turn(Direction::Up), GameAction::Toggle);
//! assert_eq!(GRID_SIZE, 20);
//! ```

/// Board side length in cells (20x20 grid)
pub const GRID_SIZE: u8 = 20;

/// Side length of one board cell in the pixel renderer
pub const CELL_PX: u32 = 24;

/// Fixed interval between snake steps in milliseconds
pub const TICK_MS: u32 = 140;

/// Points awarded for each treasure eaten
pub const TREASURE_REWARD: u32 = 10;

/// Snake body at the start of every game, head first.
pub const INITIAL_SNAKE: [Position; 2] = [Position::new(9, 10), Position::new(8, 10)];

/// Heading of the snake at the start of every game.
pub const INITIAL_DIRECTION: Direction = Direction::Right;


/// A cell coordinate on the board.
///
/// Coordinates are signed so that a head stepping off the board is still
/// representable until the wall check rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// True when both coordinates lie in `[0, size)`.
    pub fn in_bounds(self, size: u8) -> bool {
        let size = size as i16;
        self.x >= 0 && self.x < size && self.y >= 0 && self.y < size
    }
}

/// The four headings of the snake
///
/// `y` grows downwards, so `Up` is `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector `(dx, dy)` for this heading.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True when `other` would reverse the snake onto itself.
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// Produced by the key mapping and consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Buffer a new heading for the next tick
    Turn(Direction),
    /// Start when idle or over, otherwise pause/resume
    Toggle,
    /// Discard the current game and start a fresh one
    Restart,
}
