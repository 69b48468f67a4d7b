//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has no dependencies on UI, terminals, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical treasure sequences
//! - **Testable**: Every rule is covered by unit tests
//! - **Portable**: Can run in any environment (terminal, pixel canvas, headless)
//!
//! # Module Structure
//!
//! - [`config`]: Named game parameters and their validation
//! - [`game_state`]: Lifecycle, fixed-timestep clock and the per-tick transition
//! - [`rng`]: Seeded LCG and bounded treasure placement
//! - [`snake`]: Snake body with O(1) occupancy checks
//! - [`snapshot`]: Read-only copy of the state for renderers
//!
//! # Game Rules
//!
//! - The snake moves one cell per tick in its committed direction
//! - A turn is buffered and committed on the next tick; reversing is ignored
//! - Leaving the board or touching the body (tail included) ends the game
//! - Eating treasure grows the snake by one and awards 10 points
//! - Filling the whole board ends the game as a win
//!
//! # Example
//!
//! ```
//! use tui_snake_core::{GameState, StepEvent};
//! use tui_snake_types::{Direction, Position};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//! game.set_treasure(Position::new(0, 0));
//!
//! game.set_pending_direction(Direction::Up);
//! assert_eq!(game.advance(), StepEvent::Moved);
//! assert_eq!(game.snake().head(), Some(Position::new(9, 9)));
//! assert_eq!(game.score(), 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) with elapsed milliseconds;
//! it advances once per full tick period (140ms by default) while running.

pub mod config;
pub mod game_state;
pub mod rng;
pub mod snake;
pub mod snapshot;

pub use tui_snake_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, GameConfig};
pub use game_state::{Collision, GameState, Outcome, Phase, StepEvent};
pub use rng::{sample_free_cell, SimpleRng};
pub use snake::Snake;
pub use snapshot::GameSnapshot;
