//! Read-only view of a game for renderers and observers.

use crate::game_state::{Outcome, Phase};
use crate::types::{Direction, Position, GRID_SIZE, INITIAL_DIRECTION};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid_size: u8,
    /// Segments head first. Empty only for hand-built snapshots.
    pub snake: Vec<Position>,
    pub treasure: Option<Position>,
    /// Committed direction, used to orient the head.
    pub direction: Direction,
    pub score: u32,
    pub phase: Phase,
    pub outcome: Option<Outcome>,
    pub episode_id: u32,
    pub steps: u32,
    pub revision: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.grid_size = GRID_SIZE;
        self.snake.clear();
        self.treasure = None;
        self.direction = INITIAL_DIRECTION;
        self.score = 0;
        self.phase = Phase::Idle;
        self.outcome = None;
        self.episode_id = 0;
        self.steps = 0;
        self.revision = 0;
    }

    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    pub fn playing(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            grid_size: GRID_SIZE,
            snake: Vec::new(),
            treasure: None,
            direction: INITIAL_DIRECTION,
            score: 0,
            phase: Phase::Idle,
            outcome: None,
            episode_id: 0,
            steps: 0,
            revision: 0,
        };
        s.clear();
        s
    }
}
