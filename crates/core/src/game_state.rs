//! Game state module - manages the complete game state
//!
//! This module ties together the snake, the treasure, the RNG and the score.
//! It owns the lifecycle (idle, running, paused, over), the fixed-timestep
//! clock and the per-tick transition in [`GameState::advance`].

use log::{debug, info, trace};

use crate::config::{ConfigError, GameConfig};
use crate::rng::{sample_free_cell, SimpleRng};
use crate::snake::Snake;
use crate::snapshot::GameSnapshot;
use crate::types::{Direction, GameAction, Position};

/// Lifecycle phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Constructed, waiting for the first start.
    #[default]
    Idle,
    Running,
    Paused,
    /// Terminal until the next `start()`.
    GameOver,
}

/// What the head ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collision {
    Wall,
    Body,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Collided(Collision),
    /// The snake covers every cell; no treasure can be placed.
    BoardFilled,
}

/// Result of a single [`GameState::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    /// The game was not running; nothing changed.
    NotRunning,
    Moved,
    /// The head landed on the treasure.
    Ate,
    Collided(Collision),
    /// Growth filled the board.
    BoardFilled,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    snake: Snake,
    /// Direction applied on the most recent tick.
    direction: Direction,
    /// Direction to commit on the next tick.
    pending: Direction,
    treasure: Option<Position>,
    score: u32,
    phase: Phase,
    outcome: Option<Outcome>,
    rng: SimpleRng,
    tick_accum_ms: u32,
    /// Ticks advanced in the current game.
    steps: u32,
    /// Monotonic game id (increments on every start).
    episode_id: u32,
    /// Bumped on every observable change.
    revision: u64,
}

impl GameState {
    /// Create an idle game with the default configuration
    pub fn new(seed: u32) -> Self {
        let config = GameConfig::default();
        Self::build(config, seed)
    }

    /// Create an idle game with a custom configuration
    pub fn with_config(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: GameConfig, seed: u32) -> Self {
        let snake = Snake::new(config.grid_size, &config.initial_snake);
        let direction = config.initial_direction;
        let mut state = Self {
            config,
            snake,
            direction,
            pending: direction,
            treasure: None,
            score: 0,
            phase: Phase::Idle,
            outcome: None,
            rng: SimpleRng::new(seed),
            tick_accum_ms: 0,
            steps: 0,
            episode_id: 0,
            revision: 0,
        };
        state.treasure = state.place_treasure();
        state
    }

    /// Restore the initial layout with a fresh treasure.
    fn reset_board(&mut self) {
        self.snake = Snake::new(self.config.grid_size, &self.config.initial_snake);
        self.direction = self.config.initial_direction;
        self.pending = self.direction;
        self.score = 0;
        self.outcome = None;
        self.tick_accum_ms = 0;
        self.steps = 0;
        self.treasure = self.place_treasure();
    }

    fn place_treasure(&mut self) -> Option<Position> {
        let snake = &self.snake;
        let pos = sample_free_cell(&mut self.rng, self.config.grid_size, |p| snake.contains(p));
        trace!("treasure placed at {:?}", pos);
        pos
    }

    /// Start a new game, discarding whatever was in progress
    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            self.episode_id = self.episode_id.wrapping_add(1);
        }
        self.reset_board();
        self.phase = Phase::Running;
        self.revision += 1;
        info!(
            "game {} started (seed state {:#010x})",
            self.episode_id,
            self.rng.state()
        );
    }

    /// Suspend tick delivery. Only a running game can be paused.
    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.phase = Phase::Paused;
        self.tick_accum_ms = 0;
        self.revision += 1;
        debug!("game {} paused at step {}", self.episode_id, self.steps);
        true
    }

    /// Resume a paused game. No-op in any other phase.
    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Running;
        self.tick_accum_ms = 0;
        self.revision += 1;
        debug!("game {} resumed", self.episode_id);
        true
    }

    /// Single start/pause button: starts when idle or over, otherwise
    /// pauses or resumes.
    pub fn toggle(&mut self) {
        match self.phase {
            Phase::Idle | Phase::GameOver => self.start(),
            Phase::Running => {
                self.pause();
            }
            Phase::Paused => {
                self.resume();
            }
        }
    }

    /// Buffer a heading for the next tick.
    ///
    /// Ignored unless the game is running, and ignored when `dir` would
    /// reverse the committed direction. Returns whether it was accepted.
    pub fn set_pending_direction(&mut self, dir: Direction) -> bool {
        if self.phase != Phase::Running || self.direction.is_opposite(dir) {
            return false;
        }
        self.pending = dir;
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Turn(dir) => self.set_pending_direction(dir),
            GameAction::Toggle => {
                self.toggle();
                true
            }
            GameAction::Restart => {
                self.start();
                true
            }
        }
    }

    /// Place the treasure on a specific free cell.
    ///
    /// Returns false (leaving the treasure where it was) for occupied or
    /// off-board cells. Used to set up scenarios.
    pub fn set_treasure(&mut self, pos: Position) -> bool {
        if !pos.in_bounds(self.config.grid_size) || self.snake.contains(pos) {
            return false;
        }
        self.treasure = Some(pos);
        self.revision += 1;
        true
    }

    /// Advance the simulation by exactly one tick.
    ///
    /// Collisions are checked against the body as it was before the move,
    /// tail included: stepping onto the cell the tail is about to leave
    /// still ends the game.
    pub fn advance(&mut self) -> StepEvent {
        if self.phase != Phase::Running {
            return StepEvent::NotRunning;
        }
        let Some(head) = self.snake.head() else {
            return StepEvent::NotRunning;
        };

        self.direction = self.pending;
        self.steps = self.steps.wrapping_add(1);
        self.revision += 1;

        let next = head.step(self.direction);
        if !next.in_bounds(self.config.grid_size) {
            self.finish(Outcome::Collided(Collision::Wall));
            return StepEvent::Collided(Collision::Wall);
        }
        if self.snake.contains(next) {
            self.finish(Outcome::Collided(Collision::Body));
            return StepEvent::Collided(Collision::Body);
        }

        self.snake.push_head(next);

        if self.treasure != Some(next) {
            self.snake.pop_tail();
            return StepEvent::Moved;
        }

        self.score = self.score.saturating_add(self.config.treasure_reward);
        self.treasure = self.place_treasure();
        debug!(
            "treasure eaten: score {} length {}",
            self.score,
            self.snake.len()
        );
        if self.treasure.is_none() {
            self.finish(Outcome::BoardFilled);
            return StepEvent::BoardFilled;
        }
        StepEvent::Ate
    }

    fn finish(&mut self, outcome: Outcome) {
        self.phase = Phase::GameOver;
        self.outcome = Some(outcome);
        self.tick_accum_ms = 0;
        info!(
            "game {} over ({:?}): score {} length {} after {} steps",
            self.episode_id,
            outcome,
            self.score,
            self.snake.len(),
            self.steps
        );
    }

    /// Feed elapsed wall time into the fixed-timestep clock.
    ///
    /// Calls [`advance`](Self::advance) once per full tick period and returns
    /// how many steps were taken. Time does not accumulate outside
    /// [`Phase::Running`].
    pub fn tick(&mut self, elapsed_ms: u32) -> u32 {
        if self.phase != Phase::Running {
            return 0;
        }

        self.tick_accum_ms = self.tick_accum_ms.saturating_add(elapsed_ms);
        let mut steps = 0;
        while self.phase == Phase::Running && self.tick_accum_ms >= self.config.tick_ms {
            self.tick_accum_ms -= self.config.tick_ms;
            self.advance();
            steps += 1;
        }
        steps
    }

    /// Milliseconds until the clock next advances, `None` when not running.
    pub fn ms_until_next_tick(&self) -> Option<u32> {
        if self.phase != Phase::Running {
            return None;
        }
        Some(self.config.tick_ms.saturating_sub(self.tick_accum_ms))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn treasure(&self) -> Option<Position> {
        self.treasure
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Change counter for observers: differs whenever the rendered state may
    /// have changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid_size = self.config.grid_size;
        self.snake.write_into(&mut out.snake);
        out.treasure = self.treasure;
        out.direction = self.direction;
        out.score = self.score;
        out.phase = self.phase;
        out.outcome = self.outcome;
        out.episode_id = self.episode_id;
        out.steps = self.steps;
        out.revision = self.revision;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TREASURE_REWARD;

    fn p(x: i16, y: i16) -> Position {
        Position::new(x, y)
    }

    fn body(state: &GameState) -> Vec<Position> {
        state.snake().iter().collect()
    }

    /// A running default game with the treasure parked in a far corner.
    fn running_game() -> GameState {
        let mut state = GameState::new(12345);
        state.start();
        assert!(state.set_treasure(p(0, 0)));
        state
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.phase(), Phase::Idle);
        assert!(!state.running());
        assert!(!state.game_over());
        assert_eq!(state.score(), 0);
        assert_eq!(body(&state), vec![p(9, 10), p(8, 10)]);
        assert_eq!(state.direction(), Direction::Right);
        let treasure = state.treasure().unwrap();
        assert!(!state.snake().contains(treasure));
    }

    #[test]
    fn test_advance_is_noop_before_start() {
        let mut state = GameState::new(1);
        let before = state.snapshot();
        assert_eq!(state.advance(), StepEvent::NotRunning);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_start_runs_game() {
        let mut state = GameState::new(1);
        state.start();
        assert_eq!(state.phase(), Phase::Running);
        assert_eq!(state.episode_id(), 0);
        state.start();
        assert_eq!(state.episode_id(), 1);
    }

    #[test]
    fn test_advance_moves_right() {
        let mut state = running_game();
        assert_eq!(state.advance(), StepEvent::Moved);
        assert_eq!(body(&state), vec![p(10, 10), p(9, 10)]);
        assert_eq!(state.score(), 0);
        assert_eq!(state.steps(), 1);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = running_game();
        assert!(state.set_treasure(p(10, 10)));

        assert_eq!(state.advance(), StepEvent::Ate);
        assert_eq!(body(&state), vec![p(10, 10), p(9, 10), p(8, 10)]);
        assert_eq!(state.score(), TREASURE_REWARD);
        let t = state.treasure().unwrap();
        assert!(!state.snake().contains(t));
    }

    #[test]
    fn test_opposite_direction_is_ignored() {
        let mut state = running_game();
        assert!(!state.set_pending_direction(Direction::Left));
        assert_eq!(state.pending_direction(), Direction::Right);

        assert!(state.set_pending_direction(Direction::Up));
        assert_eq!(state.pending_direction(), Direction::Up);
        // Still compared with the committed heading, not the buffered one.
        assert!(!state.set_pending_direction(Direction::Left));
        assert!(state.set_pending_direction(Direction::Down));
    }

    #[test]
    fn test_direction_ignored_when_not_running() {
        let mut state = GameState::new(1);
        assert!(!state.set_pending_direction(Direction::Up));
        state.start();
        state.pause();
        assert!(!state.set_pending_direction(Direction::Up));
        assert_eq!(state.pending_direction(), Direction::Right);
    }

    #[test]
    fn test_wall_collision_keeps_body() {
        let config = GameConfig::default()
            .with_initial_snake(&[p(19, 10), p(18, 10)], Direction::Right);
        let mut state = GameState::with_config(config, 1).unwrap();
        state.start();

        assert_eq!(state.advance(), StepEvent::Collided(Collision::Wall));
        assert!(state.game_over());
        assert!(!state.running());
        assert_eq!(state.outcome(), Some(Outcome::Collided(Collision::Wall)));
        assert_eq!(body(&state), vec![p(19, 10), p(18, 10)]);
    }

    #[test]
    fn test_moving_onto_tail_is_collision() {
        // A 2x2 loop: head (1,0), then (1,1), (0,1), tail (0,0).
        let config = GameConfig::default().with_initial_snake(
            &[p(1, 0), p(1, 1), p(0, 1), p(0, 0)],
            Direction::Left,
        );
        let mut state = GameState::with_config(config, 1).unwrap();
        state.start();

        assert_eq!(state.advance(), StepEvent::Collided(Collision::Body));
        assert_eq!(state.outcome(), Some(Outcome::Collided(Collision::Body)));
        assert_eq!(body(&state), vec![p(1, 0), p(1, 1), p(0, 1), p(0, 0)]);
    }

    #[test]
    fn test_game_over_is_idempotent() {
        let config = GameConfig::default()
            .with_initial_snake(&[p(19, 10), p(18, 10)], Direction::Right);
        let mut state = GameState::with_config(config, 1).unwrap();
        state.start();
        state.advance();

        let before = state.snapshot();
        for _ in 0..5 {
            assert_eq!(state.advance(), StepEvent::NotRunning);
            assert_eq!(state.tick(1000), 0);
        }
        assert_eq!(state.snapshot(), before);
        assert!(!state.pause());
        assert!(!state.resume());
    }

    #[test]
    fn test_pause_and_resume() {
        let mut state = running_game();
        assert!(state.pause());
        assert_eq!(state.phase(), Phase::Paused);
        assert_eq!(state.advance(), StepEvent::NotRunning);
        assert_eq!(state.tick(10_000), 0);

        assert!(state.resume());
        assert!(state.running());
        assert_eq!(state.advance(), StepEvent::Moved);
    }

    #[test]
    fn test_toggle_cycles_phases() {
        let mut state = GameState::new(1);
        state.toggle();
        assert_eq!(state.phase(), Phase::Running);
        state.toggle();
        assert_eq!(state.phase(), Phase::Paused);
        state.toggle();
        assert_eq!(state.phase(), Phase::Running);
    }

    #[test]
    fn test_toggle_restarts_after_game_over() {
        let config = GameConfig::default()
            .with_initial_snake(&[p(19, 10), p(18, 10)], Direction::Right);
        let mut state = GameState::with_config(config, 1).unwrap();
        state.start();
        state.advance();
        assert!(state.game_over());

        state.toggle();
        assert!(state.running());
        assert_eq!(state.outcome(), None);
        assert_eq!(body(&state), vec![p(19, 10), p(18, 10)]);
    }

    #[test]
    fn test_restart_resets_wholesale() {
        let mut state = running_game();
        state.set_treasure(p(10, 10));
        state.advance();
        state.set_treasure(p(0, 0));
        state.set_pending_direction(Direction::Up);
        state.advance();
        assert_eq!(state.score(), 10);

        state.apply_action(GameAction::Restart);
        assert_eq!(state.score(), 0);
        assert_eq!(state.steps(), 0);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.pending_direction(), Direction::Right);
        assert_eq!(body(&state), vec![p(9, 10), p(8, 10)]);
        assert!(state.running());
    }

    #[test]
    fn test_tick_accumulates_fixed_steps() {
        let mut state = running_game();
        assert_eq!(state.tick(100), 0);
        assert_eq!(state.ms_until_next_tick(), Some(40));
        assert_eq!(state.tick(40), 1);
        assert_eq!(state.tick(280), 2);
        assert_eq!(state.steps(), 3);
    }

    #[test]
    fn test_pause_discards_partial_tick() {
        let mut state = running_game();
        state.tick(130);
        state.pause();
        state.resume();
        assert_eq!(state.tick(20), 0);
        assert_eq!(state.ms_until_next_tick(), Some(120));
    }

    #[test]
    fn test_set_treasure_rejects_occupied_cells() {
        let mut state = running_game();
        assert!(!state.set_treasure(p(9, 10)));
        assert!(!state.set_treasure(p(-1, 3)));
        assert_eq!(state.treasure(), Some(p(0, 0)));
    }

    #[test]
    fn test_treasure_lands_on_last_free_cell() {
        // 4x4 board with a serpentine body covering 14 cells; two cells left.
        let layout = [
            p(1, 3),
            p(2, 3),
            p(3, 3),
            p(3, 2),
            p(2, 2),
            p(1, 2),
            p(0, 2),
            p(0, 1),
            p(1, 1),
            p(2, 1),
            p(3, 1),
            p(3, 0),
            p(2, 0),
            p(1, 0),
        ];
        let config = GameConfig {
            grid_size: 4,
            ..GameConfig::default()
        }
        .with_initial_snake(&layout, Direction::Left);
        let mut state = GameState::with_config(config, 9).unwrap();
        state.start();

        // Free cells are (0,3) and (0,0); eat (0,3) first.
        assert!(state.set_treasure(p(0, 3)));
        assert_eq!(state.advance(), StepEvent::Ate);
        assert_eq!(state.treasure(), Some(p(0, 0)));

        state.set_pending_direction(Direction::Up);
        // Heading up from (0,3) reaches (0,2), which is body: collision.
        assert_eq!(state.advance(), StepEvent::Collided(Collision::Body));
    }

    #[test]
    fn test_last_free_cell_wins() {
        // 4x4 board, 15 cells occupied, head next to the only free cell.
        let layout = [
            p(1, 0),
            p(2, 0),
            p(3, 0),
            p(3, 1),
            p(2, 1),
            p(1, 1),
            p(0, 1),
            p(0, 2),
            p(1, 2),
            p(2, 2),
            p(3, 2),
            p(3, 3),
            p(2, 3),
            p(1, 3),
            p(0, 3),
        ];
        let config = GameConfig {
            grid_size: 4,
            ..GameConfig::default()
        }
        .with_initial_snake(&layout, Direction::Left);
        let mut state = GameState::with_config(config, 9).unwrap();
        state.start();
        assert_eq!(state.treasure(), Some(p(0, 0)));

        assert_eq!(state.advance(), StepEvent::BoardFilled);
        assert!(state.game_over());
        assert_eq!(state.outcome(), Some(Outcome::BoardFilled));
        assert_eq!(state.treasure(), None);
        assert!(state.snake().fills_grid());
        assert_eq!(state.score(), TREASURE_REWARD);
    }

    #[test]
    fn test_revision_tracks_changes() {
        let mut state = GameState::new(1);
        let r0 = state.revision();
        state.start();
        let r1 = state.revision();
        assert!(r1 > r0);

        // Buffering a direction is not visible until the next tick.
        state.set_pending_direction(Direction::Up);
        assert_eq!(state.revision(), r1);

        state.advance();
        assert!(state.revision() > r1);
    }
}
