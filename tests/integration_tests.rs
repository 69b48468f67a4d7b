//! Integration tests for the game engine through the facade crate.

use tui_snake::core::{Collision, GameConfig, GameState, Outcome, Phase, StepEvent};
use tui_snake::types::{Direction, GameAction, Position, GRID_SIZE, TREASURE_REWARD};

fn started(seed: u32) -> GameState {
    let mut state = GameState::new(seed);
    state.start();
    state
}

fn body(state: &GameState) -> Vec<Position> {
    state.snake().iter().collect()
}

#[test]
fn initial_state_moves_one_cell_right() {
    let mut state = started(12345);
    assert_eq!(body(&state), vec![Position::new(9, 10), Position::new(8, 10)]);
    assert_eq!(state.direction(), Direction::Right);
    assert_eq!(state.score(), 0);
    assert!(!state.game_over());

    assert!(state.set_treasure(Position::new(0, 0)));
    assert_eq!(state.advance(), StepEvent::Moved);

    assert_eq!(body(&state), vec![Position::new(10, 10), Position::new(9, 10)]);
    assert_eq!(state.score(), 0);
}

#[test]
fn head_on_right_edge_hits_the_wall() {
    let config = GameConfig::default()
        .with_initial_snake(&[Position::new(19, 10), Position::new(18, 10)], Direction::Right);
    let mut state = GameState::with_config(config, 7).unwrap();
    state.start();
    state.set_treasure(Position::new(0, 0));
    let before = body(&state);

    assert_eq!(state.advance(), StepEvent::Collided(Collision::Wall));

    assert!(state.game_over());
    assert!(!state.running());
    assert_eq!(state.outcome(), Some(Outcome::Collided(Collision::Wall)));
    assert_eq!(body(&state), before);
}

#[test]
fn eating_treasure_grows_and_relocates_it() {
    let mut state = started(3);
    assert!(state.set_treasure(Position::new(10, 10)));

    assert_eq!(state.advance(), StepEvent::Ate);

    assert_eq!(state.snake().head(), Some(Position::new(10, 10)));
    assert_eq!(state.snake().len(), 3);
    assert_eq!(state.score(), TREASURE_REWARD);
    let treasure = state.treasure().unwrap();
    assert!(!state.snake().contains(treasure));
    assert!(treasure.in_bounds(GRID_SIZE));
}

#[test]
fn reversing_before_first_tick_is_ignored() {
    let mut state = started(9);
    state.set_treasure(Position::new(0, 0));

    assert!(!state.apply_action(GameAction::Turn(Direction::Left)));
    assert_eq!(state.pending_direction(), Direction::Right);

    state.advance();
    assert_eq!(state.snake().head(), Some(Position::new(10, 10)));
    assert_eq!(state.direction(), Direction::Right);
}

#[test]
fn only_the_last_turn_before_a_tick_counts() {
    let mut state = started(9);
    state.set_treasure(Position::new(0, 0));

    state.apply_action(GameAction::Turn(Direction::Up));
    state.apply_action(GameAction::Turn(Direction::Down));
    state.advance();

    assert_eq!(state.snake().head(), Some(Position::new(9, 11)));
    assert_eq!(state.direction(), Direction::Down);
}

#[test]
fn quick_double_turn_cannot_reverse_into_the_neck() {
    // Up is accepted, then Left is checked against the committed Right.
    let mut state = started(9);
    state.set_treasure(Position::new(0, 0));

    assert!(state.apply_action(GameAction::Turn(Direction::Up)));
    assert!(!state.apply_action(GameAction::Turn(Direction::Left)));
    state.advance();

    assert_eq!(state.snake().head(), Some(Position::new(9, 9)));
}

#[test]
fn game_over_is_idempotent() {
    let config = GameConfig::default()
        .with_initial_snake(&[Position::new(0, 0), Position::new(1, 0)], Direction::Left);
    let mut state = GameState::with_config(config, 1).unwrap();
    state.start();
    state.advance();
    assert!(state.game_over());

    let snap = state.snapshot();
    assert_eq!(state.advance(), StepEvent::NotRunning);
    assert_eq!(state.tick(10_000), 0);
    assert!(!state.apply_action(GameAction::Turn(Direction::Down)));
    assert_eq!(state.snapshot(), snap);
}

#[test]
fn toggle_walks_the_lifecycle() {
    let mut state = GameState::new(5);
    assert_eq!(state.phase(), Phase::Idle);

    state.apply_action(GameAction::Toggle);
    assert_eq!(state.phase(), Phase::Running);
    state.apply_action(GameAction::Toggle);
    assert_eq!(state.phase(), Phase::Paused);
    state.apply_action(GameAction::Toggle);
    assert_eq!(state.phase(), Phase::Running);
}

#[test]
fn restart_after_game_over_resets_everything() {
    let config = GameConfig::default()
        .with_initial_snake(&[Position::new(19, 10), Position::new(18, 10)], Direction::Right);
    let mut state = GameState::with_config(config, 11).unwrap();
    state.start();
    let first_episode = state.episode_id();
    state.advance();
    assert!(state.game_over());

    state.apply_action(GameAction::Restart);

    assert_eq!(state.phase(), Phase::Running);
    assert_eq!(state.score(), 0);
    assert_eq!(state.outcome(), None);
    assert_eq!(state.steps(), 0);
    assert_eq!(state.snake().head(), Some(Position::new(19, 10)));
    assert_ne!(state.episode_id(), first_episode);
}

#[test]
fn paused_game_does_not_tick() {
    let mut state = started(2);
    state.set_treasure(Position::new(0, 0));
    assert!(state.pause());

    assert_eq!(state.tick(1_000), 0);
    assert_eq!(state.snake().head(), Some(Position::new(9, 10)));
    assert_eq!(state.ms_until_next_tick(), None);

    assert!(state.resume());
    assert_eq!(state.tick(state.config().tick_ms), 1);
    assert_eq!(state.snake().head(), Some(Position::new(10, 10)));
}

#[test]
fn revision_changes_on_every_observable_update() {
    let mut state = GameState::new(4);
    let r0 = state.revision();
    state.start();
    let r1 = state.revision();
    assert!(r1 > r0);

    state.advance();
    assert!(state.revision() > r1);

    let r2 = state.revision();
    state.tick(1);
    assert_eq!(state.revision(), r2);
}

#[test]
fn invalid_config_is_rejected() {
    let config = GameConfig::default().with_tick_ms(0);
    assert!(GameState::with_config(config, 1).is_err());

    let config = GameConfig::default()
        .with_initial_snake(&[Position::new(5, 5), Position::new(7, 5)], Direction::Right);
    assert!(GameState::with_config(config, 1).is_err());
}
