//! Integration tests for the session lifecycle and clock

use blockfall::core::GameState;
use blockfall::types::{
    Difficulty, GameEvent, Phase, RotationDir, ARENA_WIDTH, COUNTDOWN_STEP_MS,
};

/// Drive a fresh game through the 3-2-1-GO countdown into `Running`.
fn start_running(state: &mut GameState, difficulty: Difficulty) {
    state.start_new_game(difficulty);
    for _ in 0..4 {
        state.tick(COUNTDOWN_STEP_MS);
    }
    assert_eq!(state.phase(), Phase::Running);
    state.take_events();
}

#[test]
fn test_new_engine_starts_in_menu() {
    let state = GameState::new(12345);

    assert_eq!(state.phase(), Phase::Menu);
    assert!(!state.animating());
    assert_eq!(state.score(), 0);
    assert!(state.active().is_none());
    assert!(state.next_shape().is_none());
    assert!(state.ghost_y().is_none());
}

#[test]
fn test_difficulty_presets() {
    let mut state = GameState::new(1);

    state.start_new_game(Difficulty::Easy);
    assert_eq!(state.drop_interval_ms(), 1000);
    state.start_new_game(Difficulty::Medium);
    assert_eq!(state.drop_interval_ms(), 700);
    state.start_new_game(Difficulty::Hard);
    assert_eq!(state.drop_interval_ms(), 400);
}

#[test]
fn test_countdown_sequence() {
    let mut state = GameState::new(12345);
    state.start_new_game(Difficulty::Easy);

    assert_eq!(state.phase(), Phase::Countdown);
    assert_eq!(state.countdown(), Some(3));
    assert_eq!(
        state.take_events(),
        vec![GameEvent::CountdownTick { count: 3 }]
    );

    state.tick(COUNTDOWN_STEP_MS);
    assert_eq!(state.countdown(), Some(2));
    state.tick(COUNTDOWN_STEP_MS);
    assert_eq!(state.countdown(), Some(1));
    assert!(state.active().is_none());

    // GO performs the first spawn and fills the preview queue.
    state.tick(COUNTDOWN_STEP_MS);
    assert_eq!(state.countdown(), Some(0));
    assert!(state.active().is_some());
    assert!(state.next_shape().is_some());
    assert_eq!(state.phase(), Phase::Countdown);

    state.tick(COUNTDOWN_STEP_MS);
    assert_eq!(state.phase(), Phase::Running);
    assert_eq!(state.countdown(), None);

    let events = state.take_events();
    assert_eq!(
        events,
        vec![
            GameEvent::CountdownTick { count: 2 },
            GameEvent::CountdownTick { count: 1 },
            GameEvent::CountdownTick { count: 0 },
        ]
    );
}

#[test]
fn test_gravity_suspended_during_countdown() {
    let mut state = GameState::new(12345);
    state.start_new_game(Difficulty::Hard);

    // Three steps in, the piece exists but must not fall: each 1000 ms tick
    // far exceeds the 400 ms hard-difficulty interval.
    state.tick(COUNTDOWN_STEP_MS);
    state.tick(COUNTDOWN_STEP_MS);
    state.tick(COUNTDOWN_STEP_MS);
    assert_eq!(state.active().unwrap().y, 0);

    state.tick(COUNTDOWN_STEP_MS);
    assert_eq!(state.active().unwrap().y, 0);
    state.tick(401);
    assert_eq!(state.active().unwrap().y, 1);
}

#[test]
fn test_input_rejected_outside_running() {
    let mut state = GameState::new(12345);

    // Menu: nothing to act on, nothing panics.
    state.move_active(1);
    state.rotate_active(RotationDir::Clockwise);
    state.soft_drop();
    assert_eq!(state.phase(), Phase::Menu);

    // Countdown with a spawned piece: input still gated.
    state.start_new_game(Difficulty::Easy);
    state.tick(COUNTDOWN_STEP_MS);
    state.tick(COUNTDOWN_STEP_MS);
    state.tick(COUNTDOWN_STEP_MS);
    let piece = state.active().unwrap();
    state.move_active(1);
    state.move_active(-1);
    state.soft_drop();
    assert_eq!(state.active().unwrap(), piece);
}

#[test]
fn test_gravity_advances_one_row_per_exceeded_interval() {
    let mut state = GameState::new(12345);
    start_running(&mut state, Difficulty::Easy);
    let y0 = state.active().unwrap().y;

    state.tick(500);
    assert_eq!(state.active().unwrap().y, y0);
    state.tick(501);
    assert_eq!(state.active().unwrap().y, y0 + 1);

    // The accumulator restarts from zero after each drop.
    state.tick(500);
    assert_eq!(state.active().unwrap().y, y0 + 1);
}

#[test]
fn test_move_clamps_at_the_walls() {
    let mut state = GameState::new(12345);
    start_running(&mut state, Difficulty::Easy);

    for _ in 0..2 * ARENA_WIDTH {
        state.move_active(1);
    }
    let piece = state.active().unwrap();
    let rightmost = piece
        .shape
        .occupied()
        .map(|(dx, _, _)| piece.x + dx)
        .max()
        .unwrap();
    assert_eq!(rightmost, ARENA_WIDTH as i8 - 1);

    // A further push changes nothing.
    state.move_active(1);
    assert_eq!(state.active().unwrap(), piece);

    for _ in 0..2 * ARENA_WIDTH {
        state.move_active(-1);
    }
    let piece = state.active().unwrap();
    let leftmost = piece
        .shape
        .occupied()
        .map(|(dx, _, _)| piece.x + dx)
        .min()
        .unwrap();
    assert_eq!(leftmost, 0);
}

#[test]
fn test_rotation_in_open_space_keeps_position() {
    let mut state = GameState::new(12345);
    start_running(&mut state, Difficulty::Easy);
    let piece = state.active().unwrap();

    let mut shape = piece.shape;
    for _ in 0..4 {
        state.rotate_active(RotationDir::Clockwise);
        shape = shape.rotated(RotationDir::Clockwise);
        let now = state.active().unwrap();
        assert_eq!(now.shape, shape);
        assert_eq!(now.x, piece.x);
    }
    assert_eq!(state.active().unwrap().shape, piece.shape);
}

#[test]
fn test_ghost_rests_on_the_floor_of_an_empty_arena() {
    let mut state = GameState::new(12345);
    start_running(&mut state, Difficulty::Easy);

    let piece = state.active().unwrap();
    let max_dy = piece.shape.occupied().map(|(_, dy, _)| dy).max().unwrap();
    assert_eq!(state.ghost_y(), Some(19 - max_dy));
}

#[test]
fn test_pause_freezes_everything() {
    let mut state = GameState::new(12345);
    start_running(&mut state, Difficulty::Easy);

    state.pause();
    assert_eq!(state.phase(), Phase::Paused);

    let before = state.snapshot();
    state.tick(60_000);
    state.move_active(1);
    state.soft_drop();
    assert_eq!(state.snapshot(), before);
}

#[test]
fn test_resume_runs_countdown_without_respawning() {
    let mut state = GameState::new(12345);
    start_running(&mut state, Difficulty::Easy);
    let piece = state.active().unwrap();
    let score = state.score();

    state.pause();
    state.resume();
    assert_eq!(state.phase(), Phase::Countdown);
    assert_eq!(state.countdown(), Some(3));

    for _ in 0..4 {
        state.tick(COUNTDOWN_STEP_MS);
    }
    assert_eq!(state.phase(), Phase::Running);
    assert_eq!(state.active().unwrap(), piece);
    assert_eq!(state.score(), score);
}

#[test]
fn test_pause_rejected_outside_running() {
    let mut state = GameState::new(12345);

    state.pause();
    assert_eq!(state.phase(), Phase::Menu);

    state.start_new_game(Difficulty::Easy);
    state.pause();
    assert_eq!(state.phase(), Phase::Countdown);

    // Resume is only meaningful from pause.
    state.resume();
    assert_eq!(state.phase(), Phase::Countdown);
}

#[test]
fn test_return_to_menu_cancels_pending_countdown() {
    let mut state = GameState::new(12345);
    state.start_new_game(Difficulty::Easy);
    state.tick(COUNTDOWN_STEP_MS);
    state.take_events();

    state.return_to_menu();
    assert_eq!(state.phase(), Phase::Menu);

    // A stale countdown deadline must not fire after the teardown.
    state.tick(10 * COUNTDOWN_STEP_MS);
    assert!(state.take_events().is_empty());
    assert_eq!(state.phase(), Phase::Menu);
    assert!(state.active().is_none());
    assert_eq!(state.score(), 0);
    assert!(state.arena().cells().iter().all(|&c| c == 0));
}

#[test]
fn test_restart_resets_the_session_at_same_difficulty() {
    let mut state = GameState::new(12345);
    start_running(&mut state, Difficulty::Hard);
    state.tick(401);
    assert!(state.active().unwrap().y > 0);

    state.restart();
    assert_eq!(state.phase(), Phase::Countdown);
    assert_eq!(state.drop_interval_ms(), 400);
    assert_eq!(state.score(), 0);
    assert!(state.active().is_none());
    assert!(state.arena().cells().iter().all(|&c| c == 0));

    for _ in 0..4 {
        state.tick(COUNTDOWN_STEP_MS);
    }
    assert_eq!(state.phase(), Phase::Running);
    assert_eq!(state.active().unwrap().y, 0);
}

#[test]
fn test_events_drain_once() {
    let mut state = GameState::new(12345);
    state.start_new_game(Difficulty::Easy);

    assert!(!state.take_events().is_empty());
    assert!(state.take_events().is_empty());
}

#[test]
fn test_same_seed_same_drive_same_state() {
    let mut a = GameState::new(777);
    let mut b = GameState::new(777);

    for state in [&mut a, &mut b] {
        start_running(state, Difficulty::Medium);
        state.move_active(-1);
        state.rotate_active(RotationDir::Clockwise);
        for _ in 0..40 {
            state.tick(701);
        }
    }

    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_snapshot_reflects_running_state() {
    let mut state = GameState::new(12345);
    start_running(&mut state, Difficulty::Medium);

    let snap = state.snapshot();
    assert_eq!(snap.phase, Phase::Running);
    assert!(!snap.animating);
    assert_eq!(snap.countdown, None);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.level, 4);
    assert_eq!(snap.drop_interval_ms, 700);
    assert!(snap.active.is_some());
    assert!(snap.next.is_some());
    assert_eq!(snap.ghost_y, state.ghost_y());
    assert!(snap.grid.iter().flatten().all(|&c| c == 0));
}
