//! Integration tests for the session surface

use tetris_sim::autoplay::AutoPlayer;
use tetris_sim::core::{GameState, PiecePhase, SessionConfig};
use tetris_sim::types::{
    ActionState, CellState, GameEvent, LogicalAction, PieceKind, LINE_CLEAR_DELAY_TICKS,
    SPAWN_DELAY_TICKS, SPAWN_X, SPAWN_Y,
};

const DT: f32 = 1.0 / 60.0;

fn idle() -> ActionState {
    ActionState::new()
}

fn hard_drop() -> ActionState {
    ActionState::new().with_pressed(LogicalAction::HardDrop)
}

fn game_with_first(kind: PieceKind) -> GameState {
    (1..10_000)
        .map(|seed| {
            let mut game = GameState::new(seed);
            game.start_new_game(1);
            game
        })
        .find(|game| game.active().map(|p| p.kind) == Some(kind))
        .unwrap()
}

/// Tick until a piece is active again, failing after `limit` ticks.
fn run_until_active(game: &mut GameState, limit: u32) -> u32 {
    for n in 1..=limit {
        game.tick(DT, &idle());
        if game.active().is_some() {
            return n;
        }
    }
    panic!("no piece after {limit} ticks");
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameState::new(12345);
    assert!(!game.started());
    assert_eq!(game.final_score(), None);

    game.start_new_game(1);
    assert!(game.started());
    assert!(game.active().is_some());
    assert!(!game.is_game_over());
    assert!(!game.is_paused());
}

#[test]
fn test_hard_drop_via_tick_then_spawn_delay() {
    let mut game = GameState::new(12345);
    game.start_new_game(1);
    let first = game.active().unwrap().kind;
    let next = game.next_piece();

    game.tick(DT, &hard_drop());
    assert!(game.active().is_none());
    assert!(game.score() > 0);
    assert_eq!(
        game.phase(),
        PiecePhase::NoPiece {
            spawn_delay: SPAWN_DELAY_TICKS
        }
    );

    assert_eq!(run_until_active(&mut game, 100), SPAWN_DELAY_TICKS + 1);
    let piece = game.active().unwrap();
    assert_eq!(piece.kind, next);
    assert_ne!(piece.kind, first);
}

#[test]
fn test_full_row_freezes_for_delay_then_compacts() {
    let mut game = game_with_first(PieceKind::I);
    for x in [1, 2, 3, 8, 9, 10] {
        game.board_mut().set(x, 19, CellState::Placed);
    }
    game.board_mut().set(2, 18, CellState::Placed);

    game.tick(DT, &hard_drop());
    assert!(game.is_freezing());
    assert_eq!(
        game.take_events().as_slice(),
        &[GameEvent::LineCleared { count: 1 }]
    );

    let snap = game.snapshot();
    assert!(snap.is_clearing(19));
    assert!(snap.active.is_none());

    // Gameplay input is ignored while frozen.
    for _ in 0..LINE_CLEAR_DELAY_TICKS - 1 {
        game.tick(DT, &hard_drop());
        assert!(game.is_freezing());
        assert!(game.active().is_none());
    }
    game.tick(DT, &idle());
    assert!(!game.is_freezing());
    assert_eq!(game.lines(), 1);
    assert_eq!(game.board().placed_count(), 1);
    assert!(game.board().is_occupied(2, 19));

    // A fresh spawn delay follows the clear.
    assert_eq!(run_until_active(&mut game, 100), SPAWN_DELAY_TICKS + 1);
}

#[test]
fn test_tetris_event() {
    let mut game = game_with_first(PieceKind::I);
    let board = game.board_mut();
    for y in 16..=19 {
        for x in 1..=9 {
            board.set(x, y, CellState::Placed);
        }
    }

    // Rotate to vertical and slide to the right wall: I East covers column x + 1.
    game.tick(DT, &ActionState::new().with_pressed(LogicalAction::RotateCw));
    let right = ActionState::new().with_held(LogicalAction::MoveRight);
    for _ in 0..60 {
        game.tick(DT, &right);
    }
    assert_eq!(game.active().unwrap().x, 9);

    game.tick(DT, &hard_drop());
    assert_eq!(game.take_events().as_slice(), &[GameEvent::TetrisCleared]);

    for _ in 0..LINE_CLEAR_DELAY_TICKS {
        game.tick(DT, &idle());
    }
    assert_eq!(game.lines(), 4);
    assert!(game.score_state().back_to_back());
    assert_eq!(game.board().placed_count(), 0);
}

#[test]
fn test_blocked_spawn_is_game_over() {
    let mut game = GameState::new(3);
    game.start_new_game(1);
    game.tick(DT, &hard_drop());
    game.board_mut().set(SPAWN_X, SPAWN_Y, CellState::Placed);

    for _ in 0..=SPAWN_DELAY_TICKS {
        game.tick(DT, &idle());
    }
    assert!(game.is_game_over());
    assert!(game.active().is_none());

    let score = game.score();
    assert_eq!(game.final_score(), Some(score));
    assert_eq!(
        game.take_events().as_slice(),
        &[GameEvent::GameOver { final_score: score }]
    );

    // Nothing moves after game over, pause included.
    let pause = ActionState::new().with_pressed(LogicalAction::Pause);
    game.tick(DT, &pause);
    assert!(!game.is_paused());
    assert!(game.is_game_over());
}

#[test]
fn test_stacking_in_the_middle_ends_the_game() {
    let mut game = GameState::new(99);
    game.start_new_game(1);

    let mut ticks = 0;
    while !game.is_game_over() {
        let actions = if game.active().is_some() {
            hard_drop()
        } else {
            idle()
        };
        game.tick(DT, &actions);
        ticks += 1;
        assert!(ticks < 10_000, "stack never reached the top");
    }

    assert!(game.active().is_none());
    assert!(game.snapshot().danger_zone);
    assert_eq!(game.final_score(), Some(game.score()));
}

#[test]
fn test_restart_after_game_over() {
    let mut game = GameState::new(5);
    game.start_new_game(4);
    game.tick(DT, &hard_drop());
    game.board_mut().set(SPAWN_X, SPAWN_Y, CellState::Placed);
    for _ in 0..=SPAWN_DELAY_TICKS {
        game.tick(DT, &idle());
    }
    assert!(game.is_game_over());

    game.restart();
    assert!(!game.is_game_over());
    assert_eq!(game.level(), 4);
    assert_eq!(game.score(), 0);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.score_state().combo(), -1);
    assert_eq!(game.board().placed_count(), 0);
    assert_eq!(game.input().horizontal_held_us(), (0, 0));
    assert!(game.active().is_some());
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed: u32| {
        let mut game = GameState::new(seed);
        game.start_new_game(1);
        let mut kinds = Vec::new();
        for _ in 0..20 {
            if let Some(piece) = game.active() {
                kinds.push(piece.kind);
            }
            game.tick(DT, &hard_drop());
            for _ in 0..=SPAWN_DELAY_TICKS {
                game.tick(DT, &idle());
            }
        }
        (kinds, game.score())
    };
    assert_eq!(play(42), play(42));
}

#[test]
fn test_autoplay_session_from_config() {
    let config = SessionConfig {
        seed: 7,
        starting_level: 10,
        ..SessionConfig::default()
    };
    config.validate().unwrap();

    let mut game = GameState::with_config(&config);
    game.start_new_game(config.starting_level);
    let mut player = AutoPlayer::new(config.seed);

    let mut cleared = 0;
    for _ in 0..10_000 {
        let actions = player.next_actions(&game);
        game.tick(DT, &actions);
        cleared += game
            .take_events()
            .iter()
            .filter(|e| !matches!(e, GameEvent::GameOver { .. }))
            .count();
        if game.is_game_over() {
            break;
        }
    }
    assert!(game.level() >= 10);
    assert!(cleared > 0);
}
