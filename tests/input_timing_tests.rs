//! Input timing tests - DAS/ARR cadence as seen by the session

use tetris_sim::core::{GameState, SessionConfig};
use tetris_sim::input::{autorepeat, secs_to_micros, InputHandler, TimingConfig};
use tetris_sim::types::{ActionState, GameCommand, LogicalAction, PieceKind};

fn left_held() -> ActionState {
    ActionState::new().with_held(LogicalAction::MoveLeft)
}

#[test]
fn test_das_plus_three_arr_in_one_frame_emits_four_moves() {
    let mut handler = InputHandler::new();
    let commands = handler.update(secs_to_micros(0.15 + 3.0 * 0.05), &left_held());
    assert_eq!(commands.as_slice(), &[GameCommand::MoveLeft; 4]);
}

/// A started game whose first piece is an O, which can travel from column 5 to 1.
fn game_starting_with_o() -> GameState {
    (1..10_000)
        .map(|seed| {
            let mut game = GameState::new(seed);
            game.start_new_game(1);
            game
        })
        .find(|game| game.active().map(|p| p.kind) == Some(PieceKind::O))
        .unwrap()
}

#[test]
fn test_das_plus_three_arr_moves_piece_four_columns() {
    let mut game = game_starting_with_o();
    let start_x = game.active().unwrap().x;

    game.tick(0.15 + 3.0 * 0.05, &left_held());
    assert_eq!(game.active().unwrap().x, start_x - 4);
}

#[test]
fn test_held_direction_at_sixty_hz() {
    let mut handler = InputHandler::new();
    let dt = secs_to_micros(1.0 / 60.0);
    let mut moves_per_tick = Vec::new();
    for _ in 0..16 {
        moves_per_tick.push(handler.update(dt, &left_held()).len());
    }
    // One immediate move, then nothing until DAS + ARR (200ms) is reached on
    // the 12th tick, then one move every 3 ticks.
    let total: usize = moves_per_tick.iter().sum();
    assert_eq!(moves_per_tick[0], 1);
    assert!(moves_per_tick[1..11].iter().all(|&n| n == 0));
    assert_eq!(moves_per_tick[11], 1);
    assert_eq!(&moves_per_tick[12..15], &[0, 0, 1]);
    assert_eq!(total, 3);
}

#[test]
fn test_release_resets_accumulator() {
    let mut handler = InputHandler::new();
    handler.update(100_000, &left_held());
    handler.update(100_000, &ActionState::new());
    assert_eq!(handler.horizontal_held_us(), (0, 0));

    let commands = handler.update(100_000, &left_held());
    assert_eq!(commands.len(), 1);
}

#[test]
fn test_both_directions_cancel() {
    let mut handler = InputHandler::new();
    let both = left_held().with_held(LogicalAction::MoveRight);
    assert!(handler.update(500_000, &both).is_empty());
    assert_eq!(handler.horizontal_held_us(), (0, 0));
}

#[test]
fn test_soft_drop_repeats_every_thirty_ms() {
    let mut handler = InputHandler::new();
    let soft = ActionState::new().with_held(LogicalAction::SoftDrop);
    // Immediate step plus repeats at 30, 60 and 90 ms.
    let commands = handler.update(90_000, &soft);
    assert_eq!(commands.len(), 4);
    assert!(commands.iter().all(|c| *c == GameCommand::SoftDrop));
}

#[test]
fn test_edge_actions_fire_once_per_press() {
    let mut handler = InputHandler::new();
    let press = ActionState::new().with_pressed(LogicalAction::RotateCw);
    assert_eq!(handler.update(16_667, &press).as_slice(), &[GameCommand::RotateCw]);

    let hold = ActionState::new().with_held(LogicalAction::RotateCw);
    assert!(handler.update(16_667, &hold).is_empty());
}

#[test]
fn test_autorepeat_pure_function() {
    assert_eq!(autorepeat(0, 150_000, 50_000), (0, 0));
    assert_eq!(autorepeat(199_999, 150_000, 50_000), (0, 199_999));
    assert_eq!(autorepeat(200_000, 150_000, 50_000), (1, 150_000));
    assert_eq!(autorepeat(310_000, 150_000, 50_000), (3, 160_000));
}

#[test]
fn test_custom_timing_from_config() {
    let config = SessionConfig {
        timing: TimingConfig {
            das_us: 100_000,
            arr_us: 10_000,
            ..TimingConfig::default()
        },
        ..SessionConfig::default()
    };
    let mut game = GameState::with_config(&config);
    game.start_new_game(1);
    let start_x = game.active().unwrap().x;

    // 1 immediate + 1 repeat at 110ms.
    game.tick(0.11, &left_held());
    assert_eq!(game.active().unwrap().x, start_x - 2);
}
