//! Headless runner (default binary).
//!
//! Plays one seeded game with the scripted player at a fixed 60 Hz step,
//! logs notifications as they fire and prints the final score. Configured
//! through `TETRIS_*` environment variables; `RUST_LOG` controls verbosity.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tetris_sim::autoplay::AutoPlayer;
use tetris_sim::core::{GameState, SessionConfig};
use tetris_sim::types::{GameEvent, TICK_RATE_HZ};

const ENV_MAX_FRAMES: &str = "TETRIS_MAX_FRAMES";

/// One hour of play at 60 Hz.
const DEFAULT_MAX_FRAMES: u64 = 216_000;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = SessionConfig::from_env()?;
    config.validate()?;
    let max_frames = max_frames_from_env()?;

    let mut game = GameState::with_config(&config);
    game.start_new_game(config.starting_level);
    let mut player = AutoPlayer::new(config.seed);

    let dt = 1.0 / TICK_RATE_HZ as f32;
    for frame in 0..max_frames {
        let actions = player.next_actions(&game);
        game.tick(dt, &actions);

        for event in game.take_events() {
            match event {
                GameEvent::LineCleared { count } => info!(frame, count, "line cleared"),
                GameEvent::TetrisCleared => info!(frame, "tetris"),
                GameEvent::GameOver { final_score } => info!(frame, final_score, "game over"),
            }
        }

        if let Some(score) = game.final_score() {
            println!(
                "game over after {} frames: score {} lines {} level {}",
                frame + 1,
                score,
                game.lines(),
                game.level()
            );
            return Ok(());
        }
    }

    println!(
        "stopped after {} frames: score {} lines {} level {}",
        max_frames,
        game.score(),
        game.lines(),
        game.level()
    );
    Ok(())
}

fn max_frames_from_env() -> Result<u64> {
    match std::env::var(ENV_MAX_FRAMES) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {ENV_MAX_FRAMES}: {raw:?}")),
        Err(_) => Ok(DEFAULT_MAX_FRAMES),
    }
}
