//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the whole falling-block simulation: board, pieces,
//! rotation, line clearing, scoring and the session that drives them.
//! It has no dependency on rendering, audio or terminal I/O:
//!
//! - **Deterministic**: the same seed and inputs replay the same game
//! - **Testable**: every rule is a plain function or a small state machine
//! - **Fast**: fixed-capacity storage, no allocation on the tick path
//!
//! # Module Structure
//!
//! - [`board`]: 12x21 grid with its own walls, placement and compaction
//! - [`pieces`]: shape catalog for the 7 kinds in 4 rotations
//! - [`rotation`]: rotation with the horizontal kick sequence
//! - [`rng`]: seeded randomizer that never repeats the previous kind
//! - [`line_clear`]: timed freeze and blink before rows are removed
//! - [`scoring`]: line clears, combos, back-to-back, levels and gravity speed
//! - [`game_state`]: the session; spawn, move, lock, gravity, pause
//! - [`snapshot`]: read-only view for renderers
//! - [`config`]: session configuration and its errors
//!
//! # Example
//!
//! ```
//! use tetris_sim_core::GameState;
//! use tetris_sim_core::types::{ActionState, LogicalAction};
//!
//! let mut game = GameState::new(12345);
//! game.start_new_game(1);
//!
//! let drop = ActionState::new().with_pressed(LogicalAction::HardDrop);
//! game.tick(1.0 / 60.0, &drop);
//!
//! // Hard drop awards points and locks the piece.
//! assert!(game.score() > 0);
//! assert!(game.active().is_none());
//! ```
//!
//! # Timing
//!
//! [`GameState::tick`](game_state::GameState::tick) is meant to run at 60 Hz.
//! Gravity, delays and blinking count ticks; only auto-repeat reads the
//! elapsed time.

pub mod board;
pub mod config;
pub mod game_state;
pub mod line_clear;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use tetris_sim_input as input;
pub use tetris_sim_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, SessionConfig};
pub use game_state::{Events, GameState, PiecePhase, Tetromino};
pub use line_clear::LineClearPhase;
pub use pieces::get_shape;
pub use rng::{PieceRandomizer, SimpleRng};
pub use rotation::try_rotate;
pub use scoring::{ScoreResult, ScoreState};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
