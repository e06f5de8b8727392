//! Input module (engine-facing).
//!
//! Converts the per-frame held/pressed view of the logical actions into
//! discrete gameplay commands with DAS/ARR auto-repeat ([`handler`]). The
//! optional `crossterm` feature adds a default keyboard binding resolver
//! ([`map`]) that produces those per-frame views from terminal key events.

pub mod handler;
#[cfg(feature = "crossterm")]
pub mod map;

pub use tetris_sim_types as types;

pub use handler::{autorepeat, secs_to_micros, Commands, InputHandler, TimingConfig};
#[cfg(feature = "crossterm")]
pub use map::{map_key, should_quit, KeyboardResolver};
