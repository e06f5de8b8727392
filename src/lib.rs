//! Falling-block puzzle simulation (workspace facade crate).
//!
//! Re-exports the workspace crates as `tetris_sim::{core, input, types}` and
//! hosts the scripted player used by the headless runner.

pub mod autoplay;

pub use tetris_sim_core as core;
pub use tetris_sim_input as input;
pub use tetris_sim_types as types;
