//! DAS/ARR input timing model.
//!
//! Turns the per-tick held/pressed view of the logical actions into discrete
//! [`GameCommand`]s. Horizontal movement and soft drop auto-repeat; rotation
//! and hard drop are edge-triggered. Time is accumulated in whole
//! microseconds so repeat counts are exact regardless of frame length.

use arrayvec::ArrayVec;

use crate::types::{
    ActionState, GameCommand, LogicalAction, DEFAULT_ARR_US, DEFAULT_DAS_US, SOFT_DROP_ARR_US,
    SOFT_DROP_DAS_US,
};

/// Upper bound on commands emitted by a single update.
pub const MAX_COMMANDS_PER_TICK: usize = 64;

/// Commands produced by one [`InputHandler::update`] call, in application order.
pub type Commands = ArrayVec<GameCommand, MAX_COMMANDS_PER_TICK>;

/// Auto-repeat thresholds, in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub das_us: u32,
    pub arr_us: u32,
    pub soft_drop_das_us: u32,
    pub soft_drop_arr_us: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            das_us: DEFAULT_DAS_US,
            arr_us: DEFAULT_ARR_US,
            soft_drop_das_us: SOFT_DROP_DAS_US,
            soft_drop_arr_us: SOFT_DROP_ARR_US,
        }
    }
}

impl TimingConfig {
    /// Both repeat intervals must be non-zero, otherwise a held key would repeat forever.
    pub fn is_valid(&self) -> bool {
        self.arr_us > 0 && self.soft_drop_arr_us > 0
    }
}

/// Convert a frame delta in seconds to whole microseconds.
///
/// Negative, NaN and zero deltas count as no elapsed time.
pub fn secs_to_micros(secs: f32) -> u32 {
    if !(secs > 0.0) {
        return 0;
    }
    let micros = (secs as f64 * 1_000_000.0).round();
    if micros >= u32::MAX as f64 {
        u32::MAX
    } else {
        micros as u32
    }
}

/// Pure auto-repeat step.
///
/// Given the accumulated hold time, returns how many repeats fire and the
/// accumulator left over. Nothing fires before `das_us`; after that one repeat
/// fires for every `arr_us` the accumulator holds beyond `das_us + arr_us`.
///
/// ```
/// use tetris_sim_input::handler::autorepeat;
///
/// assert_eq!(autorepeat(149_999, 150_000, 50_000), (0, 149_999));
/// assert_eq!(autorepeat(200_000, 150_000, 50_000), (1, 150_000));
/// assert_eq!(autorepeat(300_000, 150_000, 50_000), (3, 150_000));
/// ```
pub fn autorepeat(held_us: u32, das_us: u32, arr_us: u32) -> (u32, u32) {
    if arr_us == 0 || held_us < das_us {
        return (0, held_us);
    }
    let threshold = das_us.saturating_add(arr_us);
    if held_us < threshold {
        return (0, held_us);
    }
    let repeats = (held_us - threshold) / arr_us + 1;
    (repeats, held_us - repeats * arr_us)
}

/// Hold-duration accumulator for one auto-repeating action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct RepeatTrack {
    engaged: bool,
    held_us: u32,
}

impl RepeatTrack {
    fn release(&mut self) {
        *self = Self::default();
    }

    /// Advance while held; returns the number of commands to emit.
    fn advance(&mut self, elapsed_us: u32, das_us: u32, arr_us: u32) -> u32 {
        let mut count = 0;
        if !self.engaged {
            // First tick of the hold fires immediately.
            self.engaged = true;
            count += 1;
        }
        self.held_us = self.held_us.saturating_add(elapsed_us);
        let (repeats, rest) = autorepeat(self.held_us, das_us, arr_us);
        self.held_us = rest;
        count + repeats
    }
}

/// Tracks hold state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    config: TimingConfig,
    left: RepeatTrack,
    right: RepeatTrack,
    soft_drop: RepeatTrack,
    /// Set when a piece locks under a held soft drop; cleared on release.
    soft_drop_blocked: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(TimingConfig::default())
    }

    pub fn with_config(config: TimingConfig) -> Self {
        Self {
            config,
            left: RepeatTrack::default(),
            right: RepeatTrack::default(),
            soft_drop: RepeatTrack::default(),
            soft_drop_blocked: false,
        }
    }

    pub fn config(&self) -> TimingConfig {
        self.config
    }

    pub fn soft_drop_blocked(&self) -> bool {
        self.soft_drop_blocked
    }

    /// Hold time accumulated by the left and right tracks.
    pub fn horizontal_held_us(&self) -> (u32, u32) {
        (self.left.held_us, self.right.held_us)
    }

    /// Require the soft drop action to be released before it works again.
    ///
    /// Called when a piece locks while soft drop is held, so the next piece is
    /// not dragged down by a key that never came up.
    pub fn block_soft_drop(&mut self) {
        self.soft_drop_blocked = true;
        self.soft_drop.release();
    }

    /// Sample one tick of input and emit the resulting commands.
    ///
    /// Order: horizontal moves, clockwise rotation, counter-clockwise
    /// rotation, hard drop, soft drops.
    pub fn update(&mut self, elapsed_us: u32, actions: &ActionState) -> Commands {
        let mut commands = Commands::new();

        let left = actions.is_held(LogicalAction::MoveLeft);
        let right = actions.is_held(LogicalAction::MoveRight);
        if left && right {
            self.left.release();
            self.right.release();
        } else {
            let TimingConfig { das_us, arr_us, .. } = self.config;
            if left {
                let n = self.left.advance(elapsed_us, das_us, arr_us);
                push_n(&mut commands, GameCommand::MoveLeft, n);
            } else {
                self.left.release();
            }
            if right {
                let n = self.right.advance(elapsed_us, das_us, arr_us);
                push_n(&mut commands, GameCommand::MoveRight, n);
            } else {
                self.right.release();
            }
        }

        if actions.was_pressed(LogicalAction::RotateCw) {
            let _ = commands.try_push(GameCommand::RotateCw);
        }
        if actions.was_pressed(LogicalAction::RotateCcw) {
            let _ = commands.try_push(GameCommand::RotateCcw);
        }
        if actions.was_pressed(LogicalAction::HardDrop) {
            let _ = commands.try_push(GameCommand::HardDrop);
        }

        if !actions.is_held(LogicalAction::SoftDrop) {
            self.soft_drop_blocked = false;
            self.soft_drop.release();
        } else if !self.soft_drop_blocked {
            let n = self.soft_drop.advance(
                elapsed_us,
                self.config.soft_drop_das_us,
                self.config.soft_drop_arr_us,
            );
            push_n(&mut commands, GameCommand::SoftDrop, n);
        }

        commands
    }

    pub fn reset(&mut self) {
        self.left.release();
        self.right.release();
        self.soft_drop.release();
        self.soft_drop_blocked = false;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn push_n(commands: &mut Commands, command: GameCommand, n: u32) {
    for _ in 0..n {
        if commands.try_push(command).is_err() {
            break;
        }
    }
}
