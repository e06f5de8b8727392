//! Line clear engine - the timed reveal between detection and compaction
//!
//! When a lock completes rows, gameplay freezes for [`LINE_CLEAR_DELAY_TICKS`]
//! while the rows blink. The blink flag toggles every
//! [`LINE_CLEAR_BLINK_PERIOD`] ticks and is only a rendering hint. When the
//! countdown runs out the captured rows are handed back for compaction.

use crate::board::FullRows;
use crate::types::{LINE_CLEAR_BLINK_PERIOD, LINE_CLEAR_DELAY_TICKS};

/// Rows waiting to be removed and the reveal counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClearState {
    rows: FullRows,
    countdown: u32,
    blink_on: bool,
    blink_counter: u32,
}

impl LineClearState {
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn blink_on(&self) -> bool {
        self.blink_on
    }
}

/// `Idle -> Freezing -> Idle`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LineClearPhase {
    #[default]
    Idle,
    Freezing(LineClearState),
}

impl LineClearPhase {
    /// Start the reveal for `rows`. An empty set leaves the phase idle.
    pub fn begin(&mut self, rows: FullRows) {
        if rows.is_empty() {
            *self = LineClearPhase::Idle;
            return;
        }
        *self = LineClearPhase::Freezing(LineClearState {
            rows,
            countdown: LINE_CLEAR_DELAY_TICKS,
            blink_on: false,
            blink_counter: 0,
        });
    }

    pub fn is_freezing(&self) -> bool {
        matches!(self, LineClearPhase::Freezing(_))
    }

    pub fn state(&self) -> Option<&LineClearState> {
        match self {
            LineClearPhase::Idle => None,
            LineClearPhase::Freezing(state) => Some(state),
        }
    }

    /// Rows pending removal (empty when idle)
    pub fn pending_rows(&self) -> &[usize] {
        self.state().map(LineClearState::rows).unwrap_or(&[])
    }

    pub fn blink_on(&self) -> bool {
        self.state().is_some_and(LineClearState::blink_on)
    }

    /// Advance one tick.
    ///
    /// Returns the captured rows on the tick the countdown reaches zero, at
    /// which point the phase is idle again.
    pub fn tick(&mut self) -> Option<FullRows> {
        let LineClearPhase::Freezing(state) = self else {
            return None;
        };

        state.blink_counter += 1;
        if state.blink_counter >= LINE_CLEAR_BLINK_PERIOD {
            state.blink_counter = 0;
            state.blink_on = !state.blink_on;
        }

        state.countdown = state.countdown.saturating_sub(1);
        if state.countdown > 0 {
            return None;
        }

        match std::mem::take(self) {
            LineClearPhase::Freezing(done) => Some(done.rows),
            LineClearPhase::Idle => None,
        }
    }

    pub fn reset(&mut self) {
        *self = LineClearPhase::Idle;
    }
}
