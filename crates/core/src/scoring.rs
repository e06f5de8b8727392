//! Scoring module - line clears, combos, back-to-back, levels and speed
//!
//! Rules:
//! - Clearing `k` rows awards `LINE_SCORES[k] * level`, computed with the level
//!   reached after counting those rows.
//! - A tetris following a tetris gets half its base award again (integer
//!   division). Any 1-3 row clear breaks the back-to-back chain; a lock that
//!   clears nothing leaves it alone.
//! - The combo index starts at -1, goes up by one per clearing lock and falls
//!   back to -1 on a lock that clears nothing. Index `n > 0` adds
//!   `COMBO_BASE * n * level`.
//! - Drops award `SOFT_DROP_POINTS` / `HARD_DROP_POINTS` per cell, times level.

use crate::types::{
    COMBO_BASE, HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES, MAX_SCROLL_SPEED,
    MIN_START_LEVEL, SOFT_DROP_POINTS,
};

/// Breakdown of one [`ScoreState::apply_clear`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Base points for the clear, back-to-back bonus included.
    pub line_clear_score: u32,
    /// Combo bonus added on top of `line_clear_score`.
    pub combo_bonus: u32,
    pub total: u32,
    /// Whether the back-to-back bonus was applied to this clear.
    pub b2b_applied: bool,
    /// Whether the clear raised the level.
    pub level_up: bool,
}

/// Base award for clearing `lines` rows at `level`
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    match LINE_SCORES.get(lines) {
        Some(&points) => points.saturating_mul(level),
        None => 0,
    }
}

/// Back-to-back bonus: half the base award again
pub fn apply_b2b_bonus(points: u32) -> u32 {
    points.saturating_add(points / 2)
}

/// Combo bonus for a combo index; nothing for -1 and 0
pub fn combo_bonus(combo: i32, level: u32) -> u32 {
    if combo <= 0 {
        return 0;
    }
    COMBO_BASE
        .saturating_mul(combo as u32)
        .saturating_mul(level)
}

/// Level reached after `total_lines`, never below the starting level
pub fn level_for_lines(total_lines: u32, starting_level: u32) -> u32 {
    (1 + total_lines / LINES_PER_LEVEL).max(starting_level)
}

/// Gravity speed for a level.
///
/// Gravity accumulates this value every tick and steps the piece down once
/// the accumulator reaches 60, so speed 60 means one row per tick.
///
/// | level  | speed |
/// |--------|-------|
/// | 1-9    | level |
/// | 10-12  | 12    |
/// | 13-15  | 15    |
/// | 16-18  | 20    |
/// | 19-28  | 30    |
/// | 29+    | 60    |
pub fn scroll_speed_for_level(level: u32) -> u32 {
    match level {
        0 => 1,
        1..=9 => level,
        10..=12 => 12,
        13..=15 => 15,
        16..=18 => 20,
        19..=28 => 30,
        _ => MAX_SCROLL_SPEED,
    }
}

/// Points for `cells` rows of player-driven descent
pub fn drop_points(cells: u32, is_hard_drop: bool, level: u32) -> u32 {
    let per_cell = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    cells.saturating_mul(per_cell).saturating_mul(level)
}

/// Score, lines, level, combo and back-to-back for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreState {
    score: u32,
    lines: u32,
    level: u32,
    combo: i32,
    back_to_back: bool,
    starting_level: u32,
}

impl ScoreState {
    pub fn new(starting_level: u32) -> Self {
        let starting_level = starting_level.max(MIN_START_LEVEL);
        Self {
            score: 0,
            lines: 0,
            level: starting_level,
            combo: -1,
            back_to_back: false,
            starting_level,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// -1 when no combo is running
    pub fn combo(&self) -> i32 {
        self.combo
    }

    pub fn back_to_back(&self) -> bool {
        self.back_to_back
    }

    pub fn starting_level(&self) -> u32 {
        self.starting_level
    }

    pub fn scroll_speed(&self) -> u32 {
        scroll_speed_for_level(self.level)
    }

    /// Score the outcome of one lock that cleared `lines` rows (0 allowed).
    pub fn apply_clear(&mut self, lines: usize) -> ScoreResult {
        let previous_level = self.level;
        if lines > 0 {
            self.lines = self.lines.saturating_add(lines as u32);
            self.level = level_for_lines(self.lines, self.starting_level);
        }

        let mut line_clear_score = line_clear_points(lines, self.level);
        let mut b2b_applied = false;
        match lines {
            4 => {
                if self.back_to_back {
                    line_clear_score = apply_b2b_bonus(line_clear_score);
                    b2b_applied = true;
                }
                self.back_to_back = true;
            }
            1..=3 => self.back_to_back = false,
            _ => {}
        }

        let bonus = if lines > 0 {
            self.combo += 1;
            combo_bonus(self.combo, self.level)
        } else {
            self.combo = -1;
            0
        };

        let total = line_clear_score.saturating_add(bonus);
        self.score = self.score.saturating_add(total);

        ScoreResult {
            line_clear_score,
            combo_bonus: bonus,
            total,
            b2b_applied,
            level_up: self.level > previous_level,
        }
    }

    /// Award points for soft or hard drop distance; returns the points added.
    pub fn add_drop_points(&mut self, cells: u32, is_hard_drop: bool) -> u32 {
        let points = drop_points(cells, is_hard_drop, self.level);
        self.score = self.score.saturating_add(points);
        points
    }
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new(MIN_START_LEVEL)
    }
}
