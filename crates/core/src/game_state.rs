//! Game state module - one simulation session
//!
//! Ties the board, randomizer, line clear engine, scoring and input timing
//! together behind a single per-frame entry point, [`GameState::tick`].
//!
//! Piece lifecycle: `NoPiece -> Active -> NoPiece`, with `GameOver` reached
//! only when a spawn is blocked. While rows are being cleared, or while the
//! spawn delay runs, input and gravity are suppressed.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::board::Board;
use crate::config::SessionConfig;
use crate::input::{secs_to_micros, InputHandler};
use crate::line_clear::LineClearPhase;
use crate::pieces::cells_at;
use crate::rng::PieceRandomizer;
use crate::rotation;
use crate::scoring::ScoreState;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{
    ActionState, GameCommand, GameEvent, LogicalAction, PieceKind, Rotation, GRAVITY_THRESHOLD,
    MAX_START_LEVEL, MIN_START_LEVEL, PAUSE_COOLDOWN_TICKS, SPAWN_DELAY_TICKS, SPAWN_X, SPAWN_Y,
};

/// Pending notifications kept between [`GameState::take_events`] calls;
/// the oldest is dropped once full.
pub const MAX_PENDING_EVENTS: usize = 8;

pub type Events = ArrayVec<GameEvent, MAX_PENDING_EVENTS>;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Board cells covered by this piece
    pub fn cells(&self) -> [(i8, i8); 4] {
        cells_at(self.kind, self.rotation, self.x, self.y)
    }

    pub fn fits(&self, board: &Board) -> bool {
        board.can_place(self.kind, self.rotation, self.x, self.y)
    }

    fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

/// Where the session is in the piece lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiecePhase {
    /// Waiting for the next spawn; the delay counts down in ticks
    NoPiece { spawn_delay: u32 },
    Active(Tetromino),
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    phase: PiecePhase,
    next: PieceKind,
    randomizer: PieceRandomizer,
    line_clear: LineClearPhase,
    score: ScoreState,
    input: InputHandler,
    gravity_counter: u32,
    paused: bool,
    pause_cooldown: u32,
    started: bool,
    events: Events,
}

impl GameState {
    /// Create a session with default timing and the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_config(&SessionConfig {
            seed,
            ..SessionConfig::default()
        })
    }

    /// Create a session from a full configuration.
    ///
    /// Nothing happens until [`GameState::start_new_game`] is called.
    pub fn with_config(config: &SessionConfig) -> Self {
        let mut randomizer = PieceRandomizer::new(config.seed);
        let next = randomizer.draw();

        Self {
            board: Board::new(),
            phase: PiecePhase::NoPiece { spawn_delay: 0 },
            next,
            randomizer,
            line_clear: LineClearPhase::Idle,
            score: ScoreState::new(clamp_level(config.starting_level)),
            input: InputHandler::with_config(config.timing),
            gravity_counter: 0,
            paused: false,
            pause_cooldown: 0,
            started: false,
            events: Events::new(),
        }
    }

    /// Reset everything except the randomizer and spawn the first piece.
    ///
    /// The starting level is clamped into `MIN_START_LEVEL..=MAX_START_LEVEL`.
    pub fn start_new_game(&mut self, starting_level: u32) {
        let level = clamp_level(starting_level);

        self.board.clear();
        self.line_clear.reset();
        self.score = ScoreState::new(level);
        self.input.reset();
        self.gravity_counter = 0;
        self.paused = false;
        self.pause_cooldown = 0;
        self.events.clear();
        self.started = true;

        info!(level, seed = self.randomizer.seed(), "new game");
        self.spawn_piece();
    }

    /// Start over at the same starting level; the piece sequence continues.
    pub fn restart(&mut self) {
        self.start_new_game(self.score.starting_level());
    }

    pub fn pause(&mut self) {
        if !self.started || self.is_game_over() || self.paused {
            return;
        }
        self.paused = true;
        debug!("paused");
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            debug!("resumed");
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == PiecePhase::GameOver
    }

    /// Score to offer for the leaderboard, available once the game is over
    pub fn final_score(&self) -> Option<u32> {
        self.is_game_over().then_some(self.score.score())
    }

    pub fn phase(&self) -> PiecePhase {
        self.phase
    }

    pub fn active(&self) -> Option<Tetromino> {
        match self.phase {
            PiecePhase::Active(piece) => Some(piece),
            _ => None,
        }
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn line_clear(&self) -> &LineClearPhase {
        &self.line_clear
    }

    pub fn is_freezing(&self) -> bool {
        self.line_clear.is_freezing()
    }

    pub fn score_state(&self) -> &ScoreState {
        &self.score
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn level(&self) -> u32 {
        self.score.level()
    }

    pub fn lines(&self) -> u32 {
        self.score.lines()
    }

    pub fn scroll_speed(&self) -> u32 {
        self.score.scroll_speed()
    }

    pub fn gravity_counter(&self) -> u32 {
        self.gravity_counter
    }

    pub fn input(&self) -> &InputHandler {
        &self.input
    }

    /// Notifications not yet taken
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take and clear pending notifications.
    pub fn take_events(&mut self) -> Events {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        out.active = self.active().map(ActiveSnapshot::from);
        out.next = self.next;
        out.clearing_rows.clear();
        // Never more than four pending rows, same capacity on both sides.
        let _ = out
            .clearing_rows
            .try_extend_from_slice(self.line_clear.pending_rows());
        out.blink_on = self.line_clear.blink_on();
        out.score = self.score.score();
        out.lines = self.score.lines();
        out.level = self.score.level();
        out.combo = self.score.combo();
        out.back_to_back = self.score.back_to_back();
        out.scroll_speed = self.score.scroll_speed();
        out.paused = self.paused;
        out.game_over = self.is_game_over();
        out.danger_zone = self.board.is_danger_zone();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the simulation by one frame.
    ///
    /// `dt_secs` is the real time since the previous frame and only feeds the
    /// auto-repeat timers; every other counter moves once per call.
    pub fn tick(&mut self, dt_secs: f32, actions: &ActionState) {
        if !self.started {
            return;
        }

        if self.pause_cooldown > 0 {
            self.pause_cooldown -= 1;
        }
        if actions.was_pressed(LogicalAction::Pause)
            && self.pause_cooldown == 0
            && !self.is_game_over()
        {
            if self.paused {
                self.resume();
            } else {
                self.pause();
            }
            self.pause_cooldown = PAUSE_COOLDOWN_TICKS;
        }
        if self.paused {
            return;
        }

        if self.line_clear.is_freezing() {
            if let Some(rows) = self.line_clear.tick() {
                self.finish_line_clear(&rows);
            }
            return;
        }

        match self.phase {
            PiecePhase::GameOver => return,
            PiecePhase::NoPiece { spawn_delay } if spawn_delay > 0 => {
                self.phase = PiecePhase::NoPiece {
                    spawn_delay: spawn_delay - 1,
                };
                return;
            }
            // The delay has run out: the new piece takes input this tick.
            PiecePhase::NoPiece { .. } => {
                if !self.spawn_piece() {
                    return;
                }
            }
            PiecePhase::Active(_) => {}
        }

        let commands = self.input.update(secs_to_micros(dt_secs), actions);
        for command in commands {
            self.apply_command(command);
            // A lock ends this tick's gameplay.
            if self.active().is_none() {
                break;
            }
        }

        if self.active().is_some() {
            self.apply_gravity();
        }

        if self.active().is_none() && actions.is_held(LogicalAction::SoftDrop) {
            self.input.block_soft_drop();
        }
    }

    /// Apply one discrete command to the active piece.
    ///
    /// Returns whether anything changed. Blocked moves and rotations are
    /// no-ops; a blocked downward move locks the piece.
    pub fn apply_command(&mut self, command: GameCommand) -> bool {
        if self.active().is_none() {
            return false;
        }
        match command {
            GameCommand::MoveLeft => self.try_move(-1, 0),
            GameCommand::MoveRight => self.try_move(1, 0),
            GameCommand::SoftDrop => {
                let moved = self.try_move(0, 1);
                if moved {
                    self.score.add_drop_points(1, false);
                }
                // A failed step locked the piece, which is also a change.
                true
            }
            GameCommand::HardDrop => {
                self.hard_drop();
                true
            }
            GameCommand::RotateCw => self.try_rotate(true),
            GameCommand::RotateCcw => self.try_rotate(false),
        }
    }

    /// Spawn the queued piece and draw a new one.
    ///
    /// Returns false (and ends the game) if the spawn pose is blocked.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.next;
        self.next = self.randomizer.draw();

        let piece = Tetromino::new(kind);
        if !piece.fits(&self.board) {
            self.phase = PiecePhase::GameOver;
            let final_score = self.score.score();
            self.push_event(GameEvent::GameOver { final_score });
            info!(
                final_score,
                lines = self.score.lines(),
                level = self.score.level(),
                "game over"
            );
            return false;
        }

        self.phase = PiecePhase::Active(piece);
        debug!(kind = ?kind, next = ?self.next, "piece spawned");
        true
    }

    /// Shift the active piece; a blocked downward step locks it.
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active() else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if moved.fits(&self.board) {
            self.phase = PiecePhase::Active(moved);
            return true;
        }

        if dy == 1 {
            self.lock_piece();
        }
        false
    }

    fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active() else {
            return false;
        };

        let board = &self.board;
        let result = rotation::try_rotate(active.rotation, active.x, clockwise, |rot, x| {
            board.can_place(active.kind, rot, x, active.y)
        });

        match result {
            Some(r) => {
                self.phase = PiecePhase::Active(Tetromino {
                    rotation: r.rotation,
                    x: active.x + r.kick,
                    ..active
                });
                true
            }
            None => false,
        }
    }

    /// Drop to the lowest fitting row, award the distance and lock.
    fn hard_drop(&mut self) -> u32 {
        let Some(mut piece) = self.active() else {
            return 0;
        };

        let mut distance = 0;
        while piece.shifted(0, 1).fits(&self.board) {
            piece = piece.shifted(0, 1);
            distance += 1;
        }

        self.phase = PiecePhase::Active(piece);
        let points = self.score.add_drop_points(distance, true);
        self.lock_piece();
        points
    }

    fn apply_gravity(&mut self) {
        self.gravity_counter += self.score.scroll_speed();
        if self.gravity_counter >= GRAVITY_THRESHOLD {
            self.gravity_counter = 0;
            self.try_move(0, 1);
        }
    }

    /// Merge the active piece into the board and hand off to line clearing.
    fn lock_piece(&mut self) {
        let PiecePhase::Active(piece) = self.phase else {
            return;
        };

        self.board
            .lock_piece(piece.kind, piece.rotation, piece.x, piece.y);
        self.phase = PiecePhase::NoPiece {
            spawn_delay: SPAWN_DELAY_TICKS,
        };
        debug!(
            kind = ?piece.kind,
            rotation = ?piece.rotation,
            x = piece.x,
            y = piece.y,
            "piece locked"
        );

        let rows = self.board.find_full_rows();
        if rows.is_empty() {
            // Still scored so the combo chain breaks.
            self.score.apply_clear(0);
            self.gravity_counter = 0;
            return;
        }

        let count = rows.len();
        self.push_event(if count == 4 {
            GameEvent::TetrisCleared
        } else {
            GameEvent::LineCleared { count: count as u8 }
        });
        debug!(rows = ?rows.as_slice(), "line clear started");
        self.line_clear.begin(rows);
    }

    fn finish_line_clear(&mut self, rows: &[usize]) {
        self.board.compact(rows);
        let result = self.score.apply_clear(rows.len());
        self.gravity_counter = 0;
        self.phase = PiecePhase::NoPiece {
            spawn_delay: SPAWN_DELAY_TICKS,
        };

        debug!(
            lines = rows.len(),
            award = result.total,
            combo = self.score.combo(),
            back_to_back = self.score.back_to_back(),
            level = self.score.level(),
            speed = self.score.scroll_speed(),
            "rows cleared"
        );
    }

    fn push_event(&mut self, event: GameEvent) {
        // Undrained queue: drop the oldest so GameOver always gets through.
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

fn clamp_level(level: u32) -> u32 {
    level.clamp(MIN_START_LEVEL, MAX_START_LEVEL)
}
