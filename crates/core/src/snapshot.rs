use crate::board::FullRows;
use crate::game_state::Tetromino;
use crate::pieces::cells_at;
use crate::types::{CellState, PieceKind, Rotation, BOARD_COLS, BOARD_ROWS};

/// Row-major copy of the board, walls included
pub type BoardGrid = [[CellState; BOARD_COLS as usize]; BOARD_ROWS as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    pub fn cells(&self) -> [(i8, i8); 4] {
        cells_at(self.kind, self.rotation, self.x, self.y)
    }
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only view of a session for rendering and audio collaborators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    /// Rows waiting to be removed, top to bottom
    pub clearing_rows: FullRows,
    pub blink_on: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub combo: i32,
    pub back_to_back: bool,
    pub scroll_speed: u32,
    pub paused: bool,
    pub game_over: bool,
    /// A placed cell sits in the top rows
    pub danger_zone: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[CellState::Empty; BOARD_COLS as usize]; BOARD_ROWS as usize];
        self.active = None;
        self.next = PieceKind::I;
        self.clearing_rows.clear();
        self.blink_on = false;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.combo = -1;
        self.back_to_back = false;
        self.scroll_speed = 1;
        self.paused = false;
        self.game_over = false;
        self.danger_zone = false;
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Whether row `y` is part of a pending clear
    pub fn is_clearing(&self, y: usize) -> bool {
        self.clearing_rows.contains(&y)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[CellState::Empty; BOARD_COLS as usize]; BOARD_ROWS as usize],
            active: None,
            next: PieceKind::I,
            clearing_rows: FullRows::new(),
            blink_on: false,
            score: 0,
            lines: 0,
            level: 1,
            combo: -1,
            back_to_back: false,
            scroll_speed: 1,
            paused: false,
            game_over: false,
            danger_zone: false,
        };
        s.clear();
        s
    }
}
