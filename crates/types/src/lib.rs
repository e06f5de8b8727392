//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the simulation, the input timing model, and any rendering or audio
//! collaborator alike.
//!
//! # Board Dimensions
//!
//! The playfield is a 12x21 grid that includes its own border:
//!
//! - **Columns**: 12 (column 0 and column 11 are permanent walls)
//! - **Rows**: 21 (row 20 is the permanent floor)
//! - **Interior**: columns 1..=10, rows 0..=19
//! - **Spawn anchor**: (5, 0), rotation 0
//!
//! # Timing Constants
//!
//! The simulation advances once per frame at 60 Hz. Gameplay delays are
//! counted in ticks, input repeat timing in microseconds of real time:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRAVITY_THRESHOLD` | 60 | Frame counter value that triggers one gravity step |
//! | `SPAWN_DELAY_TICKS` | 15 | Idle ticks between a lock and the next spawn |
//! | `LINE_CLEAR_DELAY_TICKS` | 20 | Freeze length of the line-clear reveal |
//! | `LINE_CLEAR_BLINK_PERIOD` | 6 | Ticks between blink toggles |
//! | `PAUSE_COOLDOWN_TICKS` | 10 | Minimum ticks between pause toggles |
//! | `DEFAULT_DAS_US` | 150000 | Horizontal delayed auto shift |
//! | `DEFAULT_ARR_US` | 50000 | Horizontal auto repeat interval |
//! | `SOFT_DROP_DAS_US` | 0 | Soft drop delayed auto shift |
//! | `SOFT_DROP_ARR_US` | 30000 | Soft drop repeat interval |
//!
//! # Examples
//!
//! ```
//! use tetris_sim_types::{PieceKind, Rotation, LogicalAction, BOARD_COLS, BOARD_ROWS};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(LogicalAction::from_str("hardDrop"), Some(LogicalAction::HardDrop));
//!
//! assert_eq!(BOARD_COLS, 12);
//! assert_eq!(BOARD_ROWS, 21);
//! ```

/// Board width in cells, walls included (12 columns)
pub const BOARD_COLS: u8 = 12;

/// Board height in cells, floor included (21 rows)
pub const BOARD_ROWS: u8 = 21;

/// Leftmost playable column
pub const FIRST_INTERIOR_COL: i8 = 1;

/// Rightmost playable column
pub const LAST_INTERIOR_COL: i8 = BOARD_COLS as i8 - 2;

/// Lowest playable row (the row above the floor)
pub const LAST_INTERIOR_ROW: i8 = BOARD_ROWS as i8 - 2;

/// Number of playable cells in one row
pub const INTERIOR_WIDTH: usize = BOARD_COLS as usize - 2;

/// Spawn anchor column: the center of the interior
pub const SPAWN_X: i8 = (BOARD_COLS as i8 - 2) / 2;

/// Spawn anchor row
pub const SPAWN_Y: i8 = 0;

/// Rows `0..DANGER_ZONE_ROWS` form the danger zone used to switch music tracks
pub const DANGER_ZONE_ROWS: u8 = 7;

/// Target simulation rate
pub const TICK_RATE_HZ: u32 = 60;

/// The gravity frame counter triggers one row of fall when it reaches this value
pub const GRAVITY_THRESHOLD: u32 = 60;

/// Idle ticks between a lock (or a finished clear) and the next spawn
pub const SPAWN_DELAY_TICKS: u32 = 15;

/// Ticks the board stays frozen while full rows blink
pub const LINE_CLEAR_DELAY_TICKS: u32 = 20;

/// Blink flag toggles every this many frozen ticks
pub const LINE_CLEAR_BLINK_PERIOD: u32 = 6;

/// Minimum ticks between two pause toggles
pub const PAUSE_COOLDOWN_TICKS: u32 = 10;

/// DAS (Delayed Auto Shift) in microseconds
pub const DEFAULT_DAS_US: u32 = 150_000;

/// ARR (Auto Repeat Rate) in microseconds
pub const DEFAULT_ARR_US: u32 = 50_000;

/// Soft drop DAS in microseconds
pub const SOFT_DROP_DAS_US: u32 = 0;

/// Soft drop ARR in microseconds
pub const SOFT_DROP_ARR_US: u32 = 30_000;

/// Lowest accepted starting level
pub const MIN_START_LEVEL: u32 = 1;

/// Highest accepted starting level (the first level at maximum speed)
pub const MAX_START_LEVEL: u32 = 29;

/// Gravity speed ceiling: one row per tick
pub const MAX_SCROLL_SPEED: u32 = 60;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear base points, multiplied by the level
///
/// - 0 lines: 0
/// - 1 line: 100
/// - 2 lines: 300
/// - 3 lines: 500
/// - 4 lines: 800 (Tetris)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Combo bonus per combo step, multiplied by the level
pub const COMBO_BASE: u32 = 50;

/// Points per cell of soft drop, multiplied by the level
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell of hard drop, multiplied by the level
pub const HARD_DROP_POINTS: u32 = 2;


/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Position of this kind in the shape catalog
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_sim_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Rotation states, indexed 0..=3 in clockwise order
///
/// The cycle goes: North → East → South → West → North.
/// North is the spawn orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_sim_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_sim_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotation state index (0 = North ... 3 = West)
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from a rotation index, wrapping modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// State of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    /// Part of a locked piece
    Placed,
    /// Permanent border
    Wall,
}

impl CellState {
    /// Whether a piece cell may not overlap this cell
    pub fn is_solid(&self) -> bool {
        !matches!(self, CellState::Empty)
    }
}

/// Logical player actions, already resolved from raw devices by a binding layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
    Pause,
}

impl LogicalAction {
    pub const COUNT: usize = 7;

    pub const ALL: [LogicalAction; Self::COUNT] = [
        LogicalAction::MoveLeft,
        LogicalAction::MoveRight,
        LogicalAction::SoftDrop,
        LogicalAction::HardDrop,
        LogicalAction::RotateCw,
        LogicalAction::RotateCcw,
        LogicalAction::Pause,
    ];

    /// Dense index in `0..COUNT`
    pub fn index(&self) -> usize {
        match self {
            LogicalAction::MoveLeft => 0,
            LogicalAction::MoveRight => 1,
            LogicalAction::SoftDrop => 2,
            LogicalAction::HardDrop => 3,
            LogicalAction::RotateCw => 4,
            LogicalAction::RotateCcw => 5,
            LogicalAction::Pause => 6,
        }
    }

    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_sim_types::LogicalAction;
    ///
    /// assert_eq!(LogicalAction::from_str("moveLeft"), Some(LogicalAction::MoveLeft));
    /// assert_eq!(LogicalAction::from_str("rotateccw"), Some(LogicalAction::RotateCcw));
    /// assert_eq!(LogicalAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(LogicalAction::MoveLeft),
            "moveright" => Some(LogicalAction::MoveRight),
            "softdrop" => Some(LogicalAction::SoftDrop),
            "harddrop" => Some(LogicalAction::HardDrop),
            "rotatecw" => Some(LogicalAction::RotateCw),
            "rotateccw" => Some(LogicalAction::RotateCcw),
            "pause" => Some(LogicalAction::Pause),
            _ => None,
        }
    }

    /// Convert to camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalAction::MoveLeft => "moveLeft",
            LogicalAction::MoveRight => "moveRight",
            LogicalAction::SoftDrop => "softDrop",
            LogicalAction::HardDrop => "hardDrop",
            LogicalAction::RotateCw => "rotateCw",
            LogicalAction::RotateCcw => "rotateCcw",
            LogicalAction::Pause => "pause",
        }
    }
}

/// Per-tick view of the logical actions: which are held, which went down this tick
///
/// Produced by the binding resolver once per frame and handed to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionState {
    held: [bool; LogicalAction::COUNT],
    pressed: [bool; LogicalAction::COUNT],
}

impl ActionState {
    /// No action held or pressed
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, action: LogicalAction) -> bool {
        self.held[action.index()]
    }

    pub fn was_pressed(&self, action: LogicalAction) -> bool {
        self.pressed[action.index()]
    }

    pub fn set_held(&mut self, action: LogicalAction, held: bool) {
        self.held[action.index()] = held;
    }

    pub fn set_pressed(&mut self, action: LogicalAction, pressed: bool) {
        self.pressed[action.index()] = pressed;
    }

    /// Mark an action as held and newly pressed (a fresh key-down)
    pub fn press(&mut self, action: LogicalAction) {
        self.set_held(action, true);
        self.set_pressed(action, true);
    }

    /// Builder form of [`ActionState::set_held`]
    pub fn with_held(mut self, action: LogicalAction) -> Self {
        self.set_held(action, true);
        self
    }

    /// Builder form of [`ActionState::press`]
    pub fn with_pressed(mut self, action: LogicalAction) -> Self {
        self.press(action);
        self
    }

    /// Drop the press edges, keeping held state
    pub fn clear_pressed(&mut self) {
        self.pressed = [false; LogicalAction::COUNT];
    }
}

/// Discrete gameplay commands produced by the input timing model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
}

/// Fire-once notifications for the audio and persistence collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// One to three rows started their clear reveal
    LineCleared { count: u8 },
    /// Four rows started their clear reveal
    TetrisCleared,
    /// The next piece could not spawn; carries the score to offer for saving
    GameOver { final_score: u32 },
}
