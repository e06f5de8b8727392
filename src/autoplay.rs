//! Scripted player for headless runs.
//!
//! Produces one [`ActionState`] per frame the way a binding resolver would.
//! When a new piece appears it picks a landing column and rotation by
//! dropping every candidate on a copy of the board and scoring the result,
//! then steers toward it with held moves and rotation presses before hard
//! dropping. A seeded RNG occasionally picks a random column instead so
//! games do not all look alike.

use crate::core::{Board, GameState, SimpleRng, Tetromino};
use crate::types::{ActionState, LogicalAction, PieceKind, Rotation, BOARD_ROWS};

/// Frames spent steering one piece before giving up and dropping it.
const MAX_STEER_FRAMES: u32 = 90;

// Heuristic weights, per cleared line / hole / unit of height / unit of bumpiness.
const LINE_WEIGHT: i32 = 760;
const HOLE_WEIGHT: i32 = 356;
const HEIGHT_WEIGHT: i32 = 51;
const BUMPINESS_WEIGHT: i32 = 18;

/// One in this many pieces goes to a random column.
const RANDOM_PLACEMENT_ODDS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub rotation: Rotation,
    pub x: i8,
}

#[derive(Debug, Clone)]
pub struct AutoPlayer {
    rng: SimpleRng,
    plan: Option<Placement>,
    current: Option<PieceKind>,
    steer_frames: u32,
}

impl AutoPlayer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed ^ 0x9E37_79B9),
            plan: None,
            current: None,
            steer_frames: 0,
        }
    }

    /// The placement being steered toward
    pub fn plan(&self) -> Option<Placement> {
        self.plan
    }

    /// Decide this frame's input.
    pub fn next_actions(&mut self, game: &GameState) -> ActionState {
        let mut actions = ActionState::new();

        let Some(piece) = game.active() else {
            self.current = None;
            self.plan = None;
            return actions;
        };

        if self.current != Some(piece.kind) || self.plan.is_none() {
            self.current = Some(piece.kind);
            self.steer_frames = 0;
            self.plan = self.choose(game.board(), piece);
        }
        self.steer_frames += 1;

        let Some(plan) = self.plan else {
            actions.press(LogicalAction::HardDrop);
            return actions;
        };

        if self.steer_frames > MAX_STEER_FRAMES {
            actions.press(LogicalAction::HardDrop);
        } else if piece.rotation != plan.rotation {
            actions.press(LogicalAction::RotateCw);
        } else if piece.x < plan.x {
            actions.set_held(LogicalAction::MoveRight, true);
        } else if piece.x > plan.x {
            actions.set_held(LogicalAction::MoveLeft, true);
        } else {
            actions.press(LogicalAction::HardDrop);
        }
        actions
    }

    fn choose(&mut self, board: &Board, piece: Tetromino) -> Option<Placement> {
        let candidates = || {
            [
                Rotation::North,
                Rotation::East,
                Rotation::South,
                Rotation::West,
            ]
            .into_iter()
            .flat_map(|rotation| (-2..=12).map(move |x| Placement { rotation, x }))
            .filter(move |p| board.can_place(piece.kind, p.rotation, p.x, piece.y))
        };

        if self.rng.next_range(RANDOM_PLACEMENT_ODDS) == 0 {
            let count = candidates().count() as u32;
            if count > 0 {
                let pick = self.rng.next_range(count) as usize;
                return candidates().nth(pick);
            }
        }

        candidates().max_by_key(|p| evaluate(board, piece.kind, *p))
    }
}

/// Score the board left after dropping `kind` at `placement`.
pub fn evaluate(board: &Board, kind: PieceKind, placement: Placement) -> i32 {
    let mut board = board.clone();
    let mut y = 0;
    while board.can_place(kind, placement.rotation, placement.x, y + 1) {
        y += 1;
    }
    board.lock_piece(kind, placement.rotation, placement.x, y);

    let rows = board.find_full_rows();
    let lines = rows.len() as i32;
    board.compact(&rows);

    let heights = column_heights(&board);
    let aggregate: i32 = heights.iter().sum();
    let bumpiness: i32 = heights.windows(2).map(|w| (w[0] - w[1]).abs()).sum();
    let holes = count_holes(&board);

    lines * LINE_WEIGHT
        - holes * HOLE_WEIGHT
        - aggregate * HEIGHT_WEIGHT
        - bumpiness * BUMPINESS_WEIGHT
}

fn column_heights(board: &Board) -> [i32; 10] {
    let floor = BOARD_ROWS as i8 - 1;
    let mut heights = [0; 10];
    for (i, height) in heights.iter_mut().enumerate() {
        let x = i as i8 + 1;
        if let Some(top) = (0..floor).find(|&y| board.is_occupied(x, y)) {
            *height = (floor - top) as i32;
        }
    }
    heights
}

fn count_holes(board: &Board) -> i32 {
    let floor = BOARD_ROWS as i8 - 1;
    let mut holes = 0;
    for x in 1..=10 {
        let mut covered = false;
        for y in 0..floor {
            if board.is_occupied(x, y) {
                covered = true;
            } else if covered {
                holes += 1;
            }
        }
    }
    holes
}
