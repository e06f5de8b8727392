//! Board module - manages the game grid
//!
//! The board is a 12x21 grid that carries its own border: column 0, column 11
//! and row 20 are permanently [`CellState::Wall`]. Pieces live in the interior,
//! columns 1..=10 and rows 0..=19.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x grows to the right and y grows downward.
//! Piece cells above the top (y < 0) are legal and never stored.

use arrayvec::ArrayVec;

use crate::pieces::cells_at;
use crate::types::{
    CellState, PieceKind, Rotation, BOARD_COLS, BOARD_ROWS, DANGER_ZONE_ROWS, FIRST_INTERIOR_COL,
    LAST_INTERIOR_COL,
};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_COLS as usize) * (BOARD_ROWS as usize);

const WIDTH: usize = BOARD_COLS as usize;
const HEIGHT: usize = BOARD_ROWS as usize;

/// Index of the floor row
const FLOOR_ROW: usize = HEIGHT - 1;

/// Row indices of full rows, top to bottom
pub type FullRows = ArrayVec<usize, 4>;

/// The game board - 12 columns x 21 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [CellState; BOARD_SIZE],
}

impl Board {
    /// Create an empty board surrounded by its walls
    pub fn new() -> Self {
        let mut board = Self {
            cells: [CellState::Empty; BOARD_SIZE],
        };
        board.clear();
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x as usize >= WIDTH || y < 0 || y as usize >= HEIGHT {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    fn is_border(x: usize, y: usize) -> bool {
        x == 0 || x == WIDTH - 1 || y == FLOOR_ROW
    }

    /// Get width of the board, walls included
    pub fn width(&self) -> u8 {
        BOARD_COLS
    }

    /// Get height of the board, floor included
    pub fn height(&self) -> u8 {
        BOARD_ROWS
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<CellState> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set an interior cell at position (x, y)
    ///
    /// Returns false if out of bounds or if the cell is part of the border;
    /// walls are never overwritten and never created here.
    pub fn set(&mut self, x: i8, y: i8, cell: CellState) -> bool {
        match Self::index(x, y) {
            Some(idx) if !Self::is_border(x as usize, y as usize) && cell != CellState::Wall => {
                self.cells[idx] = cell;
                true
            }
            _ => false,
        }
    }

    /// Check if position holds a locked piece cell
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(CellState::Placed))
    }

    /// Check whether a piece pose fits.
    ///
    /// Rejects any cell outside the interior columns or below the floor.
    /// Cells above the top (y < 0) are accepted without an occupancy check,
    /// which lets pieces spawn and rotate partially off the top.
    pub fn can_place(&self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> bool {
        cells_at(kind, rotation, x, y).iter().all(|&(gx, gy)| {
            if !(FIRST_INTERIOR_COL..=LAST_INTERIOR_COL).contains(&gx) {
                return false;
            }
            if gy as i16 >= HEIGHT as i16 {
                return false;
            }
            if gy < 0 {
                return true;
            }
            !matches!(self.get(gx, gy), Some(cell) if cell.is_solid())
        })
    }

    /// Write a piece into the board as placed cells.
    ///
    /// Cells above the visible top are dropped. The caller is expected to have
    /// checked the pose with [`Board::can_place`]; border cells are never
    /// overwritten regardless.
    pub fn lock_piece(&mut self, kind: PieceKind, rotation: Rotation, x: i8, y: i8) {
        for (gx, gy) in cells_at(kind, rotation, x, y) {
            if gy >= 0 {
                self.set(gx, gy, CellState::Placed);
            }
        }
    }

    /// Check if every interior cell of a row is placed
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= FLOOR_ROW {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start + 1..start + WIDTH - 1]
            .iter()
            .all(|cell| *cell == CellState::Placed)
    }

    /// Full rows, top to bottom, at most four
    pub fn find_full_rows(&self) -> FullRows {
        let mut rows = FullRows::new();
        for y in 0..FLOOR_ROW {
            if self.is_row_full(y) && rows.try_push(y).is_err() {
                break;
            }
        }
        rows
    }

    /// Remove exactly the given rows and shift everything above them down.
    ///
    /// Single pass from the bottom up: surviving rows are copied down to the
    /// write position, then the vacated top rows are emptied. Indices outside
    /// the interior are ignored.
    pub fn compact(&mut self, rows: &[usize]) {
        let mut remove = [false; HEIGHT];
        for &y in rows {
            if y < FLOOR_ROW {
                remove[y] = true;
            }
        }

        let mut write_y = FLOOR_ROW;
        for read_y in (0..FLOOR_ROW).rev() {
            if remove[read_y] {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * WIDTH + 1;
                let dst = write_y * WIDTH + 1;
                // copy_within handles overlapping ranges
                self.cells.copy_within(src..src + WIDTH - 2, dst);
            }
        }

        for y in 0..write_y {
            let start = y * WIDTH;
            for cell in &mut self.cells[start + 1..start + WIDTH - 1] {
                *cell = CellState::Empty;
            }
        }
    }

    /// Any placed cell in the top rows
    pub fn is_danger_zone(&self) -> bool {
        (0..DANGER_ZONE_ROWS as usize).any(|y| {
            let start = y * WIDTH;
            self.cells[start + 1..start + WIDTH - 1]
                .iter()
                .any(|cell| *cell == CellState::Placed)
        })
    }

    /// Number of placed cells on the board
    pub fn placed_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == CellState::Placed)
            .count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Copy the grid into a row-major 2D array
    pub fn write_grid(&self, out: &mut [[CellState; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * WIDTH;
            row.copy_from_slice(&self.cells[start..start + WIDTH]);
        }
    }

    /// Empty the interior and rebuild the border
    pub fn clear(&mut self) {
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            *cell = if Self::is_border(idx % WIDTH, idx / WIDTH) {
                CellState::Wall
            } else {
                CellState::Empty
            };
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
