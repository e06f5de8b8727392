//! Pieces module - the shape catalog
//!
//! Every (kind, rotation) pair maps to exactly four mino offsets relative to
//! the piece anchor. `dx` grows to the right, `dy` grows downward. The table
//! is immutable and shared process-wide.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to piece anchor
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece anchor
pub type PieceShape = [MinoOffset; 4];

/// Shape catalog indexed by `[kind][rotation]`
static SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(-1, 0), (0, 0), (1, 0), (2, 0)],
        [(1, -1), (1, 0), (1, 1), (1, 2)],
        [(-1, 1), (0, 1), (1, 1), (2, 1)],
        [(0, -1), (0, 0), (0, 1), (0, 2)],
    ],
    // O
    [
        [(0, 0), (1, 0), (0, 1), (1, 1)],
        [(0, 0), (1, 0), (0, 1), (1, 1)],
        [(0, 0), (1, 0), (0, 1), (1, 1)],
        [(0, 0), (1, 0), (0, 1), (1, 1)],
    ],
    // T
    [
        [(-1, 0), (0, 0), (1, 0), (0, 1)],
        [(0, -1), (0, 0), (0, 1), (1, 0)],
        [(-1, 0), (0, 0), (1, 0), (0, -1)],
        [(0, -1), (0, 0), (0, 1), (-1, 0)],
    ],
    // S
    [
        [(0, 0), (1, 0), (-1, 1), (0, 1)],
        [(0, -1), (0, 0), (1, 0), (1, 1)],
        [(0, 0), (1, 0), (-1, 1), (0, 1)],
        [(0, -1), (0, 0), (1, 0), (1, 1)],
    ],
    // Z
    [
        [(-1, 0), (0, 0), (0, 1), (1, 1)],
        [(1, -1), (0, 0), (1, 0), (0, 1)],
        [(-1, 0), (0, 0), (0, 1), (1, 1)],
        [(1, -1), (0, 0), (1, 0), (0, 1)],
    ],
    // J
    [
        [(-1, 0), (0, 0), (1, 0), (-1, 1)],
        [(0, -1), (0, 0), (0, 1), (1, 1)],
        [(-1, 0), (0, 0), (1, 0), (1, -1)],
        [(0, -1), (0, 0), (0, 1), (-1, -1)],
    ],
    // L
    [
        [(-1, 0), (0, 0), (1, 0), (1, 1)],
        [(0, -1), (0, 0), (0, 1), (1, -1)],
        [(-1, 0), (0, 0), (1, 0), (-1, -1)],
        [(0, -1), (0, 0), (0, 1), (-1, 1)],
    ],
];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> &'static PieceShape {
    &SHAPES[kind.index()][rotation.index()]
}

/// Absolute board cells covered by a piece pose
pub fn cells_at(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> [(i8, i8); 4] {
    get_shape(kind, rotation).map(|(dx, dy)| (x + dx, y + dy))
}
