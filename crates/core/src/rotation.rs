//! Rotation system - in-place rotation with horizontal wall kicks
//!
//! A rotation first tries the target orientation at the current anchor. If
//! that is blocked, the horizontal kicks are tried in order at the target
//! orientation and the first fit wins. Kicks never move the piece vertically.
//! When nothing fits the rotation is a no-op.

use crate::types::Rotation;

/// Horizontal kick offsets, in trial order
pub const KICK_OFFSETS: [i8; 4] = [-1, 1, -2, 2];

/// Result of a successful rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationResult {
    pub rotation: Rotation,
    /// Horizontal offset applied to the anchor (0 when no kick was needed)
    pub kick: i8,
}

/// Resolve a rotation attempt.
///
/// `fits(rotation, x)` reports whether the piece fits at that orientation with
/// its anchor at column `x` (row unchanged). Returns `None` if every candidate
/// is blocked. Candidates after the first fit are never probed.
pub fn try_rotate(
    rotation: Rotation,
    x: i8,
    clockwise: bool,
    mut fits: impl FnMut(Rotation, i8) -> bool,
) -> Option<RotationResult> {
    let target = if clockwise {
        rotation.rotate_cw()
    } else {
        rotation.rotate_ccw()
    };

    std::iter::once(0)
        .chain(KICK_OFFSETS)
        .find(|&kick| fits(target, x + kick))
        .map(|kick| RotationResult {
            rotation: target,
            kick,
        })
}
