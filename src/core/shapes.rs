//! Shape table - bit-packed tetromino masks and rotation indexing
//!
//! Each of the 7 shapes is a single 16-bit word. `I` and `O` occupy a 4x4
//! bounding box; the rest occupy a 3x3 box stored in the low bits of the same
//! word. Bit 0 is the top-left cell, increasing left-to-right then
//! top-to-bottom. Rotation is implemented by remapping probe coordinates
//! into the unrotated word, not by storing pre-rotated masks.

use crate::types::PieceKind;

/// Bit returned for probes outside a 3x3 shape's box. Every 3x3 mask fits in
/// the low 9 bits, so bit 15 is always clear and the probe reads "no block".
const OUT_OF_BOX_BIT: u32 = 15;

/// The unrotated cell mask for a shape.
pub const fn mask(kind: PieceKind) -> u16 {
    match kind {
        // 4x4 shapes.
        PieceKind::I => 0b0000_0000_1111_0000,
        PieceKind::O => 0b0000_0000_0011_0011,
        // 3x3 shapes.
        PieceKind::T => 0b0000_0000_0011_1010,
        PieceKind::J => 0b0000_0000_0011_1001,
        PieceKind::L => 0b0000_0000_0011_1100,
        PieceKind::S => 0b0000_0000_0001_1110,
        // Same word as `O`, read through the 3x3 box.
        PieceKind::Z => 0b0000_0000_0011_0011,
    }
}

/// Map a bounding-box coordinate and rotation to a bit position in the
/// shape's unrotated mask.
///
/// Rotations are 90-degree clockwise steps; any `i32` is accepted and
/// reduced mod 4 (`& 3` keeps negatives well-behaved). `O` never rotates.
/// Probes outside a 3x3 shape's box return a guaranteed-clear bit.
pub fn rotated_index(x: usize, y: usize, rotation: i32, kind: PieceKind) -> u32 {
    match kind {
        PieceKind::O => (y * 4 + x) as u32,
        PieceKind::I => match rotation & 3 {
            0 => (y * 4 + x) as u32,
            1 => (12 + y - x * 4) as u32,
            2 => (15 - y * 4 - x) as u32,
            _ => (3 - y + x * 4) as u32,
        },
        _ => {
            if x > 2 || y > 2 {
                return OUT_OF_BOX_BIT;
            }
            match rotation & 3 {
                0 => (y * 3 + x) as u32,
                1 => (6 + y - x * 3) as u32,
                2 => (8 - y * 3 - x) as u32,
                _ => (2 - y + x * 3) as u32,
            }
        }
    }
}

/// Whether the shape occupies box cell `(x, y)` at the given rotation.
pub fn occupies(kind: PieceKind, rotation: i32, x: usize, y: usize) -> bool {
    (mask(kind) >> rotated_index(x, y, rotation, kind)) & 1 == 1
}
