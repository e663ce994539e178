//! Playfield - one player's grid of tiles
//!
//! A 12x18 flat array with a permanent wall ring: column 0, column 11 and
//! row 17 are `Wall` and never change, so piece/floor collisions fall out of
//! the ordinary occupancy test. Line clears are two-phase: a full row is
//! first overwritten with the transient `Cleared` marker (so the renderer
//! gets one "flash" frame) and physically removed on a later collapse pass.

use arrayvec::ArrayVec;

use crate::core::shapes;
use crate::types::{Pose, Tile, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

const FIELD_SIZE: usize = PLAYFIELD_WIDTH * PLAYFIELD_HEIGHT;

/// One player's playfield, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    cells: [Tile; FIELD_SIZE],
}

impl Playfield {
    /// A fresh field: walled ring around an empty interior.
    pub fn new() -> Self {
        let mut cells = [Tile::Empty; FIELD_SIZE];
        let mut index = 0;
        for y in 0..PLAYFIELD_HEIGHT {
            for x in 0..PLAYFIELD_WIDTH {
                if y == PLAYFIELD_HEIGHT - 1 || x == 0 || x == PLAYFIELD_WIDTH - 1 {
                    cells[index] = Tile::Wall;
                }
                index += 1;
            }
        }
        Self { cells }
    }

    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= PLAYFIELD_WIDTH as i32 || y < 0 || y >= PLAYFIELD_HEIGHT as i32 {
            return None;
        }
        Some(y as usize * PLAYFIELD_WIDTH + x as usize)
    }

    /// Tile at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        Self::index(x, y).map(|i| self.cells[i])
    }

    /// Flat row-major view of all tiles.
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Mutable cell access for crate-internal tests.
    #[cfg(test)]
    pub(crate) fn cells_mut(&mut self) -> &mut [Tile] {
        &mut self.cells
    }

    /// Copy the grid into a 2D array (for snapshots).
    pub fn write_grid(&self, out: &mut [[Tile; PLAYFIELD_WIDTH]; PLAYFIELD_HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * PLAYFIELD_WIDTH;
            row.copy_from_slice(&self.cells[start..start + PLAYFIELD_WIDTH]);
        }
    }

    /// Whether a pose sits entirely on non-occupied cells.
    ///
    /// Only set shape bits are probed, and only probes that land inside the
    /// grid can reject, so the unset corners of a 3x3 shape iterated over
    /// the full 4x4 box never cause a false rejection. The wall ring keeps
    /// set bits from ever leaving the grid sideways or downward; set bits
    /// above row 0 are tolerated by the same rule.
    pub fn fits(&self, pose: Pose) -> bool {
        for y in 0..4 {
            for x in 0..4 {
                if !shapes::occupies(pose.kind, pose.rotation, x, y) {
                    continue;
                }
                if let Some(tile) = self.get(pose.x + x as i32, pose.y + y as i32) {
                    if !tile.is_empty() {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Write a settled pose's cells into the field.
    ///
    /// No collision re-check: the caller guarantees `fits` held for this
    /// pose immediately before.
    pub fn lock(&mut self, pose: Pose) {
        for y in 0..4 {
            for x in 0..4 {
                if !shapes::occupies(pose.kind, pose.rotation, x, y) {
                    continue;
                }
                if let Some(i) = Self::index(pose.x + x as i32, pose.y + y as i32) {
                    self.cells[i] = Tile::Filled(pose.kind);
                }
            }
        }
    }

    /// Mark full rows in `[from_row, to_row)` as `Cleared` and return them.
    ///
    /// The floor row is never scanned. A row is full when every interior
    /// cell is non-empty. At most 4 rows are marked per call; the scan stops
    /// early once the cap is reached.
    pub fn mark_full_rows(&mut self, from_row: i32, to_row: i32) -> ArrayVec<usize, 4> {
        let mut marked = ArrayVec::new();
        let start = from_row.max(0) as usize;
        let end = (to_row.max(0) as usize).min(PLAYFIELD_HEIGHT - 1);

        for y in start..end {
            let row = y * PLAYFIELD_WIDTH;
            let interior = row + 1..row + PLAYFIELD_WIDTH - 1;
            if self.cells[interior.clone()].iter().any(|t| t.is_empty()) {
                continue;
            }
            for tile in &mut self.cells[interior] {
                *tile = Tile::Cleared;
            }
            marked.push(y);
            if marked.is_full() {
                break;
            }
        }
        marked
    }

    /// Physically remove rows previously marked `Cleared`.
    ///
    /// Scans top-down; for each marked row every row above it shifts down by
    /// one (interior columns only, walls untouched) and the vacated top row
    /// empties. At most 4 rows are processed per call. A no-op when nothing
    /// is marked.
    pub fn collapse_cleared_rows(&mut self) {
        let mut collapsed = 0;
        for y in 0..PLAYFIELD_HEIGHT - 1 {
            // A marked row was filled wall to wall, so checking the first
            // interior cell is enough.
            if self.cells[y * PLAYFIELD_WIDTH + 1] != Tile::Cleared {
                continue;
            }

            for row in (1..=y).rev() {
                let src = (row - 1) * PLAYFIELD_WIDTH;
                let dst = row * PLAYFIELD_WIDTH;
                self.cells.copy_within(src + 1..src + PLAYFIELD_WIDTH - 1, dst + 1);
            }
            for tile in &mut self.cells[1..PLAYFIELD_WIDTH - 1] {
                *tile = Tile::Empty;
            }

            collapsed += 1;
            if collapsed == 4 {
                break;
            }
        }
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn set(field: &mut Playfield, x: i32, y: i32, tile: Tile) {
        let i = Playfield::index(x, y).unwrap();
        field.cells[i] = tile;
    }

    fn filled_interior_rows(field: &Playfield) -> usize {
        (0..PLAYFIELD_HEIGHT - 1)
            .filter(|&y| {
                (1..PLAYFIELD_WIDTH - 1)
                    .any(|x| !field.get(x as i32, y as i32).unwrap().is_empty())
            })
            .count()
    }

    #[test]
    fn test_new_field_is_walled_ring_around_empty_interior() {
        let field = Playfield::new();
        for y in 0..PLAYFIELD_HEIGHT as i32 {
            assert_eq!(field.get(0, y), Some(Tile::Wall));
            assert_eq!(field.get(PLAYFIELD_WIDTH as i32 - 1, y), Some(Tile::Wall));
        }
        for x in 0..PLAYFIELD_WIDTH as i32 {
            assert_eq!(field.get(x, PLAYFIELD_HEIGHT as i32 - 1), Some(Tile::Wall));
        }
        for y in 0..PLAYFIELD_HEIGHT as i32 - 1 {
            for x in 1..PLAYFIELD_WIDTH as i32 - 1 {
                assert_eq!(field.get(x, y), Some(Tile::Empty));
            }
        }
    }

    #[test]
    fn test_fits_accepts_spawn_on_empty_field() {
        let field = Playfield::new();
        for kind in PieceKind::ALL {
            assert!(field.fits(Pose::spawn(kind)), "{:?}", kind);
        }
    }

    #[test]
    fn test_fits_rejects_wall_overlap() {
        let field = Playfield::new();
        // O occupies box cells (0,0)..(1,1); x = 0 puts its left column on
        // the wall.
        let pose = Pose {
            kind: PieceKind::O,
            rotation: 0,
            x: 0,
            y: 5,
        };
        assert!(!field.fits(pose));
        // Flush against the wall (x = 1) is fine.
        assert!(field.fits(pose.shifted(1, 0)));
    }

    #[test]
    fn test_fits_rejects_floor_overlap() {
        let field = Playfield::new();
        let pose = Pose {
            kind: PieceKind::O,
            rotation: 0,
            x: 5,
            y: PLAYFIELD_HEIGHT as i32 - 3,
        };
        // Bottom cells on row 16, one above the floor.
        assert!(field.fits(pose));
        assert!(!field.fits(pose.shifted(0, 1)));
    }

    #[test]
    fn test_unset_bits_outside_the_grid_do_not_reject() {
        let field = Playfield::new();
        // Vertical I occupies only box column 2; at x = -1 its cells sit in
        // board column 1 while the empty box columns hang over the wall.
        let pose = Pose {
            kind: PieceKind::I,
            rotation: 1,
            x: -1,
            y: 3,
        };
        assert!(field.fits(pose));
        assert!(!field.fits(pose.shifted(-1, 0)));
    }

    #[test]
    fn test_cleared_marker_blocks_like_an_occupied_cell() {
        let mut field = Playfield::new();
        set(&mut field, 5, 10, Tile::Cleared);
        let pose = Pose {
            kind: PieceKind::O,
            rotation: 0,
            x: 5,
            y: 9,
        };
        assert!(!field.fits(pose));
    }

    #[test]
    fn test_lock_writes_piece_kind_into_cells() {
        let mut field = Playfield::new();
        let pose = Pose {
            kind: PieceKind::T,
            rotation: 0,
            x: 4,
            y: 14,
        };
        field.lock(pose);
        // T at rotation 0: (1,0), (0,1), (1,1), (2,1).
        assert_eq!(field.get(5, 14), Some(Tile::Filled(PieceKind::T)));
        assert_eq!(field.get(4, 15), Some(Tile::Filled(PieceKind::T)));
        assert_eq!(field.get(5, 15), Some(Tile::Filled(PieceKind::T)));
        assert_eq!(field.get(6, 15), Some(Tile::Filled(PieceKind::T)));
        assert_eq!(field.get(4, 14), Some(Tile::Empty));
    }

    #[test]
    fn test_mark_full_rows_marks_only_full_interior_rows() {
        let mut field = Playfield::new();
        for x in 1..PLAYFIELD_WIDTH as i32 - 1 {
            set(&mut field, x, 16, Tile::Filled(PieceKind::I));
        }
        // Row 15 has a gap.
        for x in 2..PLAYFIELD_WIDTH as i32 - 1 {
            set(&mut field, x, 15, Tile::Filled(PieceKind::I));
        }

        let marked = field.mark_full_rows(0, PLAYFIELD_HEIGHT as i32);
        assert_eq!(marked.as_slice(), &[16]);
        for x in 1..PLAYFIELD_WIDTH as i32 - 1 {
            assert_eq!(field.get(x, 16), Some(Tile::Cleared));
        }
        assert_eq!(field.get(2, 15), Some(Tile::Filled(PieceKind::I)));
    }

    #[test]
    fn test_mark_full_rows_caps_at_four() {
        let mut field = Playfield::new();
        for y in 10..16 {
            for x in 1..PLAYFIELD_WIDTH as i32 - 1 {
                set(&mut field, x, y, Tile::Filled(PieceKind::L));
            }
        }

        let marked = field.mark_full_rows(0, PLAYFIELD_HEIGHT as i32);
        assert_eq!(marked.as_slice(), &[10, 11, 12, 13]);
        // Rows past the cap are untouched.
        assert_eq!(field.get(1, 14), Some(Tile::Filled(PieceKind::L)));
        assert_eq!(field.get(1, 15), Some(Tile::Filled(PieceKind::L)));
    }

    #[test]
    fn test_mark_full_rows_never_scans_the_floor() {
        let mut field = Playfield::new();
        // The floor row is wall-to-wall `Wall`, i.e. non-empty; it must not
        // be treated as clearable.
        let marked = field.mark_full_rows(0, PLAYFIELD_HEIGHT as i32);
        assert!(marked.is_empty());
    }

    #[test]
    fn test_collapse_removes_marked_rows_and_drops_the_stack() {
        let mut field = Playfield::new();
        // A lone landed block above two full rows.
        set(&mut field, 3, 13, Tile::Filled(PieceKind::J));
        for y in 14..16 {
            for x in 1..PLAYFIELD_WIDTH as i32 - 1 {
                set(&mut field, x, y, Tile::Filled(PieceKind::I));
            }
        }

        let marked = field.mark_full_rows(14, 18);
        assert_eq!(marked.len(), 2);
        assert_eq!(filled_interior_rows(&field), 3);

        field.collapse_cleared_rows();
        assert_eq!(filled_interior_rows(&field), 1);
        // The survivor dropped by exactly the number of cleared rows.
        assert_eq!(field.get(3, 15), Some(Tile::Filled(PieceKind::J)));
        assert_eq!(field.get(3, 13), Some(Tile::Empty));
        // Walls unchanged.
        for y in 0..PLAYFIELD_HEIGHT as i32 {
            assert_eq!(field.get(0, y), Some(Tile::Wall));
            assert_eq!(field.get(PLAYFIELD_WIDTH as i32 - 1, y), Some(Tile::Wall));
        }
    }

    #[test]
    fn test_collapse_is_idempotent_without_marks() {
        let mut field = Playfield::new();
        set(&mut field, 4, 12, Tile::Filled(PieceKind::S));
        let before = field.clone();
        field.collapse_cleared_rows();
        assert_eq!(field, before);
    }
}
