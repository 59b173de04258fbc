//! Pieces module - tetromino matrices and rotation transforms
//!
//! Each piece is a small square matrix (side 2, 3 or 4) with the kind's
//! colour index baked into its occupied cells and 0 for transparent cells.
//! Rotation is transpose followed by a row reversal, a pure value transform
//! over the piece's own matrix copy; the shared factory layouts are never
//! mutated.

use crate::types::{PieceKind, RotationDir};

/// Maximum matrix side length (the I piece).
const MAX_SIDE: usize = 4;

/// A piece matrix in one orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    side: u8,
    cells: [[u8; MAX_SIDE]; MAX_SIDE],
}

impl Shape {
    /// Build a shape from an `N`x`N` matrix, `N` in 2..=4.
    pub fn new<const N: usize>(rows: [[u8; N]; N]) -> Self {
        assert!(N >= 2 && N <= MAX_SIDE);
        let mut cells = [[0u8; MAX_SIDE]; MAX_SIDE];
        for (y, row) in rows.iter().enumerate() {
            cells[y][..N].copy_from_slice(row);
        }
        Self {
            side: N as u8,
            cells,
        }
    }

    /// Matrix side length.
    pub fn side(&self) -> u8 {
        self.side
    }

    /// Cell value at local (x, y); 0 outside the matrix.
    pub fn cell(&self, x: u8, y: u8) -> u8 {
        if x < self.side && y < self.side {
            self.cells[y as usize][x as usize]
        } else {
            0
        }
    }

    /// Iterate the occupied cells as (local x, local y, colour index).
    pub fn occupied(&self) -> impl Iterator<Item = (i8, i8, u8)> + '_ {
        let n = self.side as usize;
        (0..n).flat_map(move |y| {
            (0..n).filter_map(move |x| {
                let value = self.cells[y][x];
                (value != 0).then_some((x as i8, y as i8, value))
            })
        })
    }

    /// Quarter-turn rotation: transpose, then reverse each row (clockwise)
    /// or reverse the row order (counter-clockwise).
    pub fn rotated(&self, dir: RotationDir) -> Self {
        let n = self.side as usize;
        let mut out = *self;
        for y in 0..n {
            for x in 0..y {
                let tmp = out.cells[y][x];
                out.cells[y][x] = out.cells[x][y];
                out.cells[x][y] = tmp;
            }
        }
        match dir {
            RotationDir::Clockwise => {
                for row in &mut out.cells[..n] {
                    row[..n].reverse();
                }
            }
            RotationDir::CounterClockwise => {
                out.cells[..n].reverse();
            }
        }
        out
    }
}

/// Canonical rotation-0 matrix for a piece kind.
pub fn create_piece(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::new([
            [0, 1, 0, 0],
            [0, 1, 0, 0],
            [0, 1, 0, 0],
            [0, 1, 0, 0],
        ]),
        PieceKind::L => Shape::new([
            [0, 2, 0],
            [0, 2, 0],
            [0, 2, 2],
        ]),
        PieceKind::J => Shape::new([
            [0, 3, 0],
            [0, 3, 0],
            [3, 3, 0],
        ]),
        PieceKind::O => Shape::new([
            [4, 4],
            [4, 4],
        ]),
        PieceKind::Z => Shape::new([
            [5, 5, 0],
            [0, 5, 5],
            [0, 0, 0],
        ]),
        PieceKind::S => Shape::new([
            [0, 6, 6],
            [6, 6, 0],
            [0, 0, 0],
        ]),
        PieceKind::T => Shape::new([
            [0, 7, 0],
            [7, 7, 7],
            [0, 0, 0],
        ]),
    }
}
