//! Piece module - the live, falling instance of a catalog template

use crate::core::catalog::{Shape, Template};
use crate::types::{PieceFamily, BOARD_WIDTH};

/// The currently falling piece: a shape copy plus its board offset.
///
/// The piece holds no movement rules of its own; callers validate a proposed
/// offset or rotation against the board first and then commit it here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub shape: Shape,
    pub family: PieceFamily,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Spawn a new piece from a template, horizontally centered at the top.
    ///
    /// x = floor(W/2) - ceil(w/2). Centering does not guarantee legality;
    /// the caller checks the spawn position against the board.
    pub fn spawn(template: &Template) -> Self {
        let shape = template.shape();
        let half_w = (shape.width() as i8 + 1) / 2;
        Self {
            x: BOARD_WIDTH as i8 / 2 - half_w,
            y: 0,
            family: template.family(),
            shape,
        }
    }

    /// Apply an accepted movement offset
    pub fn apply_offset(&mut self, dx: i8, dy: i8) {
        self.x += dx;
        self.y += dy;
    }

    /// The shape this piece would have after a clockwise rotation.
    ///
    /// Does not mutate the piece; callers validate before committing.
    pub fn rotated(&self) -> Shape {
        self.shape.rotated()
    }

    /// Occupied cells in absolute board coordinates
    pub fn board_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled_cells()
            .map(|(r, c)| (self.x + c as i8, self.y + r as i8))
    }
}
