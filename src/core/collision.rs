//! Collision engine - pure placement legality checks
//!
//! The single rule source for movement, rotation, and spawn legality.

use crate::core::board::Board;
use crate::core::catalog::Shape;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Whether `shape` may sit at offset (x, y) on `board`.
///
/// Every occupied cell must land inside the side walls and above the floor,
/// on an unoccupied board cell. The top edge is deliberately unchecked:
/// cells above row 0 are legal while a piece sits near the top.
/// Pure and total; defined for any shape/offset combination.
pub fn can_place(board: &Board, shape: &Shape, x: i8, y: i8) -> bool {
    shape.filled_cells().all(|(r, c)| {
        let px = x + c as i8;
        let py = y + r as i8;

        if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
            return false;
        }
        // Above the top row there is nothing to collide with.
        py < 0 || !board.is_occupied(px, py)
    })
}
