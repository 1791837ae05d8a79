//! Redraw snapshots handed to the rendering layer.
//!
//! A snapshot carries everything a renderer needs after any state mutation;
//! the renderer never reaches back into live game state.

use crate::core::catalog::Shape;
use crate::core::piece::Piece;
use crate::types::{Cell, GamePhase, PieceFamily, BOARD_HEIGHT, BOARD_WIDTH};

/// Copy of the active piece: family tag, shape matrix, and board offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub family: PieceFamily,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            family: piece.family,
            shape: piece.shape.clone(),
            x: piece.x,
            y: piece.y,
        }
    }
}

/// Everything needed to redraw: grid, active piece, score, level, phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub phase: GamePhase,
    pub score: u32,
    pub level: u32,
}

impl GameSnapshot {
    /// Occupied cells of the active piece in board coordinates
    pub fn active_cells(&self) -> impl Iterator<Item = (i8, i8, PieceFamily)> + '_ {
        self.active.iter().flat_map(|active| {
            active
                .shape
                .filled_cells()
                .map(move |(r, c)| (active.x + c as i8, active.y + r as i8, active.family))
        })
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            phase: GamePhase::Idle,
            score: 0,
            level: 1,
        }
    }
}
