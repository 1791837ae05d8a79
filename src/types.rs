//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Maximum bounding-box edge of any shape template
pub const MAX_SHAPE_DIM: usize = 4;

/// Timing: base advance interval, per-level speedup, and the clamp floor (ms)
pub const BASE_TICK_MS: u32 = 1000;
pub const TICK_STEP_PER_LEVEL_MS: u32 = 50;
pub const MIN_TICK_MS: u32 = 50;

/// Scoring: flat points per cleared row, level-up threshold step
pub const POINTS_PER_ROW: u32 = 100;
pub const LEVEL_UP_STEP: u32 = 1000;

/// How many entries the score store keeps
pub const HIGH_SCORE_CAPACITY: usize = 10;

/// Piece families, used as occupant tags for rendering locked cells.
///
/// Several templates share a family; the tag carries no gameplay meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceFamily {
    Wall,
    Tower,
    Shield,
    Sword,
}

/// Cell on the board (None = empty, Some = locked with a family tag)
pub type Cell = Option<PieceFamily>;

/// Player commands, valid only while the game is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

/// Game lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Before the first start; no active piece.
    Idle,
    /// Active piece exists and the clock is ticking.
    Running,
    /// Terminal until the next `start()`.
    GameOver,
}

/// Outcome of a lock, published once per lock for observers to consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub rows_cleared: u32,
    pub points_awarded: u32,
    pub leveled_up: bool,
    pub game_over: bool,
}
