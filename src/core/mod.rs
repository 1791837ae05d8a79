//! Core module - pure game logic with no external dependencies
//!
//! This module contains all the game rules and state management. It has zero
//! dependencies on UI, timers, or I/O: a driver calls `Game::tick` on its own
//! clock and reads snapshots back out.

pub mod board;
pub mod catalog;
pub mod collision;
pub mod game;
pub mod piece;
pub mod rng;
pub mod snapshot;

// Re-export commonly used types
pub use board::Board;
pub use catalog::{pick_template, Shape, Template, TEMPLATES};
pub use collision::can_place;
pub use game::Game;
pub use piece::Piece;
pub use rng::SimpleRng;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
