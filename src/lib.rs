//! Castle Drop: a terminal falling-block game.
//!
//! The crate splits into a pure engine (`core`) and thin collaborators around
//! it: `term` renders snapshots, `input` maps keys to commands, and `scores`
//! persists the high-score list.

pub mod core;
pub mod input;
pub mod scores;
pub mod term;
pub mod types;
