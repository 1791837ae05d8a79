//! Terminal presentation layer.
//!
//! `GameView` turns engine snapshots into a `FrameBuffer`; `TerminalRenderer`
//! owns the actual terminal and flushes frames to it.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Hud, Viewport};
pub use renderer::TerminalRenderer;
