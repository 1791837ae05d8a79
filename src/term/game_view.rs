//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GamePhase, PieceFamily, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Side-panel data that lives outside the engine snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hud<'a> {
    pub high_scores: &'a [u32],
    /// Non-fatal problem to surface (e.g. a score-store failure).
    pub notice: Option<&'a str>,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    /// Render a snapshot into a framebuffer.
    pub fn render(&self, snapshot: &GameSnapshot, hud: Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + 16) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let well_bg = CellStyle::plain(Rgb::new(80, 80, 90), Rgb::new(24, 24, 32));
        let border = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', well_bg);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        // Locked cells.
        for (y, row) in snapshot.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Some(family) = cell {
                    self.draw_board_cell(&mut fb, start_x, start_y, x as u16, y as u16, *family);
                }
            }
        }

        // Active piece; cells above the top row are simply not drawn.
        for (x, y, family) in snapshot.active_cells() {
            if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                self.draw_board_cell(&mut fb, start_x, start_y, x as u16, y as u16, family);
            }
        }

        self.draw_side_panel(&mut fb, snapshot, hud, viewport, start_x, start_y, frame_w);

        match snapshot.phase {
            GamePhase::Idle => {
                self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "PRESS ENTER");
            }
            GamePhase::GameOver => {
                self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
            }
            GamePhase::Running => {}
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        family: PieceFamily,
    ) {
        let fg = match family {
            PieceFamily::Wall => Rgb::new(170, 170, 160),
            PieceFamily::Tower => Rgb::new(90, 140, 230),
            PieceFamily::Shield => Rgb::new(110, 200, 120),
            PieceFamily::Sword => Rgb::new(220, 90, 90),
        };
        let style = CellStyle::bold(fg, Rgb::new(24, 24, 32));
        let px = start_x + 1 + x * self.cell_w;
        let py = start_y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snapshot: &GameSnapshot,
        hud: Hud,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::bold(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0));
        let value = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let warn = CellStyle::plain(Rgb::new(230, 170, 80), Rgb::new(0, 0, 0));

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", snapshot.score), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format!("{}", snapshot.level), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "HIGH SCORES", label);
        y = y.saturating_add(1);
        if hud.high_scores.is_empty() {
            fb.put_str(panel_x, y, "-", value);
            y = y.saturating_add(1);
        }
        for (i, score) in hud.high_scores.iter().enumerate() {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, &format!("#{} {}", i + 1, score), value);
            y = y.saturating_add(1);
        }

        if let Some(notice) = hud.notice {
            y = y.saturating_add(1);
            if y < viewport.height {
                fb.put_str(panel_x, y, notice, warn);
            }
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::bold(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0));
        fb.put_str(x, mid_y, text, style);
    }
}
