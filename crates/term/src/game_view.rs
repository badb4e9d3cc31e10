//! GameView: maps the engine's packed grid into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The board is drawn the way a monochrome panel would show it: walls are
//! solid, locked and falling squares are outlines, empty cells are blank.
//! Walls double as the board frame, so no separate border is drawn.

use crate::core::{CellRenderer, GameEngine};
use crate::fb::{CellStyle, FrameBuffer};
use crate::types::{CellValue, Mark, GRID_HEIGHT, GRID_WIDTH};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal view of the playfield.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the board in terminal cells.
    pub fn board_size(&self) -> (u16, u16) {
        (
            (GRID_WIDTH as u16) * self.cell_w,
            (GRID_HEIGHT as u16) * self.cell_h,
        )
    }

    /// Top-left corner of the board for a given viewport.
    pub fn board_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (board_w, board_h) = self.board_size();
        let x = viewport.width.saturating_sub(board_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(board_h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Render the engine into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, engine: &GameEngine, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let (origin_x, origin_y) = self.board_origin(viewport);
        engine.render(&mut BoardPainter {
            fb: &mut *fb,
            view: self,
            origin_x,
            origin_y,
        });

        self.draw_side_panel(fb, engine, viewport, origin_x, origin_y);

        if engine.is_game_over() {
            self.draw_game_over(fb, origin_x, origin_y);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, engine: &GameEngine, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(engine, viewport, &mut fb);
        fb
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, px: u16, py: u16, value: CellValue) {
        match value.mark() {
            Mark::Filled => fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', CellStyle::PLAIN),
            Mark::Outline => {
                let style = if value == CellValue::Falling {
                    CellStyle::bold()
                } else {
                    CellStyle::PLAIN
                };
                if self.cell_w == 1 {
                    fb.fill_rect(px, py, 1, self.cell_h, '□', style);
                    return;
                }
                for dy in 0..self.cell_h {
                    let y = py.saturating_add(dy);
                    fb.put_char(px, y, '[', style);
                    for dx in 1..self.cell_w - 1 {
                        fb.put_char(px.saturating_add(dx), y, ' ', style);
                    }
                    fb.put_char(px.saturating_add(self.cell_w - 1), y, ']', style);
                }
            }
            // Framebuffer was cleared to blanks already.
            Mark::Blank => {}
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        engine: &GameEngine,
        viewport: Viewport,
        origin_x: u16,
        origin_y: u16,
    ) {
        let (board_w, _) = self.board_size();
        let panel_x = origin_x.saturating_add(board_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::bold();
        let value = CellStyle::PLAIN;
        let hint = CellStyle::dim();

        let mut y = origin_y;
        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, engine.lines_cleared(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, engine.pieces_locked(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STATE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, engine.phase().as_str(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECE", label);
        y = y.saturating_add(1);
        fb.put_str(
            panel_x,
            y,
            engine.active().map_or("-", |p| p.shape.as_str()),
            value,
        );
        y = y.saturating_add(2);

        for line in ["<- -> move", "^  rotate", "v  drop", "r  restart", "q  quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, origin_x: u16, origin_y: u16) {
        let (board_w, board_h) = self.board_size();
        let mid_y = origin_y.saturating_add(board_h / 2);
        for (i, text) in ["GAME OVER", "r: restart"].iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = origin_x.saturating_add(board_w.saturating_sub(text_w) / 2);
            fb.put_str(x, mid_y.saturating_add(i as u16), text, CellStyle::reverse());
        }
    }
}

/// Adapts the framebuffer to the engine's render capability.
struct BoardPainter<'a> {
    fb: &'a mut FrameBuffer,
    view: &'a GameView,
    origin_x: u16,
    origin_y: u16,
}

impl CellRenderer for BoardPainter<'_> {
    fn draw_cell(&mut self, row: usize, col: usize, cell: CellValue) {
        let px = self.origin_x + (col as u16) * self.view.cell_w;
        let py = self.origin_y + (row as u16) * self.view.cell_h;
        self.view.draw_cell(self.fb, px, py, cell);
    }
}
