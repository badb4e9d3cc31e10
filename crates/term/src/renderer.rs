//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame, and any frame after a resize, is a full redraw. Every
//! other frame only rewrites cells that differ from the previous one. The
//! encoder remembers where the cursor is and which attributes are active,
//! so a run of adjacent changes costs one cursor move.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Print, SetAttribute},
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Undo [`enter`](Self::enter). Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// The caller gets the previous frame's buffer back to render the next
    /// frame into, so steady-state drawing never allocates.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.last.take() {
            Some(mut prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                self.flush_buf()?;
                std::mem::swap(&mut prev, fb);
                self.last = Some(prev);
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                self.flush_buf()?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                std::mem::swap(&mut prev, fb);
                self.last = Some(prev);
            }
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`. Returns the number of cells written.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<usize> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut painter = Painter::new(out);
    for y in 0..fb.height() {
        for (x, cell) in fb.row(y).iter().enumerate() {
            painter.put(x as u16, y, *cell)?;
        }
    }
    painter.finish()
}

/// Encode only the cells of `next` that differ from `prev`.
/// Returns the number of cells written.
///
/// Both frames must be the same size; use [`encode_full_into`] otherwise.
pub fn encode_diff_into(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<usize> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return encode_full_into(next, out);
    }

    let mut painter = Painter::new(out);
    for y in 0..next.height() {
        let changed = prev.row(y).iter().zip(next.row(y)).enumerate();
        for (x, (_, cell)) in changed.filter(|(_, (a, b))| a != b) {
            painter.put(x as u16, y, *cell)?;
        }
    }
    painter.finish()
}

/// Tracks terminal cursor and attributes while emitting cells.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    cursor: Option<(u16, u16)>,
    style: Option<CellStyle>,
    written: usize,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            cursor: None,
            style: None,
            written: 0,
        }
    }

    fn put(&mut self, x: u16, y: u16, cell: Cell) -> Result<()> {
        if self.cursor != Some((x, y)) {
            self.out.queue(cursor::MoveTo(x, y))?;
        }
        if self.style != Some(cell.style) {
            apply_style_into(self.out, cell.style)?;
            self.style = Some(cell.style);
        }
        self.out.queue(Print(cell.ch))?;
        // Wide glyphs are not used, so the cursor advances one column.
        self.cursor = Some((x.saturating_add(1), y));
        self.written += 1;
        Ok(())
    }

    fn finish(self) -> Result<usize> {
        if self.style.is_some() {
            self.out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(self.written)
    }
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    if style.reverse {
        out.queue(SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn full_redraw_writes_every_cell() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.put_str(0, 0, "AB", CellStyle::PLAIN);
        fb.put_str(0, 1, "CD", CellStyle::PLAIN);

        let mut out = Vec::new();
        assert_eq!(encode_full_into(&fb, &mut out).unwrap(), 4);
        assert_eq!(count(&out, b"AB"), 1);
        assert_eq!(count(&out, b"CD"), 1);
        // One move per row: (0,0) then (0,1)
        assert_eq!(count(&out, b"\x1b[1;1H"), 1);
        assert_eq!(count(&out, b"\x1b[2;1H"), 1);
    }

    #[test]
    fn unchanged_frame_encodes_nothing() {
        let mut a = FrameBuffer::new(4, 2);
        a.put_str(0, 0, "wall", CellStyle::bold());
        let b = a.clone();

        let mut out = Vec::new();
        assert_eq!(encode_diff_into(&a, &b, &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn adjacent_changes_share_one_cursor_move() {
        let a = FrameBuffer::new(5, 1);
        let mut b = FrameBuffer::new(5, 1);
        b.put_str(1, 0, "XXX", CellStyle::PLAIN);

        let mut out = Vec::new();
        assert_eq!(encode_diff_into(&a, &b, &mut out).unwrap(), 3);
        assert_eq!(count(&out, b"\x1b[1;2H"), 1);
        assert_eq!(count(&out, b"H"), 1);
        assert_eq!(count(&out, b"XXX"), 1);
    }

    #[test]
    fn style_only_change_is_redrawn() {
        let mut a = FrameBuffer::new(3, 1);
        a.put_str(0, 0, "[]", CellStyle::PLAIN);
        let mut b = a.clone();
        b.put_str(0, 0, "[]", CellStyle::bold());

        let mut out = Vec::new();
        assert_eq!(encode_diff_into(&a, &b, &mut out).unwrap(), 2);
    }

    #[test]
    fn draw_swap_hands_back_previous_frame() {
        let mut term = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(0, 0, "one", CellStyle::PLAIN);
        term.draw_swap(&mut fb).unwrap();
        // First frame had no predecessor: blank buffer of the same size
        assert_eq!(fb.row_string(0), "   ");

        fb.put_str(0, 0, "two", CellStyle::PLAIN);
        term.draw_swap(&mut fb).unwrap();
        assert_eq!(fb.row_string(0), "one");
        assert_eq!(count(&term.out, b"one"), 1);
        assert_eq!(count(&term.out, b"two"), 1);
    }
}
