// SPDX-License-Identifier: MIT
//
// Frame renderer.
//
// Turns a FrameBuffer into ANSI bytes. The previous frame is kept, and
// after the first render only rows that differ are redrawn: one keypress
// in the picker moves the highlight between two candidates, so a frame is
// usually a couple of rows.
//
// Within a row the writer tracks the terminal's cursor and SGR state and
// skips escapes that would not change anything. All bytes of a frame are
// collected in memory and written with a single flush.

use std::io::{self, Write};

use crate::ansi;
use crate::buffer::FrameBuffer;
use crate::cell::{Attr, Cell};
use crate::color::CellColor;

// ─── CellWriter ──────────────────────────────────────────────────────────────

/// Tracks the cursor and SGR state the terminal is in.
#[allow(clippy::struct_field_names)]
struct CellWriter {
    last_x: i32,
    last_y: i32,
    last_fg: Option<CellColor>,
    last_bg: Option<CellColor>,
    last_attrs: Attr,
}

impl CellWriter {
    const fn new() -> Self {
        Self {
            last_x: -1,
            last_y: -1,
            last_fg: None,
            last_bg: None,
            last_attrs: Attr::empty(),
        }
    }

    fn write_cell(&mut self, out: &mut Vec<u8>, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        let xi = i32::from(x);
        let yi = i32::from(y);

        // The terminal advances after each character; only jumps need CUP.
        if yi != self.last_y || xi != self.last_x + 1 {
            ansi::cursor_to(out, x, y)?;
        }

        if cell.attrs != self.last_attrs {
            if !self.last_attrs.is_empty() {
                // SGR 0 also drops the colors.
                ansi::reset(out)?;
                self.last_fg = None;
                self.last_bg = None;
            }
            ansi::attrs(out, cell.attrs)?;
            self.last_attrs = cell.attrs;
        }

        if self.last_fg != Some(cell.fg) {
            ansi::fg(out, cell.fg)?;
            self.last_fg = Some(cell.fg);
        }
        if self.last_bg != Some(cell.bg) {
            ansi::bg(out, cell.bg)?;
            self.last_bg = Some(cell.bg);
        }

        let mut enc = [0u8; 4];
        out.extend_from_slice(cell.ch.encode_utf8(&mut enc).as_bytes());

        self.last_x = xi;
        self.last_y = yi;
        Ok(())
    }
}

// ─── Renderer ────────────────────────────────────────────────────────────────

/// Row-differential frame renderer with buffered output.
///
/// ```
/// use tc_term::buffer::FrameBuffer;
/// use tc_term::render::Renderer;
///
/// let mut renderer = Renderer::new();
/// let frame = FrameBuffer::new(80, 24);
/// let rows = renderer.render(&frame);
/// assert_eq!(rows, 24);
/// assert!(!renderer.output_bytes().is_empty());
/// ```
pub struct Renderer {
    output: Vec<u8>,
    previous: Option<FrameBuffer>,
}

impl Renderer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            output: Vec::new(),
            previous: None,
        }
    }

    /// Render `current` into the output buffer and return how many rows
    /// were drawn.
    ///
    /// The first frame, and any frame whose size differs from the last,
    /// clears the screen and draws every row.
    pub fn render(&mut self, current: &FrameBuffer) -> usize {
        self.output.clear();
        let mut writer = CellWriter::new();
        let mut rows_drawn = 0;

        let full_redraw = self
            .previous
            .as_ref()
            .is_none_or(|prev| prev.width() != current.width() || prev.height() != current.height());

        // Writes into a Vec cannot fail.
        let _ = ansi::begin_sync(&mut self.output);
        if full_redraw {
            let _ = ansi::reset(&mut self.output);
            let _ = ansi::clear_screen(&mut self.output);
        }

        for y in 0..current.height() {
            let row = current.row(y);
            if !full_redraw && row == self.previous.as_ref().and_then(|p| p.row(y)) {
                continue;
            }
            for (x, cell) in row.into_iter().flatten().enumerate() {
                #[allow(clippy::cast_possible_truncation)] // x < width (u16).
                let _ = writer.write_cell(&mut self.output, x as u16, y, cell);
            }
            rows_drawn += 1;
        }

        let _ = ansi::reset(&mut self.output);
        let _ = ansi::end_sync(&mut self.output);

        self.previous = Some(current.clone());
        rows_drawn
    }

    /// Bytes produced by the last [`render`](Self::render).
    #[must_use]
    pub fn output_bytes(&self) -> &[u8] {
        &self.output
    }

    /// Forget the previous frame so the next render draws everything.
    pub fn force_redraw(&mut self) {
        self.previous = None;
    }

    /// Write the pending output to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush(&mut self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.flush_to(&mut lock)
    }

    /// Write the pending output to `w` and clear it.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.output.is_empty() {
            w.write_all(&self.output)?;
            w.flush()?;
            self.output.clear();
        }
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
