// SPDX-License-Identifier: MIT
//
// Cell — one character position on screen.
//
// A cell holds a character, its foreground and background colors, and the
// SGR attributes it is drawn with. The picker paints a grid of these and
// the renderer turns the grid into escape sequences.

use crate::color::CellColor;

// ─── Text Attributes ─────────────────────────────────────────────────────────

bitflags::bitflags! {
    /// Text attributes, each mapping to one SGR parameter.
    ///
    /// ```
    /// use tc_term::cell::Attr;
    ///
    /// let style = Attr::BOLD | Attr::UNDERLINE;
    /// assert!(style.contains(Attr::BOLD));
    /// assert!(!style.contains(Attr::DIM));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        /// SGR 1.
        const BOLD      = 1 << 0;
        /// SGR 2.
        const DIM       = 1 << 1;
        /// SGR 4.
        const UNDERLINE = 1 << 2;
        /// SGR 5.
        const BLINK     = 1 << 3;
        /// SGR 7 — swap foreground and background.
        const INVERSE   = 1 << 4;
    }
}

// ─── Cell ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: CellColor,
    pub bg: CellColor,
    pub attrs: Attr,
}

impl Cell {
    /// Space, default colors, no attributes.
    pub const EMPTY: Self = Self {
        ch: ' ',
        fg: CellColor::Default,
        bg: CellColor::Default,
        attrs: Attr::empty(),
    };

    /// A character with default styling.
    #[inline]
    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self { ch, ..Self::EMPTY }
    }

    #[inline]
    #[must_use]
    pub const fn styled(ch: char, fg: CellColor, bg: CellColor, attrs: Attr) -> Self {
        Self { ch, fg, bg, attrs }
    }

    #[inline]
    #[must_use]
    pub const fn with_bg(self, bg: CellColor) -> Self {
        Self { bg, ..self }
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self::EMPTY
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({:?}", self.ch)?;
        if !self.fg.is_default() {
            write!(f, ", fg={:?}", self.fg)?;
        }
        if !self.bg.is_default() {
            write!(f, ", bg={:?}", self.bg)?;
        }
        if !self.attrs.is_empty() {
            write!(f, ", {:?}", self.attrs)?;
        }
        write!(f, ")")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_default() {
        assert_eq!(Cell::default(), Cell::EMPTY);
        assert_eq!(Cell::EMPTY.ch, ' ');
    }

    #[test]
    fn with_bg_keeps_the_rest() {
        let cell = Cell::styled('x', CellColor::RED, CellColor::Default, Attr::BOLD)
            .with_bg(CellColor::Ansi256(153));
        assert_eq!(
            cell,
            Cell::styled('x', CellColor::RED, CellColor::Ansi256(153), Attr::BOLD)
        );
    }

    #[test]
    fn debug_skips_defaults() {
        assert_eq!(format!("{:?}", Cell::new('q')), "Cell('q')");
        let styled = Cell::styled('q', CellColor::Ansi256(25), CellColor::Default, Attr::empty());
        assert_eq!(format!("{styled:?}"), "Cell('q', fg=ansi(25))");
    }

    #[test]
    fn attr_is_one_byte() {
        assert_eq!(std::mem::size_of::<Attr>(), 1);
    }
}
