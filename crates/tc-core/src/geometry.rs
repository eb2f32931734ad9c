//! Logical ↔ screen coordinate mapping for wrapped pane lines.
//!
//! A pane is captured as **logical** lines: a command that printed 200
//! characters into an 80-column pane is one line, not three. The terminal
//! shows it wrapped, so anything painted on top of the pane needs to go
//! through the wrap:
//!
//! ```text
//!   logical                      screen (width = 4)
//!   0: "abcdefghij"              0: "abcd"
//!   1: "xy"                      1: "efgh"
//!                                2: "ij"
//!                                3: "xy"
//! ```
//!
//! Logical `(9, 0)` ('j') is screen `(1, 2)`; logical `(1, 1)` ('y') is
//! screen `(1, 3)`.
//!
//! All lengths are in chars (Unicode scalar values), never bytes. Inputs out
//! of range for the given lines are a caller error and are not checked.

use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A 0-indexed `(x, y)` coordinate: column, then row.
///
/// The same type carries both buffer (logical) and screen (wrapped)
/// coordinates; which one is meant is always stated by the function that
/// produces it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    #[inline]
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// Number of extra screen rows a logical line occupies beyond its first.
///
/// Empty lines still take one row, so they contribute zero, same as a line
/// that fits exactly.
#[inline]
#[must_use]
pub fn wrap_rows(line: &str, width: usize) -> usize {
    debug_assert!(width > 0, "viewport width must be positive");
    line.chars().count().saturating_sub(1) / width
}

/// Convert a wrapped screen coordinate into a logical buffer coordinate.
///
/// Walks the lines top-down, peeling off each line's extra wrapped rows
/// until the logical row that contains `screen.y` is found. The returned
/// `x` may exceed `width`: it is a column in the unwrapped line.
#[must_use]
pub fn to_buffer<S: AsRef<str>>(lines: &[S], width: usize, screen: Position) -> Position {
    let mut y = screen.y;

    for (row, line) in lines.iter().enumerate() {
        let extra = wrap_rows(line.as_ref(), width);

        if row + extra >= y {
            return Position::new(screen.x + (y - row) * width, row);
        }

        y -= extra;
    }

    Position::new(screen.x, y)
}

/// Convert a logical buffer coordinate into a wrapped screen coordinate.
#[must_use]
pub fn to_screen<S: AsRef<str>>(lines: &[S], width: usize, pos: Position) -> Position {
    debug_assert!(width > 0, "viewport width must be positive");

    let offset: usize = lines
        .iter()
        .take(pos.y)
        .map(|line| wrap_rows(line.as_ref(), width))
        .sum();

    Position::new(pos.x % width, pos.y + pos.x / width + offset)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
