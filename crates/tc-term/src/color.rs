// SPDX-License-Identifier: MIT
//
// Cell colors.
//
// A terminal cell takes one of three kinds of color: the terminal's own
// default, an index into the 256-color palette, or a 24-bit RGB value.
// Themes are written in these terms, so there is no richer color model.

use std::fmt;

// ─── CellColor ───────────────────────────────────────────────────────────────

/// Color of a cell's foreground or background.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellColor {
    /// 24-bit `TrueColor`.
    Rgb(u8, u8, u8),

    /// ANSI 256-color palette index. 0–7 are the standard colors, 8–15
    /// their bright variants.
    Ansi256(u8),

    /// Terminal default color.
    #[default]
    Default,
}

impl CellColor {
    pub const BLACK: Self = Self::Ansi256(0);
    pub const RED: Self = Self::Ansi256(1);
    pub const GREEN: Self = Self::Ansi256(2);
    pub const YELLOW: Self = Self::Ansi256(3);
    pub const BLUE: Self = Self::Ansi256(4);
    pub const MAGENTA: Self = Self::Ansi256(5);
    pub const CYAN: Self = Self::Ansi256(6);
    pub const WHITE: Self = Self::Ansi256(7);

    #[inline]
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }

    /// The bright variant of a standard color (index 0–7 → 8–15).
    ///
    /// Every other color is returned unchanged.
    #[must_use]
    pub const fn bright(self) -> Self {
        match self {
            Self::Ansi256(idx) if idx < 8 => Self::Ansi256(idx + 8),
            other => other,
        }
    }

    /// Parse `#rrggbb` (the `#` is optional).
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        let bytes = s.as_bytes();
        if bytes.len() != 6 {
            return None;
        }
        Some(Self::Rgb(
            parse_hex_byte(&bytes[0..2])?,
            parse_hex_byte(&bytes[2..4])?,
            parse_hex_byte(&bytes[4..6])?,
        ))
    }
}

impl fmt::Debug for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Ansi256(idx) => write!(f, "ansi({idx})"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_terminal_default() {
        assert_eq!(CellColor::default(), CellColor::Default);
        assert!(CellColor::default().is_default());
        assert!(!CellColor::RED.is_default());
    }

    #[test]
    fn bright_shifts_standard_colors() {
        assert_eq!(CellColor::BLACK.bright(), CellColor::Ansi256(8));
        assert_eq!(CellColor::WHITE.bright(), CellColor::Ansi256(15));
    }

    #[test]
    fn bright_leaves_others_alone() {
        assert_eq!(CellColor::Ansi256(9).bright(), CellColor::Ansi256(9));
        assert_eq!(CellColor::Ansi256(153).bright(), CellColor::Ansi256(153));
        assert_eq!(CellColor::Rgb(1, 2, 3).bright(), CellColor::Rgb(1, 2, 3));
        assert_eq!(CellColor::Default.bright(), CellColor::Default);
    }

    #[test]
    fn hex_with_and_without_hash() {
        assert_eq!(CellColor::hex("#ff8000"), Some(CellColor::Rgb(255, 128, 0)));
        assert_eq!(CellColor::hex("FF8000"), Some(CellColor::Rgb(255, 128, 0)));
    }

    #[test]
    fn hex_rejects_bad_input() {
        assert_eq!(CellColor::hex("#fff"), None);
        assert_eq!(CellColor::hex("#gg0000"), None);
        assert_eq!(CellColor::hex(""), None);
    }

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", CellColor::Rgb(255, 0, 16)), "#ff0010");
        assert_eq!(format!("{:?}", CellColor::Ansi256(25)), "ansi(25)");
        assert_eq!(CellColor::Default.to_string(), "default");
    }
}
