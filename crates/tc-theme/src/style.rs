//! Style strings.
//!
//! ```text
//! fg[+attrs][:bg[+attrs]]
//! ```
//!
//! Colours are one of the eight names (`black` … `white`), `default` or an
//! empty string for the terminal default, a palette index `0`–`255`, or
//! `#rrggbb`. Foreground attribute letters:
//!
//! | letter | effect    |
//! |--------|-----------|
//! | `b`    | bold      |
//! | `d`    | dim       |
//! | `i`    | inverse   |
//! | `u`    | underline |
//! | `B`    | blink     |
//! | `h`    | bright    |
//!
//! The background takes `h` only. Bright moves a named colour to its high
//! intensity variant (palette index + 8).

use tc_term::buffer::FrameBuffer;
use tc_term::cell::Attr;
use tc_term::color::CellColor;

use crate::error::StyleError;

type StyleResult<T> = std::result::Result<T, StyleError>;

const NAMES: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

/// Resolved colours and attributes for one painted element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: CellColor,
    pub bg: CellColor,
    pub attrs: Attr,
}

impl Style {
    pub const PLAIN: Self = Self {
        fg: CellColor::Default,
        bg: CellColor::Default,
        attrs: Attr::empty(),
    };

    /// Paint `text` at `(x, y)` in this style. Returns the cells written.
    pub fn paint(&self, buf: &mut FrameBuffer, x: u16, y: u16, text: &str) -> u16 {
        buf.paint_text(x, y, text, self.fg, self.bg, self.attrs)
    }
}

/// Parse a single colour.
///
/// # Errors
///
/// Returns [`StyleError::UnknownColor`] for anything that is not a name,
/// an index in `0..=255`, or a six digit hex colour.
pub fn parse_color(s: &str) -> StyleResult<CellColor> {
    let s = s.trim();
    if s.is_empty() || s == "default" {
        return Ok(CellColor::Default);
    }
    if let Some(idx) = named_index(s) {
        return Ok(CellColor::Ansi256(idx));
    }
    if s.starts_with('#') {
        return CellColor::hex(s).ok_or_else(|| StyleError::UnknownColor(s.to_owned()));
    }
    s.parse::<u8>()
        .map(CellColor::Ansi256)
        .map_err(|_| StyleError::UnknownColor(s.to_owned()))
}

/// Parse a full `fg[+attrs][:bg[+attrs]]` style string.
///
/// ```
/// use tc_term::cell::Attr;
/// use tc_term::color::CellColor;
/// use tc_theme::parse_style;
///
/// let style = parse_style("white+b:blue").unwrap();
/// assert_eq!(style.fg, CellColor::WHITE);
/// assert_eq!(style.bg, CellColor::BLUE);
/// assert_eq!(style.attrs, Attr::BOLD);
/// ```
///
/// # Errors
///
/// Returns a [`StyleError`] naming the first part that does not parse.
pub fn parse_style(s: &str) -> StyleResult<Style> {
    let mut parts = s.trim().split(':');
    let fg_part = parts.next().unwrap_or_default();
    let bg_part = parts.next().unwrap_or_default();
    if parts.next().is_some() {
        return Err(StyleError::TooManyParts);
    }

    let (fg_name, fg_flags) = fg_part.split_once('+').unwrap_or((fg_part, ""));
    let (bg_name, bg_flags) = bg_part.split_once('+').unwrap_or((bg_part, ""));

    let mut attrs = Attr::empty();
    let mut fg_bright = false;
    for flag in fg_flags.chars() {
        match flag {
            'b' => attrs |= Attr::BOLD,
            'd' => attrs |= Attr::DIM,
            'i' => attrs |= Attr::INVERSE,
            'u' => attrs |= Attr::UNDERLINE,
            'B' => attrs |= Attr::BLINK,
            'h' => fg_bright = true,
            other => return Err(StyleError::UnknownAttribute(other)),
        }
    }

    let mut bg_bright = false;
    for flag in bg_flags.chars() {
        match flag {
            'h' => bg_bright = true,
            other => return Err(StyleError::BackgroundAttribute(other)),
        }
    }

    Ok(Style {
        fg: resolve(fg_name, fg_bright)?,
        bg: resolve(bg_name, bg_bright)?,
        attrs,
    })
}

fn resolve(name: &str, bright: bool) -> StyleResult<CellColor> {
    let color = parse_color(name)?;
    if !bright {
        return Ok(color);
    }
    if named_index(name.trim()).is_none() {
        return Err(StyleError::BrightNeedsName(name.trim().to_owned()));
    }
    Ok(color.bright())
}

fn named_index(s: &str) -> Option<u8> {
    #[allow(clippy::cast_possible_truncation)] // NAMES has 8 entries.
    NAMES.iter().position(|n| *n == s).map(|i| i as u8)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
