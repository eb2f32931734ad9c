//! Identifier lookup — the partial token the user is completing.
//!
//! Given the cursor in buffer coordinates, the identifier is the longest
//! run of text that ends exactly at the cursor and matches the cursor
//! pattern. For a prompt `$ git checkout fea|` with the default pattern
//! `[!-~]+`, that is `fea` at column 15.

use regex::Regex;

use crate::error::{Error, PatternKind, Result};
use crate::geometry::Position;

/// A token located in the pane: where it starts and what it says.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// Start column in chars.
    pub x: usize,
    /// Logical line.
    pub y: usize,
    pub value: String,
}

impl Identifier {
    #[must_use]
    pub fn new(x: usize, y: usize, value: impl Into<String>) -> Self {
        Self {
            x,
            y,
            value: value.into(),
        }
    }

    /// Length of the value in chars.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Wrap a user pattern so it matches the shortest possible lead-in and then
/// the longest possible suffix that satisfies `pattern`, anchored at the end.
fn suffix_matcher(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^.*?({pattern})$"))
        .map_err(|e| Error::pattern(PatternKind::Cursor, pattern, e))
}

/// Find the identifier ending at `cursor` on line `cursor.y`.
///
/// Returns `Ok(None)` when nothing before the cursor matches, or when the
/// only match is empty: there is nothing to complete.
///
/// A cursor column past the end of the line (tmux trims trailing blanks
/// from captured lines) takes the whole line as the text before the cursor.
///
/// # Errors
///
/// [`Error::Pattern`] if `pattern` does not compile.
pub fn find_identifier<S: AsRef<str>>(
    pattern: &str,
    lines: &[S],
    cursor: Position,
) -> Result<Option<Identifier>> {
    let matcher = suffix_matcher(pattern)?;

    let Some(line) = lines.get(cursor.y) else {
        return Ok(None);
    };

    let before: String = line.as_ref().chars().take(cursor.x).collect();
    let before_len = before.chars().count();

    let Some(found) = matcher.captures(&before).and_then(|caps| caps.get(1)) else {
        return Ok(None);
    };

    let value = found.as_str();
    if value.is_empty() {
        return Ok(None);
    }

    Ok(Some(Identifier::new(
        before_len - value.chars().count(),
        cursor.y,
        value,
    )))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
