//! Candidate scanning — every token in the pane that could complete the
//! identifier.
//!
//! # Pattern
//!
//! With an identifier, the search pattern is the identifier's literal text
//! followed by the candidate pattern, so the candidate pattern describes how
//! a token *continues* past what the user already typed. Without one, the
//! candidate pattern is matched on its own.
//!
//! # Nested units
//!
//! Tokens scraped from terminal output often carry punctuation that belongs
//! to the surrounding text: `(see src/main.rs)`, `"path":`. Each match is
//! offered as-is, and additionally as a trimmed **nested unit** when cutting
//! the configured characters off one side ([`TrimRule`]) leaves something
//! non-empty and different. The nested unit records the full match as its
//! `parent`.
//!
//! ```text
//!   match "(foo)"  ──►  { "(foo)", parent: "" }
//!                       { "(foo",  parent: "(foo)" }     trailing trim of ")"
//! ```
//!
//! # Self-exclusion
//!
//! A unit is dropped when it does not extend the identifier, when it equals
//! the identifier, or when it sits exactly where the identifier is.

use regex::Regex;

use crate::error::{Error, PatternKind, Result};
use crate::geometry::Position;
use crate::identifier::Identifier;

// ---------------------------------------------------------------------------
// Candidate
// ---------------------------------------------------------------------------

/// One selectable completion.
///
/// Holds an [`Identifier`]-shaped location plus the selection flag and, for
/// nested units, the text of the match it was trimmed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub unit: Identifier,
    /// The full outer match for nested units; empty for top-level units.
    pub parent: String,
    pub selected: bool,
}

impl Candidate {
    /// A top-level, unselected candidate.
    #[must_use]
    pub fn new(x: usize, y: usize, value: impl Into<String>) -> Self {
        Self {
            unit: Identifier::new(x, y, value),
            parent: String::new(),
            selected: false,
        }
    }

    /// A nested candidate trimmed out of `parent`.
    #[must_use]
    pub fn nested(x: usize, y: usize, value: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            unit: Identifier::new(x, y, value),
            parent: parent.into(),
            selected: false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn x(&self) -> usize {
        self.unit.x
    }

    #[inline]
    #[must_use]
    pub const fn y(&self) -> usize {
        self.unit.y
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.unit.value
    }

    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        self.unit.position()
    }

    /// Length of the value in chars.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.unit.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unit.is_empty()
    }

    /// Whether this unit is a whole match rather than a trimmed piece of one.
    #[inline]
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.parent.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TrimRule
// ---------------------------------------------------------------------------

/// Which end of a match the trim characters are cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrimSide {
    /// Cut opening punctuation: `(foo)` → `foo)`.
    Leading,
    /// Cut closing punctuation: `(foo)` → `(foo`.
    #[default]
    Trailing,
}

/// How nested units are derived from a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimRule {
    pub side: TrimSide,
    /// Every char in this string is trimmed, repeatedly, from `side`.
    pub chars: String,
}

impl TrimRule {
    /// Closing brackets, quotes and colon.
    pub const DEFAULT_CHARS: &'static str = ")]}>'\"`:";

    #[must_use]
    pub fn new(side: TrimSide, chars: impl Into<String>) -> Self {
        Self {
            side,
            chars: chars.into(),
        }
    }

    /// A rule that never derives nested units.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(TrimSide::Trailing, "")
    }

    /// Trim `value`, returning the nested text and how many chars were cut
    /// from the front. `None` when trimming leaves the value unchanged or
    /// empty.
    #[must_use]
    pub fn apply<'a>(&self, value: &'a str) -> Option<(&'a str, usize)> {
        if self.chars.is_empty() {
            return None;
        }

        let is_trim = |ch: char| self.chars.contains(ch);
        let (trimmed, shift) = match self.side {
            TrimSide::Trailing => (value.trim_end_matches(is_trim), 0),
            TrimSide::Leading => {
                let rest = value.trim_start_matches(is_trim);
                let cut = value[..value.len() - rest.len()].chars().count();
                (rest, cut)
            }
        };

        if trimmed.is_empty() || trimmed.len() == value.len() {
            None
        } else {
            Some((trimmed, shift))
        }
    }
}

impl Default for TrimRule {
    fn default() -> Self {
        Self::new(TrimSide::Trailing, Self::DEFAULT_CHARS)
    }
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

/// Build the effective search pattern for an optional identifier.
fn search_matcher(pattern: &str, identifier: Option<&Identifier>) -> Result<Regex> {
    let source = match identifier {
        Some(id) => format!("{}(?:{pattern})", regex::escape(&id.value)),
        None => pattern.to_owned(),
    };
    Regex::new(&source).map_err(|e| Error::pattern(PatternKind::Candidate, pattern, e))
}

/// Whether a unit must be dropped because it does not complete `identifier`.
fn excluded_by(identifier: &Identifier, value: &str, x: usize, y: usize) -> bool {
    !value.starts_with(identifier.value.as_str())
        || value == identifier.value
        || (x == identifier.x && y == identifier.y)
}

/// Scan every line for candidates.
///
/// Output order is line, then match within the line, then the top-level
/// unit before its nested unit. No deduplication happens here.
///
/// # Errors
///
/// [`Error::Pattern`] if `pattern` does not compile.
pub fn scan_candidates<S: AsRef<str>>(
    pattern: &str,
    trim: &TrimRule,
    lines: &[S],
    identifier: Option<&Identifier>,
) -> Result<Vec<Candidate>> {
    let matcher = search_matcher(pattern, identifier)?;
    let mut candidates = Vec::new();

    for (y, line) in lines.iter().enumerate() {
        let line = line.as_ref();

        for found in matcher.find_iter(line) {
            let value = found.as_str();
            if value.is_empty() {
                continue;
            }

            let x = line[..found.start()].chars().count();
            let keep = |value: &str, x: usize| {
                identifier.is_none_or(|id| !excluded_by(id, value, x, y))
            };

            if keep(value, x) {
                candidates.push(Candidate::new(x, y, value));
            }

            if let Some((nested, shift)) = trim.apply(value) {
                if keep(nested, x + shift) {
                    candidates.push(Candidate::nested(x + shift, y, nested, value));
                }
            }
        }
    }

    tracing::trace!(count = candidates.len(), "scanned candidates");
    Ok(candidates)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PRINTABLE: &str = "[!-~]+";

    fn values(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(Candidate::value).collect()
    }

    // ── TrimRule ─────────────────────────────────────────────────────

    #[test]
    fn trim_trailing_closing_paren() {
        assert_eq!(TrimRule::default().apply("(foo)"), Some(("(foo", 0)));
    }

    #[test]
    fn trim_trailing_repeated() {
        assert_eq!(TrimRule::default().apply("a.b\"):"), Some(("a.b", 0)));
    }

    #[test]
    fn trim_unchanged_is_none() {
        assert_eq!(TrimRule::default().apply("foo"), None);
    }

    #[test]
    fn trim_to_empty_is_none() {
        assert_eq!(TrimRule::default().apply("))"), None);
    }

    #[test]
    fn trim_leading_reports_shift_in_chars() {
        let rule = TrimRule::new(TrimSide::Leading, "«(");
        assert_eq!(rule.apply("«(foo)"), Some(("foo)", 2)));
    }

    #[test]
    fn trim_disabled() {
        assert_eq!(TrimRule::disabled().apply("(foo)"), None);
    }

    // ── Scanning without identifier ──────────────────────────────────

    #[test]
    fn scan_all_tokens_in_reading_order() {
        let lines = ["ab cd", "", "ef"];
        let found = scan_candidates(PRINTABLE, &TrimRule::disabled(), &lines, None).unwrap();
        assert_eq!(
            found,
            vec![
                Candidate::new(0, 0, "ab"),
                Candidate::new(3, 0, "cd"),
                Candidate::new(0, 2, "ef"),
            ]
        );
    }

    #[test]
    fn scan_emits_nested_unit_after_parent() {
        let lines = ["x (foo) y"];
        let found = scan_candidates(PRINTABLE, &TrimRule::default(), &lines, None).unwrap();
        assert_eq!(
            found,
            vec![
                Candidate::new(0, 0, "x"),
                Candidate::new(2, 0, "(foo)"),
                Candidate::nested(2, 0, "(foo", "(foo)"),
                Candidate::new(8, 0, "y"),
            ]
        );
    }

    #[test]
    fn scan_columns_are_chars() {
        let lines = ["ééé foo"];
        let found = scan_candidates("foo", &TrimRule::disabled(), &lines, None).unwrap();
        assert_eq!(found[0].x(), 4);
    }

    #[test]
    fn scan_leading_trim_shifts_nested_unit() {
        let lines = ["(foo)"];
        let rule = TrimRule::new(TrimSide::Leading, "(");
        let found = scan_candidates(PRINTABLE, &rule, &lines, None).unwrap();
        assert_eq!(found[1], Candidate::nested(1, 0, "foo)", "(foo)"));
    }

    // ── Scanning with identifier ─────────────────────────────────────

    #[test]
    fn scan_extends_identifier_only() {
        let lines = ["foo.bar", "$ foo."];
        let id = Identifier::new(2, 1, "foo.");
        let found = scan_candidates(PRINTABLE, &TrimRule::default(), &lines, Some(&id)).unwrap();
        assert_eq!(values(&found), vec!["foo.bar"]);
    }

    #[test]
    fn scan_identifier_is_literal() {
        // `.` in the identifier must not act as a wildcard.
        let lines = ["fooXbar foo.baz", "$ foo."];
        let id = Identifier::new(2, 1, "foo.");
        let found = scan_candidates(PRINTABLE, &TrimRule::default(), &lines, Some(&id)).unwrap();
        assert_eq!(values(&found), vec!["foo.baz"]);
    }

    #[test]
    fn scan_candidate_pattern_alternation_is_grouped() {
        let lines = ["git gitk", "$ git"];
        let id = Identifier::new(2, 1, "git");
        let found = scan_candidates("k|hub", &TrimRule::disabled(), &lines, Some(&id)).unwrap();
        assert_eq!(values(&found), vec!["gitk"]);
    }

    #[test]
    fn scan_drops_unit_at_identifier_position() {
        // Cursor in the middle of `foobar`: the token under the cursor
        // must not complete itself.
        let lines = ["foobar", "$ foobar"];
        let id = Identifier::new(2, 1, "foo");
        let found = scan_candidates(PRINTABLE, &TrimRule::default(), &lines, Some(&id)).unwrap();
        assert_eq!(found, vec![Candidate::new(0, 0, "foobar")]);
    }

    #[test]
    fn scan_drops_nested_unit_equal_to_identifier() {
        let lines = ["(foo)", "$ (foo"];
        let id = Identifier::new(2, 1, "(foo");
        let found = scan_candidates(PRINTABLE, &TrimRule::default(), &lines, Some(&id)).unwrap();
        assert_eq!(found, vec![Candidate::new(0, 0, "(foo)")]);
    }

    #[test]
    fn scan_drops_nested_unit_not_extending_identifier() {
        let lines = ["(foo)", "$ (f"];
        let id = Identifier::new(2, 1, "(f");
        let rule = TrimRule::new(TrimSide::Leading, "(");
        // Leading trim turns `(foo)` into `foo)`, which no longer starts with `(f`.
        let found = scan_candidates(PRINTABLE, &rule, &lines, Some(&id)).unwrap();
        assert_eq!(values(&found), vec!["(foo)"]);
    }

    #[test]
    fn scan_prefix_invariant() {
        let lines = ["src/main.rs src/lib.rs (src/ui.rs) docs/x.md", "$ src/"];
        let id = Identifier::new(2, 1, "src/");
        let found = scan_candidates(PRINTABLE, &TrimRule::default(), &lines, Some(&id)).unwrap();
        assert!(!found.is_empty());
        for candidate in &found {
            assert!(candidate.value().starts_with("src/"));
            assert_ne!(candidate.value(), "src/");
            assert_ne!(candidate.position(), id.position());
        }
    }

    #[test]
    fn scan_is_deterministic() {
        let lines = ["a1 a2 (a3)", "a4 a1", "$ a"];
        let id = Identifier::new(2, 2, "a");
        let first = scan_candidates(PRINTABLE, &TrimRule::default(), &lines, Some(&id)).unwrap();
        let second = scan_candidates(PRINTABLE, &TrimRule::default(), &lines, Some(&id)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn scan_invalid_pattern_is_error() {
        let err = scan_candidates("[", &TrimRule::default(), &["x"], None).unwrap_err();
        assert!(matches!(
            err,
            Error::Pattern {
                kind: PatternKind::Candidate,
                ..
            }
        ));
    }
}
