//! Session — one interactive completion run.
//!
//! Wires the pieces together in pipeline order:
//!
//! ```text
//! lines + cursor ─► find_identifier ─► scan_candidates ─► select_default
//!                         │                   │
//!                    NoIdentifier        NoCandidates
//! ```
//!
//! A [`Session`] owns its candidate list for its whole lifetime. The only
//! mutation after construction is moving the selection with
//! [`Session::navigate`].

use tracing::debug;

use crate::candidate::{scan_candidates, Candidate, TrimRule};
use crate::error::Result;
use crate::geometry::Position;
use crate::identifier::{find_identifier, Identifier};
use crate::navigate::{select_next, Direction};
use crate::select::{select_default, selected_index};
use crate::unique::unique;

// ---------------------------------------------------------------------------
// CompletionConfig
// ---------------------------------------------------------------------------

/// Patterns and rules for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionConfig {
    /// Legal identifier characters, matched backwards from the cursor.
    pub cursor_pattern: String,
    /// How a candidate continues past the identifier.
    pub candidate_pattern: String,
    pub trim: TrimRule,
    /// Complete the token under the cursor. When `false`, every candidate
    /// pattern match in the pane is offered.
    pub use_prefix: bool,
}

impl CompletionConfig {
    /// Printable ASCII without space.
    pub const DEFAULT_CURSOR_PATTERN: &'static str = "[!-~]+";
    /// Same class as the cursor pattern, so a candidate ends at the first
    /// blank instead of running to the end of the line.
    pub const DEFAULT_CANDIDATE_PATTERN: &'static str = "[!-~]+";
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            cursor_pattern: Self::DEFAULT_CURSOR_PATTERN.to_owned(),
            candidate_pattern: Self::DEFAULT_CANDIDATE_PATTERN.to_owned(),
            trim: TrimRule::default(),
            use_prefix: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of starting a session.
#[derive(Debug)]
pub enum Outcome {
    /// Nothing to complete at the cursor.
    NoIdentifier,
    /// Nothing in the pane completes the identifier.
    NoCandidates,
    /// Candidates found, one of them selected.
    Ready(Session),
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Session {
    identifier: Option<Identifier>,
    candidates: Vec<Candidate>,
}

impl Session {
    /// Locate the identifier at `cursor` (buffer coordinates), scan `lines`
    /// and select the default candidate.
    ///
    /// Without a prefix, the selection starts from the last candidate.
    ///
    /// # Errors
    ///
    /// [`Error::Pattern`](crate::Error::Pattern) if either pattern is invalid.
    pub fn start<S: AsRef<str>>(
        config: &CompletionConfig,
        lines: &[S],
        cursor: Position,
    ) -> Result<Outcome> {
        let identifier = if config.use_prefix {
            match find_identifier(&config.cursor_pattern, lines, cursor)? {
                Some(id) => Some(id),
                None => {
                    debug!(?cursor, "no identifier at cursor");
                    return Ok(Outcome::NoIdentifier);
                }
            }
        } else {
            None
        };

        let mut candidates = scan_candidates(
            &config.candidate_pattern,
            &config.trim,
            lines,
            identifier.as_ref(),
        )?;

        let Some(last) = candidates.last() else {
            debug!(identifier = ?identifier.as_ref().map(|id| &id.value), "no candidates");
            return Ok(Outcome::NoCandidates);
        };

        let reference = identifier
            .as_ref()
            .map_or_else(|| last.position(), Identifier::position);
        select_default(&mut candidates, reference);

        debug!(
            count = candidates.len(),
            identifier = ?identifier.as_ref().map(|id| &id.value),
            "session ready"
        );

        Ok(Outcome::Ready(Self {
            identifier,
            candidates,
        }))
    }

    /// The identifier being completed, absent in no-prefix mode.
    #[inline]
    #[must_use]
    pub const fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    /// Every candidate in scan order, with current selection flags.
    #[inline]
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Candidate> {
        selected_index(&self.candidates).map(|i| &self.candidates[i])
    }

    /// Move the selection. Returns `true` if it changed.
    pub fn navigate(&mut self, dir: Direction) -> bool {
        select_next(&mut self.candidates, dir).is_some()
    }

    /// One entry per distinct `(value, parent)`.
    #[must_use]
    pub fn unique(&self) -> Vec<Candidate> {
        unique(&self.candidates)
    }

    /// Exactly one distinct candidate: the picker can be skipped.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.unique().len() == 1
    }

    /// Text to deliver for the current selection.
    ///
    /// With `strip_prefix`, the already-typed identifier is removed so the
    /// text can be pasted right after the cursor.
    #[must_use]
    pub fn accepted_text(&self, strip_prefix: bool) -> Option<String> {
        let selected = self.selected()?;
        let text = match (&self.identifier, strip_prefix) {
            (Some(id), true) => selected.value().chars().skip(id.len()).collect(),
            _ => selected.value().to_owned(),
        };
        Some(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn start(config: &CompletionConfig, lines: &[&str], x: usize, y: usize) -> Outcome {
        Session::start(config, lines, Position::new(x, y)).unwrap()
    }

    fn ready(outcome: Outcome) -> Session {
        match outcome {
            Outcome::Ready(session) => session,
            other => panic!("expected a ready session, got {other:?}"),
        }
    }

    fn values(session: &Session) -> Vec<&str> {
        session.candidates().iter().map(Candidate::value).collect()
    }

    // ── Outcomes ─────────────────────────────────────────────────────

    #[test]
    fn completes_dotted_prefix() {
        let config = CompletionConfig::default();
        let session = ready(start(&config, &["foo.bar", "$ foo."], 6, 1));

        assert_eq!(session.identifier().unwrap().value, "foo.");
        assert!(values(&session).contains(&"foo.bar"));
        assert!(!values(&session).contains(&"foo."));
    }

    #[test]
    fn default_candidate_ends_at_blank() {
        let config = CompletionConfig::default();
        let session = ready(start(&config, &["foo.bar baz <qux>", "$ foo"], 5, 1));
        assert_eq!(values(&session), vec!["foo.bar"]);
    }

    #[test]
    fn blank_before_cursor_is_no_identifier() {
        let config = CompletionConfig::default();
        assert!(matches!(
            start(&config, &["foo", "$ "], 2, 1),
            Outcome::NoIdentifier
        ));
    }

    #[test]
    fn unmatched_prefix_is_no_candidates() {
        let config = CompletionConfig::default();
        assert!(matches!(
            start(&config, &["foo", "$ zzz"], 5, 1),
            Outcome::NoCandidates
        ));
    }

    #[test]
    fn invalid_cursor_pattern_fails_before_scan() {
        let config = CompletionConfig {
            cursor_pattern: "(".into(),
            ..CompletionConfig::default()
        };
        let err = Session::start(&config, &["foo"], Position::new(3, 0)).unwrap_err();
        assert!(matches!(err, Error::Pattern { .. }));
    }

    #[test]
    fn invalid_candidate_pattern_fails() {
        let config = CompletionConfig {
            candidate_pattern: "[".into(),
            ..CompletionConfig::default()
        };
        assert!(Session::start(&config, &["foo", "$ f"], Position::new(3, 1)).is_err());
    }

    // ── Selection ────────────────────────────────────────────────────

    #[test]
    fn default_selection_is_closest_above_prompt() {
        let config = CompletionConfig::default();
        let lines = ["cargo build", "cargo check", "$ ca"];
        let session = ready(start(&config, &lines, 4, 2));

        assert_eq!(session.selected().unwrap().value(), "cargo");
        assert_eq!(session.selected().unwrap().y(), 1);
        assert_eq!(session.candidates().iter().filter(|c| c.selected).count(), 1);
    }

    #[test]
    fn no_prefix_starts_from_last_candidate() {
        let config = CompletionConfig {
            use_prefix: false,
            ..CompletionConfig::default()
        };
        let session = ready(start(&config, &["alpha beta", "gamma"], 0, 0));

        assert!(session.identifier().is_none());
        assert_eq!(values(&session), vec!["alpha", "beta", "gamma"]);
        assert_eq!(session.selected().unwrap().value(), "gamma");
    }

    #[test]
    fn navigate_moves_and_reports_change() {
        let config = CompletionConfig::default();
        let lines = ["src/a.rs src/b.rs", "$ src/"];
        let mut session = ready(start(&config, &lines, 6, 1));

        assert_eq!(session.selected().unwrap().value(), "src/b.rs");
        assert!(session.navigate(Direction::Left));
        assert_eq!(session.selected().unwrap().value(), "src/a.rs");
        assert!(!session.navigate(Direction::Left));
        assert!(!session.navigate(Direction::Down));
    }

    // ── Trivial case & delivery ──────────────────────────────────────

    #[test]
    fn repeated_single_value_is_trivial() {
        let config = CompletionConfig::default();
        let lines = ["make install", "make install", "$ make ins"];
        let session = ready(start(&config, &lines, 10, 2));

        assert_eq!(session.candidates().len(), 2);
        assert!(session.is_trivial());
        assert_eq!(session.accepted_text(true).as_deref(), Some("tall"));
    }

    #[test]
    fn nested_unit_prevents_trivial() {
        let config = CompletionConfig::default();
        let session = ready(start(&config, &["(foo)", "$ (f"], 4, 1));

        assert_eq!(values(&session), vec!["(foo)", "(foo"]);
        assert!(!session.is_trivial());
    }

    #[test]
    fn accepted_text_keeps_prefix_when_asked() {
        let config = CompletionConfig::default();
        let session = ready(start(&config, &["foo.bar", "$ foo."], 6, 1));

        assert_eq!(session.accepted_text(false).as_deref(), Some("foo.bar"));
        assert_eq!(session.accepted_text(true).as_deref(), Some("bar"));
    }

    #[test]
    fn accepted_text_strips_chars_not_bytes() {
        let config = CompletionConfig::default();
        let lines = ["naïve-thing", "$ naïve"];
        let config = CompletionConfig {
            cursor_pattern: r"[\w-]+".into(),
            candidate_pattern: r"[\w-]+".into(),
            ..config
        };
        let session = ready(start(&config, &lines, 7, 1));
        assert_eq!(session.accepted_text(true).as_deref(), Some("-thing"));
    }

    #[test]
    fn start_is_deterministic() {
        let config = CompletionConfig::default();
        let lines = ["x1 x2 (x3)", "x2 x4", "$ x"];
        let a = ready(start(&config, &lines, 3, 2));
        let b = ready(start(&config, &lines, 3, 2));
        assert_eq!(a.candidates(), b.candidates());
    }
}
