//! Error type for the completion core.
//!
//! Only pattern compilation can fail. "Nothing under the cursor" and
//! "nothing found" are ordinary [`Outcome`](crate::session::Outcome)s.

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Which of the two configured patterns an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Legal identifier characters, matched against the text before the cursor.
    Cursor,
    /// Continuation grammar for candidates.
    Candidate,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cursor => f.write_str("cursor"),
            Self::Candidate => f.write_str("candidate"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid {kind} pattern `{pattern}`")]
    Pattern {
        kind: PatternKind,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl Error {
    pub(crate) fn pattern(kind: PatternKind, pattern: &str, source: regex::Error) -> Self {
        Self::Pattern {
            kind,
            pattern: pattern.to_owned(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_error_names_kind_and_pattern() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = Error::pattern(PatternKind::Candidate, "(", source);
        assert_eq!(err.to_string(), "invalid candidate pattern `(`");
    }

    #[test]
    fn pattern_error_keeps_source() {
        let source = regex::Regex::new("[").unwrap_err();
        let err = Error::pattern(PatternKind::Cursor, "[", source);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn kind_display() {
        assert_eq!(PatternKind::Cursor.to_string(), "cursor");
        assert_eq!(PatternKind::Candidate.to_string(), "candidate");
    }
}
