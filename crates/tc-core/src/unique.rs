//! Order-preserving deduplication of candidates.

use std::collections::HashSet;

use crate::candidate::Candidate;

/// Keep the first occurrence of every distinct `(value, parent)` pair.
///
/// A nested unit and a top-level unit with the same text are distinct: the
/// nested one remembers where it came from.
#[must_use]
pub fn unique(candidates: &[Candidate]) -> Vec<Candidate> {
    let mut seen: HashSet<(&str, &str)> = HashSet::with_capacity(candidates.len());

    candidates
        .iter()
        .filter(|c| seen.insert((c.value(), c.parent.as_str())))
        .cloned()
        .collect()
}
