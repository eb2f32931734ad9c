//! Initial selection — which candidate is highlighted when the picker opens.
//!
//! The default is the closest top-level candidate at or before the
//! reference point (usually the identifier) in reading order: the most
//! recent thing the user saw above the prompt.
//!
//! Two fallbacks keep "exactly one selected" true for any non-empty list:
//!
//! 1. No top-level candidate at or before the reference → the first
//!    top-level candidate after it.
//! 2. No top-level candidate at all (every whole match was excluded, only
//!    nested units survived) → the first candidate.

use crate::candidate::Candidate;
use crate::geometry::Position;

/// Index of the selected candidate, if any.
#[must_use]
pub fn selected_index(candidates: &[Candidate]) -> Option<usize> {
    candidates.iter().position(|c| c.selected)
}

/// Whether `candidate` is at or before `at` in reading order.
#[inline]
#[must_use]
pub fn is_at_or_before(candidate: &Candidate, at: Position) -> bool {
    candidate.y() < at.y || (candidate.y() == at.y && candidate.x() <= at.x)
}

/// Whether `candidate` is closer to the reference than `best`, given both
/// are at or before it: a later row wins, and on the same row a larger (or
/// equal, so the later entry wins) column does.
#[inline]
#[must_use]
pub fn is_closer_preceding(candidate: &Candidate, best: &Candidate) -> bool {
    candidate.y() > best.y() || (candidate.y() == best.y() && candidate.x() >= best.x())
}

/// Choose the default candidate for reference point `at`.
///
/// Returns `None` only for an empty list.
#[must_use]
pub fn default_index(candidates: &[Candidate], at: Position) -> Option<usize> {
    let mut best: Option<usize> = None;

    for (i, candidate) in candidates.iter().enumerate() {
        if !candidate.is_top_level() || !is_at_or_before(candidate, at) {
            continue;
        }
        if best.is_none_or(|b| is_closer_preceding(candidate, &candidates[b])) {
            best = Some(i);
        }
    }

    best.or_else(|| candidates.iter().position(Candidate::is_top_level))
        .or_else(|| (!candidates.is_empty()).then_some(0))
}

/// Clear any selection and select the default candidate for `at`.
///
/// Returns the index of the newly selected candidate.
pub fn select_default(candidates: &mut [Candidate], at: Position) -> Option<usize> {
    for candidate in candidates.iter_mut() {
        candidate.selected = false;
    }

    let index = default_index(candidates, at)?;
    candidates[index].selected = true;
    Some(index)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn selected_count(candidates: &[Candidate]) -> usize {
        candidates.iter().filter(|c| c.selected).count()
    }

    // ── Comparators ──────────────────────────────────────────────────

    #[test]
    fn at_or_before_same_row_left() {
        assert!(is_at_or_before(&Candidate::new(3, 2, "a"), Position::new(5, 2)));
    }

    #[test]
    fn at_or_before_same_position() {
        assert!(is_at_or_before(&Candidate::new(5, 2, "a"), Position::new(5, 2)));
    }

    #[test]
    fn not_at_or_before_same_row_right() {
        assert!(!is_at_or_before(&Candidate::new(6, 2, "a"), Position::new(5, 2)));
    }

    #[test]
    fn at_or_before_earlier_row_any_column() {
        assert!(is_at_or_before(&Candidate::new(60, 1, "a"), Position::new(0, 2)));
    }

    #[test]
    fn closer_preceding_later_row_wins() {
        let best = Candidate::new(50, 0, "a");
        assert!(is_closer_preceding(&Candidate::new(0, 1, "b"), &best));
    }

    #[test]
    fn closer_preceding_same_row_larger_x_wins() {
        let best = Candidate::new(2, 1, "a");
        assert!(is_closer_preceding(&Candidate::new(7, 1, "b"), &best));
        assert!(!is_closer_preceding(&Candidate::new(1, 1, "b"), &best));
    }

    #[test]
    fn closer_preceding_earlier_row_loses() {
        let best = Candidate::new(0, 3, "a");
        assert!(!is_closer_preceding(&Candidate::new(40, 2, "b"), &best));
    }

    // ── Default selection ────────────────────────────────────────────

    #[test]
    fn picks_closest_preceding() {
        let mut list = vec![
            Candidate::new(0, 0, "a"),
            Candidate::new(4, 1, "b"),
            Candidate::new(9, 1, "c"),
            Candidate::new(0, 3, "d"),
        ];
        assert_eq!(select_default(&mut list, Position::new(2, 2)), Some(2));
        assert!(list[2].selected);
        assert_eq!(selected_count(&list), 1);
    }

    #[test]
    fn ignores_candidates_after_reference_on_same_row() {
        let mut list = vec![Candidate::new(0, 1, "a"), Candidate::new(8, 1, "b")];
        assert_eq!(select_default(&mut list, Position::new(5, 1)), Some(0));
    }

    #[test]
    fn never_starts_on_nested_unit() {
        let mut list = vec![
            Candidate::new(0, 0, "(foo)"),
            Candidate::nested(0, 0, "(foo", "(foo)"),
        ];
        assert_eq!(select_default(&mut list, Position::new(0, 1)), Some(0));
    }

    #[test]
    fn falls_back_to_first_following() {
        let mut list = vec![
            Candidate::nested(0, 0, "x", "x)"),
            Candidate::new(3, 4, "b"),
            Candidate::new(0, 5, "c"),
        ];
        assert_eq!(select_default(&mut list, Position::new(0, 2)), Some(1));
    }

    #[test]
    fn falls_back_to_nested_when_no_top_level() {
        let mut list = vec![
            Candidate::nested(1, 0, "foo)", "(foo)"),
            Candidate::nested(1, 2, "bar)", "(bar)"),
        ];
        assert_eq!(select_default(&mut list, Position::new(0, 1)), Some(0));
        assert_eq!(selected_count(&list), 1);
    }

    #[test]
    fn clears_previous_selection() {
        let mut list = vec![Candidate::new(0, 0, "a"), Candidate::new(0, 1, "b")];
        list[0].selected = true;
        select_default(&mut list, Position::new(0, 2));
        assert!(!list[0].selected);
        assert!(list[1].selected);
    }

    #[test]
    fn empty_list_selects_nothing() {
        let mut list: Vec<Candidate> = Vec::new();
        assert_eq!(select_default(&mut list, Position::new(0, 0)), None);
    }

    #[test]
    fn deterministic() {
        let make = || {
            vec![
                Candidate::new(0, 0, "a"),
                Candidate::new(2, 0, "b"),
                Candidate::new(1, 1, "c"),
            ]
        };
        let (mut a, mut b) = (make(), make());
        assert_eq!(
            select_default(&mut a, Position::new(9, 1)),
            select_default(&mut b, Position::new(9, 1))
        );
        assert_eq!(a, b);
    }

    #[test]
    fn selected_index_finds_flag() {
        let mut list = vec![Candidate::new(0, 0, "a"), Candidate::new(0, 1, "b")];
        assert_eq!(selected_index(&list), None);
        list[1].selected = true;
        assert_eq!(selected_index(&list), Some(1));
    }
}
