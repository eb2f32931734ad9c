//! Directional navigation between candidates.
//!
//! A move is a pure transition on the candidate list: find the selected
//! candidate, collect the ones lying in the requested direction, pick the
//! closest, move the flag. If nothing lies that way, nothing changes.
//!
//! # Eligibility
//!
//! - **Horizontal** moves stay on the selected candidate's row and take the
//!   candidates whose column is on the requested side.
//! - **Vertical** moves take every candidate on a row in the requested
//!   direction, whatever its column.
//!
//! # Stacked units
//!
//! A match and its nested unit start at the same column (`(foo)` and `(foo`
//! with trailing trim). Horizontally, such same-column candidates are
//! ordered by length: right goes to the next longer one, left to the next
//! shorter one. Their axis distance is zero, so they are visited before
//! anything further along the row.
//!
//! # Closeness
//!
//! Distance along the move axis first, then distance along the other axis.
//! Ties keep the earliest candidate in list order.

use std::cmp::Ordering;

use crate::candidate::Candidate;
use crate::select::selected_index;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the four unit moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The unit vector `(dx, dy)`; `y` grows downwards.
    #[must_use]
    pub const fn vector(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

// ---------------------------------------------------------------------------
// Comparators
// ---------------------------------------------------------------------------

/// Sign of `to - from`: -1, 0 or 1.
#[inline]
fn offset_sign(from: usize, to: usize) -> isize {
    match to.cmp(&from) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Whether `candidate` lies in direction `dir` from `current`.
#[must_use]
pub fn is_eligible(current: &Candidate, candidate: &Candidate, dir: Direction) -> bool {
    let (dx, dy) = dir.vector();
    let sx = offset_sign(current.x(), candidate.x());
    let sy = offset_sign(current.y(), candidate.y());

    if dir.is_horizontal() {
        if sy != 0 {
            return false;
        }
        if sx == 0 {
            return is_stacked_step(current, candidate, dir);
        }
        sx == dx
    } else {
        sy == dy
    }
}

/// Same-column horizontal step: right to a strictly longer candidate, left
/// to a strictly shorter one.
#[inline]
#[must_use]
pub fn is_stacked_step(current: &Candidate, candidate: &Candidate, dir: Direction) -> bool {
    match dir {
        Direction::Right => candidate.len() > current.len(),
        Direction::Left => candidate.len() < current.len(),
        Direction::Up | Direction::Down => false,
    }
}

/// `(along, across)` distance from `current` for a move in `dir`.
#[inline]
#[must_use]
pub fn axis_distance(current: &Candidate, candidate: &Candidate, dir: Direction) -> (usize, usize) {
    let dx = current.x().abs_diff(candidate.x());
    let dy = current.y().abs_diff(candidate.y());
    if dir.is_horizontal() {
        (dx, dy)
    } else {
        (dy, dx)
    }
}

/// Tie-break between two same-column horizontal steps: right prefers the
/// smallest length excess, left the largest shorter length.
#[must_use]
pub fn stacked_order(a: &Candidate, b: &Candidate, dir: Direction) -> Ordering {
    match dir {
        Direction::Right => a.len().cmp(&b.len()),
        Direction::Left => b.len().cmp(&a.len()),
        Direction::Up | Direction::Down => Ordering::Equal,
    }
}

/// Total closeness order for a move in `dir`: `Less` means `a` is closer.
#[must_use]
pub fn closeness(current: &Candidate, a: &Candidate, b: &Candidate, dir: Direction) -> Ordering {
    axis_distance(current, a, dir)
        .cmp(&axis_distance(current, b, dir))
        .then_with(|| {
            let both_stacked = dir.is_horizontal() && a.x() == current.x() && b.x() == current.x();
            if both_stacked {
                stacked_order(a, b, dir)
            } else {
                Ordering::Equal
            }
        })
}

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

/// Index of the candidate a move in `dir` would land on, if any.
#[must_use]
pub fn next_index(candidates: &[Candidate], dir: Direction) -> Option<usize> {
    let current_index = selected_index(candidates)?;
    let current = &candidates[current_index];

    let mut best: Option<usize> = None;
    for (i, candidate) in candidates.iter().enumerate() {
        if i == current_index || !is_eligible(current, candidate, dir) {
            continue;
        }
        let closer = best.is_none_or(|b| {
            closeness(current, candidate, &candidates[b], dir) == Ordering::Less
        });
        if closer {
            best = Some(i);
        }
    }
    best
}

/// Move the selection one step in `dir`.
///
/// Returns the new selected index, or `None` when the selection did not
/// change (nothing selected, or nothing in that direction).
pub fn select_next(candidates: &mut [Candidate], dir: Direction) -> Option<usize> {
    let from = selected_index(candidates)?;
    let to = next_index(candidates, dir)?;

    candidates[from].selected = false;
    candidates[to].selected = true;
    Some(to)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
