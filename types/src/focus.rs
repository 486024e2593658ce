//! Keyboard focus traversal over the gated sequence.
//!
//! The eligible targets are every answerable check in sequence order followed
//! by the submit control (only while submission is allowed). The list is
//! rebuilt from the current state on every call and never cached, so focus
//! cannot drift out of sync with the gate.

use thiserror::Error;

use crate::check::CheckSequence;
use crate::gate::{can_submit, statuses};
use crate::responses::Responses;

/// Something that can hold the focus cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// The answer control of the check at this sequence position.
    Check(usize),
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Navigation was requested while nothing holds focus. Focus is seeded as
    /// soon as checks load, so this indicates a wiring bug.
    #[error("focus navigation requested without a focused element")]
    NoFocus,
}

/// Current eligible targets, in traversal order.
#[must_use]
pub fn eligible_targets(sequence: &CheckSequence, responses: &Responses) -> Vec<FocusTarget> {
    let mut targets: Vec<FocusTarget> = statuses(sequence, responses)
        .into_iter()
        .enumerate()
        .filter(|(_, status)| status.is_answerable())
        .map(|(index, _)| FocusTarget::Check(index))
        .collect();

    if can_submit(sequence, responses) {
        targets.push(FocusTarget::Submit);
    }
    targets
}

/// Next target from `current` in `direction`, wrapping at both ends.
///
/// A `current` that is not in `eligible` (for example a submit control that
/// just became disabled) counts as sitting before the first target, which
/// resolves to the first target in either direction. Returns `Ok(None)` when
/// there is nothing to move to.
pub fn next_target(
    current: Option<FocusTarget>,
    direction: Direction,
    eligible: &[FocusTarget],
) -> Result<Option<FocusTarget>, NavigationError> {
    let current = current.ok_or(NavigationError::NoFocus)?;
    if eligible.is_empty() {
        return Ok(None);
    }

    let position = eligible.iter().position(|target| *target == current);
    let next = next_index(position, direction, eligible.len());
    Ok(eligible.get(next).copied())
}

fn next_index(position: Option<usize>, direction: Direction, len: usize) -> usize {
    match (position, direction) {
        (Some(0), Direction::Backward) => len - 1,
        (Some(pos), Direction::Backward) => pos - 1,
        (Some(pos), Direction::Forward) if pos + 1 < len => pos + 1,
        _ => 0,
    }
}
