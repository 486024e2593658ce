//! Gate evaluation and the submission gate.
//!
//! Everything here is a pure function of a [`CheckSequence`] and the current
//! [`Responses`]. Nothing is cached: callers re-evaluate on every read.

use crate::check::CheckSequence;
use crate::responses::{Answer, Responses};

/// Derived status of a check at one position of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateStatus {
    /// An earlier check is still unanswered.
    Disabled,
    /// First unanswered check; the only one that can be answered fresh.
    Active,
    /// Answered, and every earlier check is answered too.
    Completed,
}

impl GateStatus {
    /// Active and completed checks both accept input.
    #[must_use]
    pub const fn is_answerable(self) -> bool {
        !matches!(self, Self::Disabled)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// Status of the check at `index`. Out-of-range indices report `Disabled`.
#[must_use]
pub fn status_of(sequence: &CheckSequence, responses: &Responses, index: usize) -> GateStatus {
    let Some(check) = sequence.get(index) else {
        return GateStatus::Disabled;
    };

    let blocked = sequence
        .ids()
        .take(index)
        .any(|earlier| !responses.contains(earlier));
    if blocked {
        GateStatus::Disabled
    } else if responses.contains(&check.id) {
        GateStatus::Completed
    } else {
        GateStatus::Active
    }
}

/// Status of every position, in sequence order.
#[must_use]
pub fn statuses(sequence: &CheckSequence, responses: &Responses) -> Vec<GateStatus> {
    // Single pass: once a gap is seen, everything after it is disabled.
    let mut gap_seen = false;
    sequence
        .ids()
        .map(|id| {
            if gap_seen {
                GateStatus::Disabled
            } else if responses.contains(id) {
                GateStatus::Completed
            } else {
                gap_seen = true;
                GateStatus::Active
            }
        })
        .collect()
}

/// Position of the single active check, if any.
#[must_use]
pub fn active_index(sequence: &CheckSequence, responses: &Responses) -> Option<usize> {
    sequence.ids().position(|id| !responses.contains(id))
}

/// Submission is allowed once any answer is `No`, or once every check in
/// the sequence is answered `Yes`.
#[must_use]
pub fn can_submit(sequence: &CheckSequence, responses: &Responses) -> bool {
    if responses.values().any(|answer| answer == Answer::No) {
        return true;
    }
    sequence
        .ids()
        .all(|id| responses.get(id) == Some(Answer::Yes))
}
