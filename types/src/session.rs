//! A single form session: the ordered checks, the response store and the
//! focus cursor, owned together so that every write and every focus move
//! sees the same state.

use thiserror::Error;

use crate::check::{Check, CheckId, CheckSequence};
use crate::focus::{Direction, FocusTarget, NavigationError, eligible_targets, next_target};
use crate::gate::{GateStatus, active_index, can_submit, status_of, statuses};
use crate::responses::{Answer, RecordError, Responses};
use crate::submission::Submission;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// Result of a focus request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    Moved(FocusTarget),
    /// Nothing eligible to move to.
    Unchanged,
    /// The target cannot take focus right now; focus stays where it was.
    Unfocusable(FocusTarget),
}

/// What an answer did: the write, then the forward advance computed from the
/// post-write state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub check: CheckId,
    pub answer: Answer,
    pub focus: FocusOutcome,
}

#[derive(Debug, Clone)]
pub struct FormSession {
    sequence: CheckSequence,
    responses: Responses,
    focus: Option<FocusTarget>,
}

impl FormSession {
    /// Orders `checks` and seeds focus on the first eligible target.
    #[must_use]
    pub fn new(checks: Vec<Check>) -> Self {
        let sequence = CheckSequence::from_unordered(checks);
        let responses = Responses::new();
        let focus = eligible_targets(&sequence, &responses).first().copied();
        Self {
            sequence,
            responses,
            focus,
        }
    }

    #[must_use]
    pub fn sequence(&self) -> &CheckSequence {
        &self.sequence
    }

    #[must_use]
    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    #[must_use]
    pub fn focus(&self) -> Option<FocusTarget> {
        self.focus
    }

    #[must_use]
    pub fn status(&self, index: usize) -> GateStatus {
        status_of(&self.sequence, &self.responses, index)
    }

    #[must_use]
    pub fn statuses(&self) -> Vec<GateStatus> {
        statuses(&self.sequence, &self.responses)
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        active_index(&self.sequence, &self.responses)
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        can_submit(&self.sequence, &self.responses)
    }

    #[must_use]
    pub fn eligible_targets(&self) -> Vec<FocusTarget> {
        eligible_targets(&self.sequence, &self.responses)
    }

    #[must_use]
    pub fn answer_at(&self, index: usize) -> Option<Answer> {
        self.sequence
            .get(index)
            .and_then(|check| self.responses.get(&check.id))
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.responses.len()
    }

    #[must_use]
    pub fn submission(&self) -> Submission {
        Submission::from_responses(&self.sequence, &self.responses)
    }

    /// Move focus to `target` if it can take it.
    pub fn focus_on(&mut self, target: FocusTarget) -> FocusOutcome {
        let focusable = match target {
            FocusTarget::Submit => self.can_submit(),
            FocusTarget::Check(index) => self.status(index).is_answerable(),
        };
        if focusable {
            self.focus = Some(target);
            FocusOutcome::Moved(target)
        } else {
            FocusOutcome::Unfocusable(target)
        }
    }

    /// Step focus one eligible target in `direction`, wrapping at the ends.
    pub fn navigate(&mut self, direction: Direction) -> Result<FocusOutcome, NavigationError> {
        let eligible = self.eligible_targets();
        match next_target(self.focus, direction, &eligible)? {
            Some(target) => Ok(self.focus_on(target)),
            None => Ok(FocusOutcome::Unchanged),
        }
    }

    /// Answer the focused check and advance. Returns `Ok(None)` when the
    /// focus is on the submit control.
    pub fn answer_focused(
        &mut self,
        answer: Answer,
    ) -> Result<Option<AnswerOutcome>, SessionError> {
        match self.focus.ok_or(NavigationError::NoFocus)? {
            FocusTarget::Submit => Ok(None),
            FocusTarget::Check(index) => {
                let Some(check) = self.sequence.get(index) else {
                    return Ok(None);
                };
                let id = check.id.clone();
                self.answer(&id, answer).map(Some)
            }
        }
    }

    /// Record `answer` for `id`, focus that check, then advance forward using
    /// the state after the write.
    pub fn answer(&mut self, id: &CheckId, answer: Answer) -> Result<AnswerOutcome, SessionError> {
        self.responses.record(&self.sequence, id, answer)?;

        if let Some(index) = self.sequence.position(id) {
            self.focus = Some(FocusTarget::Check(index));
        }
        let focus = self.navigate(Direction::Forward)?;

        Ok(AnswerOutcome {
            check: id.clone(),
            answer,
            focus,
        })
    }
}
