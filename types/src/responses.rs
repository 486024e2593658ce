//! The response store and its single gated write.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::check::{CheckId, CheckSequence};

/// Answer to a check. Serialized as `"yes"` / `"no"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    #[must_use]
    pub const fn as_bool(self) -> bool {
        matches!(self, Self::Yes)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("check {0} is not part of the sequence")]
    UnknownCheck(CheckId),
    #[error("check {id} is locked: the check at position {unanswered} has no answer yet")]
    Locked { id: CheckId, unanswered: usize },
}

/// Sparse map from check id to answer. A missing entry means "unanswered".
///
/// The answered positions always form a contiguous prefix of the sequence the
/// map was written against; [`Responses::record`] is the only way to mutate it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Responses {
    answers: HashMap<CheckId, Answer>,
}

impl Responses {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &CheckId) -> Option<Answer> {
        self.answers.get(id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &CheckId) -> bool {
        self.answers.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = Answer> + '_ {
        self.answers.values().copied()
    }

    /// Records `answer` for `id`.
    ///
    /// Answers before `id` in the sequence are carried forward, every answer
    /// after it is dropped. Unknown ids and checks behind an unanswered one
    /// are rejected and leave the map untouched.
    pub fn record(
        &mut self,
        sequence: &CheckSequence,
        id: &CheckId,
        answer: Answer,
    ) -> Result<(), RecordError> {
        let index = sequence
            .position(id)
            .ok_or_else(|| RecordError::UnknownCheck(id.clone()))?;

        let mut next = HashMap::with_capacity(index + 1);
        for (position, earlier) in sequence.ids().take(index).enumerate() {
            let Some(previous) = self.answers.get(earlier) else {
                return Err(RecordError::Locked {
                    id: id.clone(),
                    unanswered: position,
                });
            };
            next.insert(earlier.clone(), *previous);
        }
        next.insert(id.clone(), answer);

        self.answers = next;
        Ok(())
    }
}
