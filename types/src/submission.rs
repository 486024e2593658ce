//! Wire payload sent to the submission pipeline.

use serde::{Deserialize, Serialize};

use crate::check::{CheckId, CheckSequence};
use crate::responses::{Answer, Responses};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub check_id: CheckId,
    pub result: Answer,
}

/// `{"results":[{"checkId":"…","result":"yes"|"no"}, …]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub results: Vec<CheckResult>,
}

impl Submission {
    /// Every recorded answer, in sequence order. Unanswered checks are absent.
    #[must_use]
    pub fn from_responses(sequence: &CheckSequence, responses: &Responses) -> Self {
        let results = sequence
            .ids()
            .filter_map(|id| {
                responses.get(id).map(|result| CheckResult {
                    check_id: id.clone(),
                    result,
                })
            })
            .collect();
        Self { results }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
