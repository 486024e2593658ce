//! Built-in check repository used when no API endpoint is configured.

use std::sync::{Arc, Mutex, PoisonError};

use gatecheck_types::{Check, Submission};

/// In-process repository serving a fixed list of checks.
///
/// Submissions always succeed and are kept so the caller can inspect them.
#[derive(Debug, Clone)]
pub struct SampleRepository {
    checks: Vec<Check>,
    submitted: Arc<Mutex<Vec<Submission>>>,
}

impl SampleRepository {
    /// The document verification checklist, deliberately out of priority order.
    #[must_use]
    pub fn builtin() -> Self {
        Self::with_checks(vec![
            Check::new(
                "aaa",
                10,
                "Face on the picture matches face on the document",
            ),
            Check::new("bbb", 5, "Veriff supports presented document"),
            Check::new("ccc", 7, "Face is clearly visible"),
            Check::new("ddd", 3, "Document data is clearly visible"),
        ])
    }

    #[must_use]
    pub fn with_checks(checks: Vec<Check>) -> Self {
        Self {
            checks,
            submitted: Arc::default(),
        }
    }

    #[must_use]
    pub fn checks(&self) -> Vec<Check> {
        self.checks.clone()
    }

    pub fn record_submission(&self, submission: Submission) {
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(submission);
    }

    /// Submissions received so far, oldest first.
    #[must_use]
    pub fn submitted(&self) -> Vec<Submission> {
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
