//! Application phase types.

use gatecheck_client::ClientError;
use gatecheck_types::{Check, FormSession, Submission};

/// Where the application is in its lifecycle.
///
/// Transitions: `Loading -> Form | LoadFailed`, `LoadFailed -> Loading`
/// (reload), `Form -> Submitted`.
#[derive(Debug)]
pub enum Phase {
    Loading,
    LoadFailed { message: String },
    Form(FormState),
    Submitted(Submission),
}

impl Phase {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Loading => "loading",
            Phase::LoadFailed { .. } => "load_failed",
            Phase::Form(_) => "form",
            Phase::Submitted(_) => "submitted",
        }
    }
}

#[derive(Debug)]
pub struct FormState {
    pub(crate) session: FormSession,
    pub(crate) submit: SubmitState,
}

impl FormState {
    pub(crate) fn new(checks: Vec<Check>) -> Self {
        Self {
            session: FormSession::new(checks),
            submit: SubmitState::Idle,
        }
    }

    #[must_use]
    pub fn session(&self) -> &FormSession {
        &self.session
    }

    #[must_use]
    pub fn submit_state(&self) -> &SubmitState {
        &self.submit
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.submit, SubmitState::InFlight)
    }

    /// Banner text for the last failed submission, if any.
    #[must_use]
    pub fn submit_error(&self) -> Option<&str> {
        match &self.submit {
            SubmitState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    InFlight,
    Failed { message: String },
}

/// Results of background network work, delivered to the UI thread.
#[derive(Debug)]
pub(crate) enum NetworkEvent {
    ChecksLoaded(Result<Vec<Check>, ClientError>),
    SubmissionFinished {
        submission: Submission,
        result: Result<(), ClientError>,
    },
}
