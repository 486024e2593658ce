//! Core engine for gatecheck - state machine and orchestration.
//!
//! This crate contains the [`App`] state machine without TUI dependencies.
//! The TUI calls into it from key handlers and renders from its accessors;
//! network work runs on tokio tasks and reports back over a channel that is
//! drained once per frame by [`App::tick`].

use anyhow::Result;
use tokio::sync::mpsc;

use gatecheck_types::{
    Answer, Check, Direction, FocusOutcome, FocusTarget, SessionError, Submission,
};

pub use gatecheck_client::{CheckSource, ClientError, SampleRepository};
pub use gatecheck_types::{self, UiOptions};

mod config;
mod state;

pub use config::{
    API_URL_ENV, ApiConfig, AppConfig, ConfigError, GatecheckConfig, TUI_ENV, config_path,
};
pub use state::{FormState, Phase, SubmitState};

use state::NetworkEvent;

pub struct App {
    source: CheckSource,
    phase: Phase,
    options: UiOptions,
    status_message: Option<String>,
    events_tx: mpsc::UnboundedSender<NetworkEvent>,
    events_rx: mpsc::UnboundedReceiver<NetworkEvent>,
    tick: usize,
    should_quit: bool,
}

impl App {
    /// Create the app and start loading checks from `source`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(source: CheckSource, options: UiOptions) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut app = Self {
            source,
            phase: Phase::Loading,
            options,
            status_message: None,
            events_tx,
            events_rx,
            tick: 0,
            should_quit: false,
        };
        app.spawn_fetch();
        app
    }

    fn spawn_fetch(&mut self) {
        tracing::info!(source = %self.source.describe(), "Loading checks");
        self.phase = Phase::Loading;

        let source = self.source.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch_checks().await;
            // Receiver gone means the app is shutting down.
            let _ = tx.send(NetworkEvent::ChecksLoaded(result));
        });
    }

    /// Re-request the check list after a failed load.
    pub fn reload(&mut self) {
        if matches!(self.phase, Phase::LoadFailed { .. }) {
            self.clear_status();
            self.spawn_fetch();
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn form(&self) -> Option<&FormState> {
        match &self.phase {
            Phase::Form(form) => Some(form),
            _ => None,
        }
    }

    fn form_mut(&mut self) -> Option<&mut FormState> {
        match &mut self.phase {
            Phase::Form(form) => Some(form),
            _ => None,
        }
    }

    /// Form that currently accepts input: loaded, and no submission in flight.
    fn editable_form(&mut self) -> Option<&mut FormState> {
        self.form_mut().filter(|form| !form.is_submitting())
    }

    pub fn ui_options(&self) -> UiOptions {
        self.options
    }

    pub fn source_label(&self) -> String {
        self.source.describe()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn tick_count(&self) -> usize {
        self.tick
    }

    /// Advance the frame counter and apply finished network work.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.process_network_events();
    }

    pub fn process_network_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_network_event(event);
        }
    }

    /// Wait for the next network result and apply it.
    pub async fn wait_for_network(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.apply_network_event(event);
        }
    }

    fn apply_network_event(&mut self, event: NetworkEvent) {
        match event {
            NetworkEvent::ChecksLoaded(result) => self.finish_loading(result),
            NetworkEvent::SubmissionFinished { submission, result } => {
                self.finish_submission(submission, result);
            }
        }
    }

    fn finish_loading(&mut self, result: Result<Vec<Check>, ClientError>) {
        if !matches!(self.phase, Phase::Loading) {
            tracing::debug!(phase = self.phase.name(), "Ignoring stale check list");
            return;
        }

        self.phase = match result {
            Ok(checks) => {
                let form = FormState::new(checks);
                tracing::info!(
                    checks = form.session().sequence().len(),
                    focus = ?form.session().focus(),
                    "Checks loaded"
                );
                Phase::Form(form)
            }
            Err(e) => {
                tracing::warn!("Failed to load checks: {e}");
                Phase::LoadFailed {
                    message: e.to_string(),
                }
            }
        };
    }

    fn finish_submission(
        &mut self,
        submission: Submission,
        result: Result<(), ClientError>,
    ) {
        if !self.form().is_some_and(FormState::is_submitting) {
            tracing::debug!(phase = self.phase.name(), "Ignoring stale submission result");
            return;
        }

        match result {
            Ok(()) => {
                tracing::info!(results = submission.len(), "Submission accepted");
                self.phase = Phase::Submitted(submission);
                self.clear_status();
            }
            Err(e) => {
                tracing::warn!("Submission failed: {e}");
                if let Some(form) = self.form_mut() {
                    form.submit = SubmitState::Failed {
                        message: e.to_string(),
                    };
                }
            }
        }
    }

    /// Move focus one eligible target in `direction`.
    ///
    /// Navigating without a focus cursor is a contract violation and is
    /// returned as an error.
    pub fn navigate(&mut self, direction: Direction) -> Result<()> {
        let Some(form) = self.editable_form() else {
            return Ok(());
        };
        let outcome = form.session.navigate(direction)?;
        log_focus_outcome(outcome);
        self.clear_status();
        Ok(())
    }

    /// A pointer click anywhere re-syncs focus one step forward.
    pub fn click(&mut self) -> Result<()> {
        self.navigate(Direction::Forward)
    }

    /// Answer the focused check, then advance from the post-write state.
    pub fn answer_focused(&mut self, answer: Answer) -> Result<()> {
        let Some(form) = self.editable_form() else {
            return Ok(());
        };

        match form.session.answer_focused(answer) {
            Ok(Some(outcome)) => {
                tracing::debug!(
                    check = %outcome.check,
                    answer = outcome.answer.as_str(),
                    answered = form.session.answered_count(),
                    "Recorded answer"
                );
                log_focus_outcome(outcome.focus);
                if matches!(form.submit, SubmitState::Failed { .. }) {
                    form.submit = SubmitState::Idle;
                }
                self.clear_status();
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(SessionError::Record(e)) => {
                tracing::warn!("Rejected answer: {e}");
                self.set_status(e.to_string());
                Ok(())
            }
            Err(SessionError::Navigation(e)) => Err(e.into()),
        }
    }

    /// `Enter`: submit from the submit control, leave from the thank-you
    /// screen.
    pub fn activate(&mut self) {
        let on_submit = self
            .form()
            .is_some_and(|form| form.session().focus() == Some(FocusTarget::Submit));
        if on_submit {
            self.submit();
        } else if matches!(self.phase, Phase::Submitted(_)) {
            self.request_quit();
        }
    }

    /// Send the responses if the submission gate is open. Returns whether a
    /// submission was started.
    pub fn submit(&mut self) -> bool {
        let source = self.source.clone();
        let tx = self.events_tx.clone();
        let Some(form) = self.editable_form() else {
            return false;
        };
        if !form.session.can_submit() {
            tracing::debug!("Submit ignored: gate closed");
            return false;
        }

        let submission = form.session.submission();
        form.submit = SubmitState::InFlight;
        tracing::info!(results = submission.len(), "Submitting results");

        tokio::spawn(async move {
            let result = source.submit(&submission).await;
            let _ = tx.send(NetworkEvent::SubmissionFinished { submission, result });
        });
        true
    }
}

fn log_focus_outcome(outcome: FocusOutcome) {
    match outcome {
        FocusOutcome::Moved(target) => tracing::trace!(?target, "Focus moved"),
        FocusOutcome::Unchanged => {}
        FocusOutcome::Unfocusable(target) => {
            tracing::warn!(?target, "Focus target cannot take focus; focus unchanged");
        }
    }
}

#[cfg(test)]
mod tests;
