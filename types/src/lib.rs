//! Core domain types for gatecheck.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! It holds the whole gating discipline:
//!
//! - [`CheckSequence`] - checks in canonical (priority) order
//! - [`Responses`] - the sparse answer store and its single gated write
//! - [`gate`] - per-check [`GateStatus`] and the submission gate
//! - [`focus`] - focus traversal over the eligible targets
//! - [`FormSession`] - one owner for all of the above plus the focus cursor

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod check;
pub mod focus;
pub mod gate;
mod options;
mod responses;
mod session;
mod submission;
mod text;

pub use check::{Check, CheckId, CheckSequence};
pub use focus::{Direction, FocusTarget, NavigationError};
pub use gate::GateStatus;
pub use options::UiOptions;
pub use responses::{Answer, RecordError, Responses};
pub use session::{AnswerOutcome, FocusOutcome, FormSession, SessionError};
pub use submission::{CheckResult, Submission};
pub use text::display_line;
