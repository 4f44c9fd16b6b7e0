//! Commit controller
//!
//! The submit state machine: `Idle -> Submitting -> Idle`. Validation gates
//! every submit before a payload is built, and the controller itself
//! rejects a second submit while one is in flight; the disabled submit
//! button in the UI is not the only guard.

use crate::domain::profile::{CommitPayload, ProfileDraft};
use crate::editor::validate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum CommitState {
    #[default]
    Idle,
    Submitting,
}

/// What a submit attempt should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Validation failed; no network call is made and the machine stays
    /// `Idle`.
    Rejected(Vec<String>),
    /// A submission is already in flight; this attempt is a no-op.
    InFlight,
    /// Payload built, machine now `Submitting`; send it.
    Send(CommitPayload),
}

#[derive(Debug, Default)]
pub struct CommitController {
    state: CommitState,
}

impl CommitController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.state == CommitState::Submitting
    }

    /// Gate a submit attempt: reject concurrent submissions, validate, and
    /// build the outbound payload. `uploaded_url` is the upload manager's
    /// settled remote URL, if any.
    pub fn begin(&mut self, draft: &ProfileDraft, uploaded_url: Option<&str>) -> SubmitDecision {
        if self.is_submitting() {
            return SubmitDecision::InFlight;
        }

        let validation = validate(draft);
        match CommitPayload::build(draft, uploaded_url) {
            Some(payload) if validation.is_valid() => {
                self.state = CommitState::Submitting;
                SubmitDecision::Send(payload)
            }
            _ => SubmitDecision::Rejected(validation.reasons),
        }
    }

    /// The in-flight submission settled (success or failure); back to
    /// `Idle` so nothing gets stuck.
    pub fn resolve(&mut self) {
        self.state = CommitState::Idle;
    }

    /// Dialog-reset path.
    pub fn reset(&mut self) {
        self.state = CommitState::Idle;
    }
}
