//! State machine for a single invitation request
//!
//! `Start → ValidateInput → {Rejected | ResolveUser}`,
//! `ResolveUser → {ResolutionFailed | SendInvite}`,
//! `SendInvite → {InviteFailed | Succeeded}`.
//!
//! Every terminal state is a normal outcome answered to the caller.

use orgdesk_common::Error;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Errors that can occur during state transitions
#[derive(Debug, ThisError, Clone, PartialEq)]
pub enum StateError {
    #[error("Invalid transition: cannot apply {event} in state {from}")]
    InvalidTransition { from: String, event: String },

    #[error("Terminal state: {0} is a terminal state and cannot transition")]
    TerminalState(String),
}

impl From<StateError> for Error {
    fn from(err: StateError) -> Self {
        Error::Internal(err.to_string())
    }
}

/// Invitation request states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationState {
    Start,
    ValidateInput,
    Rejected,
    ResolveUser,
    ResolutionFailed,
    SendInvite,
    InviteFailed,
    Succeeded,
}

impl InvitationState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Rejected | Self::ResolutionFailed | Self::InviteFailed | Self::Succeeded
        )
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [InvitationState] {
        match self {
            Self::Start => &[Self::ValidateInput],
            Self::ValidateInput => &[Self::Rejected, Self::ResolveUser],
            Self::ResolveUser => &[Self::ResolutionFailed, Self::SendInvite],
            Self::SendInvite => &[Self::InviteFailed, Self::Succeeded],
            Self::Rejected | Self::ResolutionFailed | Self::InviteFailed | Self::Succeeded => &[],
        }
    }
}

impl std::fmt::Display for InvitationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::ValidateInput => write!(f, "validate_input"),
            Self::Rejected => write!(f, "rejected"),
            Self::ResolveUser => write!(f, "resolve_user"),
            Self::ResolutionFailed => write!(f, "resolution_failed"),
            Self::SendInvite => write!(f, "send_invite"),
            Self::InviteFailed => write!(f, "invite_failed"),
            Self::Succeeded => write!(f, "succeeded"),
        }
    }
}

/// Events that drive an invitation request forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationEvent {
    /// Request body received
    Receive,
    /// Input failed validation
    Reject,
    /// Input passed validation
    Accept,
    /// Username resolved to an id
    Resolve,
    /// Username could not be resolved
    FailResolution,
    /// Directory accepted the invitation
    Invite,
    /// Directory refused the invitation
    FailInvite,
}

impl std::fmt::Display for InvitationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Receive => write!(f, "receive"),
            Self::Reject => write!(f, "reject"),
            Self::Accept => write!(f, "accept"),
            Self::Resolve => write!(f, "resolve"),
            Self::FailResolution => write!(f, "fail_resolution"),
            Self::Invite => write!(f, "invite"),
            Self::FailInvite => write!(f, "fail_invite"),
        }
    }
}

/// Invitation state machine
pub struct InvitationStateMachine;

impl InvitationStateMachine {
    /// Attempt a state transition
    pub fn transition(
        current: InvitationState,
        event: InvitationEvent,
    ) -> Result<InvitationState, StateError> {
        if current.is_terminal() {
            return Err(StateError::TerminalState(current.to_string()));
        }

        let next = match (current, event) {
            (InvitationState::Start, InvitationEvent::Receive) => InvitationState::ValidateInput,
            (InvitationState::ValidateInput, InvitationEvent::Reject) => InvitationState::Rejected,
            (InvitationState::ValidateInput, InvitationEvent::Accept) => {
                InvitationState::ResolveUser
            }
            (InvitationState::ResolveUser, InvitationEvent::FailResolution) => {
                InvitationState::ResolutionFailed
            }
            (InvitationState::ResolveUser, InvitationEvent::Resolve) => InvitationState::SendInvite,
            (InvitationState::SendInvite, InvitationEvent::FailInvite) => {
                InvitationState::InviteFailed
            }
            (InvitationState::SendInvite, InvitationEvent::Invite) => InvitationState::Succeeded,
            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }
}

/// Tracks one request through the state machine, logging each step
#[derive(Debug)]
pub struct InvitationFlow {
    state: InvitationState,
}

impl InvitationFlow {
    /// A flow waiting for its request body
    pub fn new() -> Self {
        Self {
            state: InvitationState::Start,
        }
    }

    pub fn state(&self) -> InvitationState {
        self.state
    }

    /// Apply `event`, moving to the next state
    pub fn apply(&mut self, event: InvitationEvent) -> Result<InvitationState, StateError> {
        let next = InvitationStateMachine::transition(self.state, event).inspect_err(|e| {
            tracing::error!(
                state = %self.state,
                event = %event,
                allowed = ?self.state.valid_transitions(),
                error = %e,
                "Rejected invitation state transition"
            );
        })?;
        tracing::debug!(from = %self.state, to = %next, event = %event, "Invitation state transition");
        self.state = next;
        Ok(next)
    }
}

impl Default for InvitationFlow {
    fn default() -> Self {
        Self::new()
    }
}
