use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a single invocation of an operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A required field was missing; nothing was sent.
    Validation,
    /// The service answered with a non-2xx status.
    Rejected,
    /// The request never completed or its response could not be read.
    Transport,
}

/// Result of one network round trip, stripped of detail so it can be fed back
/// into the form state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceOutcome {
    Succeeded,
    Rejected,
    TransportFailed,
}

impl ServiceOutcome {
    pub fn failure_kind(self) -> Option<FailureKind> {
        match self {
            ServiceOutcome::Succeeded => None,
            ServiceOutcome::Rejected => Some(FailureKind::Rejected),
            ServiceOutcome::TransportFailed => Some(FailureKind::Transport),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown visibility '{0}', expected 'private' or 'public'")]
pub struct ParseVisibilityError(pub String);
