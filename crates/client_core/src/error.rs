use std::path::PathBuf;

use hdp_shared::error::{ParseVisibilityError, ServiceOutcome};
use thiserror::Error;

/// Rejected form edits. The state is left untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("input index {index} is out of range for {len} entries")]
    InputIndexOutOfRange { index: usize, len: usize },
    #[error("input list is limited to {limit} entries")]
    InputLimitReached { limit: usize },
    #[error(transparent)]
    InvalidVisibility(#[from] ParseVisibilityError),
    #[error("unknown input field '{0}', expected 'visibility' or 'value'")]
    UnknownInputField(String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service answered, but not with a 2xx status.
    #[error("service responded with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Connection, TLS, or response decoding failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to read program file '{}': {source}", .path.display())]
    ProgramFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ServiceError {
    pub async fn from_response(response: reqwest::Response) -> ServiceError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "failed to read response text".to_string());
        ServiceError::Rejected { status, body }
    }

    pub fn outcome(&self) -> ServiceOutcome {
        match self {
            ServiceError::Rejected { .. } => ServiceOutcome::Rejected,
            ServiceError::Transport(_) | ServiceError::ProgramFile { .. } => {
                ServiceOutcome::TransportFailed
            }
        }
    }
}
