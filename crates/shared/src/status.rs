//! Human-readable status lines shown under the form.

use serde::{Deserialize, Serialize};

use crate::error::{FailureKind, ServiceOutcome};

/// Lifecycle position of a shown status; a field with no status yet is idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPhase {
    Pending,
    Success,
    Failure(FailureKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Uploading,
    Uploaded,
    Rejected,
    Errored,
}

impl UploadStatus {
    pub fn message(self) -> &'static str {
        match self {
            UploadStatus::Uploading => "Uploading...",
            UploadStatus::Uploaded => "Program uploaded successfully!",
            UploadStatus::Rejected => "Failed to upload program. Please try again.",
            UploadStatus::Errored => "An error occurred while uploading. Please try again.",
        }
    }

    pub fn phase(self) -> StatusPhase {
        match self {
            UploadStatus::Uploading => StatusPhase::Pending,
            UploadStatus::Uploaded => StatusPhase::Success,
            UploadStatus::Rejected => StatusPhase::Failure(FailureKind::Rejected),
            UploadStatus::Errored => StatusPhase::Failure(FailureKind::Transport),
        }
    }

    pub fn settled(outcome: ServiceOutcome) -> Self {
        match outcome {
            ServiceOutcome::Succeeded => UploadStatus::Uploaded,
            ServiceOutcome::Rejected => UploadStatus::Rejected,
            ServiceOutcome::TransportFailed => UploadStatus::Errored,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    MissingApiKey,
    MissingProgramHash,
    Sending,
    Sent,
    Rejected,
    Errored,
}

impl RequestStatus {
    pub fn message(self) -> &'static str {
        match self {
            RequestStatus::MissingApiKey => "Please enter an API key.",
            RequestStatus::MissingProgramHash => "Please enter a program hash.",
            RequestStatus::Sending => "Sending request...",
            RequestStatus::Sent => "Request sent successfully!",
            RequestStatus::Rejected => "Failed to send request. Please try again.",
            RequestStatus::Errored => {
                "An error occurred while sending the request. Please try again."
            }
        }
    }

    pub fn phase(self) -> StatusPhase {
        match self {
            RequestStatus::MissingApiKey | RequestStatus::MissingProgramHash => {
                StatusPhase::Failure(FailureKind::Validation)
            }
            RequestStatus::Sending => StatusPhase::Pending,
            RequestStatus::Sent => StatusPhase::Success,
            RequestStatus::Rejected => StatusPhase::Failure(FailureKind::Rejected),
            RequestStatus::Errored => StatusPhase::Failure(FailureKind::Transport),
        }
    }

    pub fn settled(outcome: ServiceOutcome) -> Self {
        match outcome {
            ServiceOutcome::Succeeded => RequestStatus::Sent,
            ServiceOutcome::Rejected => RequestStatus::Rejected,
            ServiceOutcome::TransportFailed => RequestStatus::Errored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_never_read_as_pending() {
        assert_ne!(
            UploadStatus::settled(ServiceOutcome::TransportFailed).phase(),
            StatusPhase::Pending
        );
        assert_eq!(
            RequestStatus::settled(ServiceOutcome::TransportFailed).message(),
            "An error occurred while sending the request. Please try again."
        );
    }

    #[test]
    fn validation_messages_are_failures() {
        assert_eq!(
            RequestStatus::MissingApiKey.phase(),
            StatusPhase::Failure(FailureKind::Validation)
        );
        assert_eq!(
            RequestStatus::MissingProgramHash.message(),
            "Please enter a program hash."
        );
    }
}
