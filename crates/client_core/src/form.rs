//! Form state and its transitions.
//!
//! Every user action and every network settlement is a [`FormEvent`]. Applying
//! an event mutates [`FormState`] and may yield an [`Effect`] describing the
//! network work the caller must perform; nothing in here touches the network.

use std::path::{Path, PathBuf};

use hdp_shared::{
    domain::{ApiKey, InputEntry, ProgramHash, Visibility},
    error::ServiceOutcome,
    protocol::BatchQueryRequest,
    status::{RequestStatus, UploadStatus},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FormError;

/// Sequence number of one invocation against a status field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InvocationTicket(pub u64);

/// A status field plus the latest ticket issued for it. Only the settlement
/// carrying the latest ticket may overwrite the status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSlot<S> {
    current: Option<S>,
    latest: u64,
}

impl<S> Default for StatusSlot<S> {
    fn default() -> Self {
        Self {
            current: None,
            latest: 0,
        }
    }
}

impl<S: Copy> StatusSlot<S> {
    pub fn current(&self) -> Option<S> {
        self.current
    }

    pub fn latest_ticket(&self) -> Option<InvocationTicket> {
        (self.latest > 0).then_some(InvocationTicket(self.latest))
    }

    fn issue(&mut self, status: S) -> InvocationTicket {
        self.latest += 1;
        self.current = Some(status);
        InvocationTicket(self.latest)
    }

    fn settle(&mut self, ticket: InvocationTicket, status: S) -> bool {
        if ticket.0 != self.latest {
            return false;
        }
        self.current = Some(status);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedProgramFile {
    pub path: PathBuf,
    pub file_name: String,
}

impl SelectedProgramFile {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, file_name }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEdit {
    Visibility(Visibility),
    Value(String),
}

impl InputEdit {
    /// Builds an edit from a field name (`visibility` or `value`) and raw text.
    pub fn parse(field: &str, new_value: &str) -> Result<Self, FormError> {
        match field {
            "visibility" => Ok(InputEdit::Visibility(new_value.parse()?)),
            "value" => Ok(InputEdit::Value(new_value.to_string())),
            other => Err(FormError::UnknownInputField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Picking a file starts its upload.
    ProgramSelected(SelectedProgramFile),
    ApiKeyChanged(String),
    ProgramHashChanged(String),
    InputAdded,
    InputEdited {
        index: usize,
        edit: InputEdit,
    },
    SubmitRequested,
    UploadSettled {
        ticket: InvocationTicket,
        outcome: ServiceOutcome,
    },
    SubmitSettled {
        ticket: InvocationTicket,
        outcome: ServiceOutcome,
    },
}

/// Network work requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Upload {
        ticket: InvocationTicket,
        file: SelectedProgramFile,
    },
    SubmitBatchQuery {
        ticket: InvocationTicket,
        api_key: ApiKey,
        request: BatchQueryRequest,
    },
}

impl Effect {
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Upload { .. } => "upload_program",
            Effect::SubmitBatchQuery { .. } => "submit_batch_query",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    selected_program: Option<SelectedProgramFile>,
    api_key: ApiKey,
    program_hash: ProgramHash,
    inputs: Vec<InputEntry>,
    upload: StatusSlot<UploadStatus>,
    request: StatusSlot<RequestStatus>,
    max_input_entries: Option<usize>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            selected_program: None,
            api_key: ApiKey::default(),
            program_hash: ProgramHash::default(),
            inputs: vec![InputEntry::default()],
            upload: StatusSlot::default(),
            request: StatusSlot::default(),
            max_input_entries: None,
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of input rows; `None` leaves the list unbounded.
    pub fn with_input_limit(mut self, max_input_entries: Option<usize>) -> Self {
        self.max_input_entries = max_input_entries;
        self
    }

    pub fn selected_program(&self) -> Option<&SelectedProgramFile> {
        self.selected_program.as_ref()
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn program_hash(&self) -> &ProgramHash {
        &self.program_hash
    }

    pub fn inputs(&self) -> &[InputEntry] {
        &self.inputs
    }

    pub fn upload_status(&self) -> Option<UploadStatus> {
        self.upload.current()
    }

    pub fn request_status(&self) -> Option<RequestStatus> {
        self.request.current()
    }

    pub fn upload_slot(&self) -> &StatusSlot<UploadStatus> {
        &self.upload
    }

    pub fn request_slot(&self) -> &StatusSlot<RequestStatus> {
        &self.request
    }

    pub fn apply(&mut self, event: FormEvent) -> Result<Option<Effect>, FormError> {
        match event {
            FormEvent::ProgramSelected(file) => {
                let ticket = self.upload.issue(UploadStatus::Uploading);
                self.selected_program = Some(file.clone());
                Ok(Some(Effect::Upload { ticket, file }))
            }
            FormEvent::ApiKeyChanged(text) => {
                self.api_key = ApiKey(text);
                Ok(None)
            }
            FormEvent::ProgramHashChanged(text) => {
                self.program_hash = ProgramHash(text);
                Ok(None)
            }
            FormEvent::InputAdded => {
                if let Some(limit) = self.max_input_entries {
                    if self.inputs.len() >= limit {
                        return Err(FormError::InputLimitReached { limit });
                    }
                }
                self.inputs.push(InputEntry::default());
                Ok(None)
            }
            FormEvent::InputEdited { index, edit } => {
                let len = self.inputs.len();
                let entry = self
                    .inputs
                    .get_mut(index)
                    .ok_or(FormError::InputIndexOutOfRange { index, len })?;
                match edit {
                    InputEdit::Visibility(visibility) => entry.visibility = visibility,
                    InputEdit::Value(value) => entry.value = value,
                }
                Ok(None)
            }
            FormEvent::SubmitRequested => Ok(self.begin_submit()),
            FormEvent::UploadSettled { ticket, outcome } => {
                if !self.upload.settle(ticket, UploadStatus::settled(outcome)) {
                    debug!(ticket = ticket.0, ?outcome, "discarding stale upload result");
                }
                Ok(None)
            }
            FormEvent::SubmitSettled { ticket, outcome } => {
                if !self.request.settle(ticket, RequestStatus::settled(outcome)) {
                    debug!(ticket = ticket.0, ?outcome, "discarding stale batch query result");
                }
                Ok(None)
            }
        }
    }

    fn begin_submit(&mut self) -> Option<Effect> {
        // Validation failures take a ticket too so an older in-flight request
        // cannot overwrite the message.
        if self.api_key.is_empty() {
            self.request.issue(RequestStatus::MissingApiKey);
            return None;
        }
        if self.program_hash.is_empty() {
            self.request.issue(RequestStatus::MissingProgramHash);
            return None;
        }

        let ticket = self.request.issue(RequestStatus::Sending);
        Some(Effect::SubmitBatchQuery {
            ticket,
            api_key: self.api_key.clone(),
            request: BatchQueryRequest::module(self.program_hash.clone(), self.inputs.clone()),
        })
    }
}
