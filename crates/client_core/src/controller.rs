use hdp_shared::status::{RequestStatus, UploadStatus};
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    error::FormError,
    form::{Effect, FormEvent, FormState, InputEdit, SelectedProgramFile},
    transport::{observe_result, ProgramUpload, QuickStartBackend},
};

/// Runs the network work of an effect and returns the settlement event to
/// feed back into the form state.
pub async fn perform_effect<B>(backend: &B, effect: Effect) -> FormEvent
where
    B: QuickStartBackend + ?Sized,
{
    let operation = effect.name();
    match effect {
        Effect::Upload { ticket, file } => {
            info!(operation, ticket = ticket.0, file = %file.file_name, "uploading program");
            let result = match ProgramUpload::read(&file).await {
                Ok(program) => backend.upload_program(program).await,
                Err(err) => Err(err),
            };
            FormEvent::UploadSettled {
                ticket,
                outcome: observe_result(operation, &result),
            }
        }
        Effect::SubmitBatchQuery {
            ticket,
            api_key,
            request,
        } => {
            info!(
                operation,
                ticket = ticket.0,
                inputs = request.tasks.iter().map(|task| task.inputs.len()).sum::<usize>(),
                "sending batch query"
            );
            let result = backend.submit_batch_query(&api_key, &request).await;
            FormEvent::SubmitSettled {
                ticket,
                outcome: observe_result(operation, &result),
            }
        }
    }
}

/// Owns the form state and mediates the two outbound operations.
///
/// The state lock is only held while applying an event, never across a
/// network call, so overlapping invocations race and the latest ticket wins.
pub struct FormController<B> {
    backend: B,
    state: Mutex<FormState>,
}

impl<B: QuickStartBackend> FormController<B> {
    pub fn new(backend: B) -> Self {
        Self::with_state(backend, FormState::default())
    }

    pub fn with_state(backend: B, state: FormState) -> Self {
        Self {
            backend,
            state: Mutex::new(state),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn snapshot(&self) -> FormState {
        self.state.lock().await.clone()
    }

    pub async fn dispatch(&self, event: FormEvent) -> Result<Option<Effect>, FormError> {
        self.state.lock().await.apply(event)
    }

    pub async fn set_api_key(&self, api_key: impl Into<String>) -> Result<(), FormError> {
        self.dispatch(FormEvent::ApiKeyChanged(api_key.into()))
            .await
            .map(drop)
    }

    pub async fn set_program_hash(&self, program_hash: impl Into<String>) -> Result<(), FormError> {
        self.dispatch(FormEvent::ProgramHashChanged(program_hash.into()))
            .await
            .map(drop)
    }

    /// Appends a default input row and returns the new row count.
    pub async fn add_input(&self) -> Result<usize, FormError> {
        let mut state = self.state.lock().await;
        state.apply(FormEvent::InputAdded)?;
        Ok(state.inputs().len())
    }

    pub async fn edit_input(&self, index: usize, edit: InputEdit) -> Result<(), FormError> {
        self.dispatch(FormEvent::InputEdited { index, edit })
            .await
            .map(drop)
    }

    /// Selects `file` and uploads it. Returns the upload status shown once
    /// this invocation has settled, which is a newer invocation's status if
    /// one overtook it.
    pub async fn upload_program(&self, file: SelectedProgramFile) -> Result<UploadStatus, FormError> {
        if let Some(effect) = self.dispatch(FormEvent::ProgramSelected(file)).await? {
            self.execute(effect).await?;
        }
        Ok(self
            .state
            .lock()
            .await
            .upload_status()
            .unwrap_or(UploadStatus::Uploading))
    }

    /// Validates and submits the batch query. Validation failures return
    /// immediately without touching the network.
    pub async fn submit_batch_query(&self) -> Result<RequestStatus, FormError> {
        if let Some(effect) = self.dispatch(FormEvent::SubmitRequested).await? {
            self.execute(effect).await?;
        }
        Ok(self
            .state
            .lock()
            .await
            .request_status()
            .unwrap_or(RequestStatus::Sending))
    }

    pub async fn execute(&self, effect: Effect) -> Result<(), FormError> {
        let settled = perform_effect(&self.backend, effect).await;
        self.dispatch(settled).await.map(drop)
    }
}
