//! Backend commands queued from UI to backend worker.

use hdp_client::{Effect, InvocationTicket, SelectedProgramFile};
use hdp_shared::{domain::ApiKey, protocol::BatchQueryRequest};

pub enum BackendCommand {
    UploadProgram {
        ticket: InvocationTicket,
        file: SelectedProgramFile,
    },
    SubmitBatchQuery {
        ticket: InvocationTicket,
        api_key: ApiKey,
        request: BatchQueryRequest,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::UploadProgram { .. } => "upload_program",
            BackendCommand::SubmitBatchQuery { .. } => "submit_batch_query",
        }
    }

    pub fn into_effect(self) -> Effect {
        match self {
            BackendCommand::UploadProgram { ticket, file } => Effect::Upload { ticket, file },
            BackendCommand::SubmitBatchQuery {
                ticket,
                api_key,
                request,
            } => Effect::SubmitBatchQuery {
                ticket,
                api_key,
                request,
            },
        }
    }
}

impl From<Effect> for BackendCommand {
    fn from(effect: Effect) -> Self {
        match effect {
            Effect::Upload { ticket, file } => BackendCommand::UploadProgram { ticket, file },
            Effect::SubmitBatchQuery {
                ticket,
                api_key,
                request,
            } => BackendCommand::SubmitBatchQuery {
                ticket,
                api_key,
                request,
            },
        }
    }
}
