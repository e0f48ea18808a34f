//! HTTP access to the registry and batch query services.

use async_trait::async_trait;
use hdp_shared::{
    domain::ApiKey,
    error::ServiceOutcome,
    protocol::{BatchQueryRequest, API_KEY_QUERY_PARAM, PROGRAM_FORM_FIELD},
};
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use serde_json::Value;
use tracing::{error, info};

use crate::{config::Endpoints, error::ServiceError, form::SelectedProgramFile};

/// Program file contents ready to be sent as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramUpload {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ProgramUpload {
    pub async fn read(file: &SelectedProgramFile) -> Result<Self, ServiceError> {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|source| ServiceError::ProgramFile {
                path: file.path.clone(),
                source,
            })?;
        let mime_type = mime_guess::from_path(&file.path)
            .first_raw()
            .map(str::to_string);

        Ok(Self {
            file_name: file.file_name.clone(),
            mime_type,
            bytes,
        })
    }
}

#[async_trait]
pub trait QuickStartBackend: Send + Sync {
    async fn upload_program(&self, program: ProgramUpload) -> Result<Value, ServiceError>;
    async fn submit_batch_query(
        &self,
        api_key: &ApiKey,
        request: &BatchQueryRequest,
    ) -> Result<Value, ServiceError>;
}

pub struct HttpBackend {
    http: Client,
    endpoints: Endpoints,
}

impl HttpBackend {
    pub fn new(endpoints: Endpoints) -> Self {
        Self::with_client(Client::new(), endpoints)
    }

    pub fn with_client(http: Client, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }
}

#[async_trait]
impl QuickStartBackend for HttpBackend {
    async fn upload_program(&self, program: ProgramUpload) -> Result<Value, ServiceError> {
        let mut part = Part::bytes(program.bytes).file_name(program.file_name);
        if let Some(mime_type) = program.mime_type.as_deref() {
            part = part.mime_str(mime_type)?;
        }
        let form = Form::new().part(PROGRAM_FORM_FIELD, part);

        let response = self
            .http
            .post(self.endpoints.upload_program.clone())
            .multipart(form)
            .send()
            .await?;
        read_json(response).await
    }

    async fn submit_batch_query(
        &self,
        api_key: &ApiKey,
        request: &BatchQueryRequest,
    ) -> Result<Value, ServiceError> {
        let response = self
            .http
            .post(self.endpoints.submit_batch_query.clone())
            .query(&[(API_KEY_QUERY_PARAM, api_key.as_str())])
            .json(request)
            .send()
            .await?;
        read_json(response).await
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, ServiceError> {
    if !response.status().is_success() {
        return Err(ServiceError::from_response(response).await);
    }
    Ok(response.json::<Value>().await?)
}

/// Logs the detail of a finished call and reduces it to the outcome the form
/// state understands.
pub fn observe_result(operation: &'static str, result: &Result<Value, ServiceError>) -> ServiceOutcome {
    match result {
        Ok(body) => {
            info!(operation, response = %body, "service call succeeded");
            ServiceOutcome::Succeeded
        }
        Err(ServiceError::Rejected { status, body }) => {
            error!(operation, status, body = %body, "service rejected request");
            ServiceOutcome::Rejected
        }
        Err(err) => {
            error!(operation, error = %err, "service call failed");
            err.outcome()
        }
    }
}
