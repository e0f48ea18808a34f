//! Request bodies and fixed identifiers of the registry and batch query services.

use serde::{Deserialize, Serialize};

use crate::domain::{InputEntry, ProgramHash};

/// Target execution context of every submitted batch query.
pub const DESTINATION_CHAIN_ID: &str = "11155111";

/// Multipart field that carries the program file.
pub const PROGRAM_FORM_FIELD: &str = "program";
pub const UPLOAD_PROGRAM_PATH: &str = "upload-program";
pub const SUBMIT_BATCH_QUERY_PATH: &str = "submit-batch-query";
/// Query parameter that carries the API key on batch submissions.
pub const API_KEY_QUERY_PARAM: &str = "apiKey";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    #[default]
    Module,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTask {
    #[serde(rename = "type")]
    pub kind: TaskKind,
    pub program_hash: ProgramHash,
    pub inputs: Vec<InputEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchQueryRequest {
    pub destination_chain_id: String,
    pub tasks: Vec<BatchTask>,
}

impl BatchQueryRequest {
    /// Builds the single-module request the quick start form submits.
    pub fn module(program_hash: ProgramHash, inputs: Vec<InputEntry>) -> Self {
        Self {
            destination_chain_id: DESTINATION_CHAIN_ID.to_string(),
            tasks: vec![BatchTask {
                kind: TaskKind::Module,
                program_hash,
                inputs,
            }],
        }
    }
}
