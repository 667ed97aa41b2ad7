// src/models.rs
use serde::{Deserialize, Serialize};

/// Body of `POST /transpile`.
#[derive(Deserialize, Debug, Clone)]
pub struct BuildRequest {
    pub code: String,
}

/// Outcome of one transpile call. Exactly one of bundled code or error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildResult {
    Success { code: String },
    Failure { error: String },
}

impl BuildResult {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildResult::Success { .. })
    }
}

/// Wire shape of the transpile response: `{success, code}` or `{success, error}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TranspileResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranspileResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            code: None,
            error: Some(error.into()),
        }
    }
}

impl From<BuildResult> for TranspileResponse {
    fn from(result: BuildResult) -> Self {
        match result {
            BuildResult::Success { code } => Self {
                success: true,
                code: Some(code),
                error: None,
            },
            BuildResult::Failure { error } => Self::failure(error),
        }
    }
}
