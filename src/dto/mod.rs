pub mod attempt_dto;
pub mod quiz_dto;
pub mod report_dto;

use crate::error::Error;
use http::StatusCode;
use serde::Serialize;

/// Failure envelope produced at the request boundary. Every core error maps
/// to exactly one of these plus a status code; nothing is retried.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFailure {
    pub success: bool,
    pub message: String,
    /// Raw model text, attached only when report parsing failed, so callers
    /// can diagnose what the model actually said.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_text: Option<String>,
}

impl ApiFailure {
    pub fn from_error(err: &Error) -> (StatusCode, Self) {
        let model_text = match err {
            Error::ReportParse { raw_text } => Some(raw_text.clone()),
            _ => None,
        };
        (
            err.status_code(),
            Self {
                success: false,
                message: err.to_string(),
                model_text,
            },
        )
    }
}
