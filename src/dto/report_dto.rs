use crate::models::attempt::Attempt;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    /// Accepted as either `quizId` or legacy `id` in request bodies.
    #[serde(alias = "id")]
    #[validate(length(min = 1, message = "quizId is required"))]
    pub quiz_id: String,
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub success: bool,
    pub attempt: Attempt,
    /// Parsed model output, structurally unvalidated. Callers wanting the
    /// typed schema go through `models::report::Report::from_value`.
    pub report: JsonValue,
}
