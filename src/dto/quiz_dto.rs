use crate::models::quiz::Quiz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    #[validate(length(min = 1, message = "topic is required"))]
    pub topic: String,
    pub difficulty: Option<String>,
    #[validate(length(min = 1, message = "creator id is required"))]
    pub created_by: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub success: bool,
    pub quiz: Quiz,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDetailResponse {
    pub success: bool,
    pub quiz: Quiz,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<QuizCreatorView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizCreatorView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}
