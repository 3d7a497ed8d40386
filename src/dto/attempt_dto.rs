use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttemptRequest {
    #[validate(length(min = 1, message = "quizId is required"))]
    pub quiz_id: String,
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub selected_answer: String,
}

/// Attempt resolved for display: user, quiz metadata and question texts are
/// joined in read-only, on top of the persisted record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptView {
    pub id: Uuid,
    pub user: Option<AttemptUserView>,
    pub quiz: AttemptQuizView,
    pub answers: Vec<AnswerView>,
    pub score: i32,
    pub attempted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptUserView {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptQuizView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerView {
    pub question_id: Uuid,
    pub question_text: String,
    pub options: Vec<String>,
    pub selected_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResponse {
    pub success: bool,
    pub attempt: AttemptView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRow {
    pub quiz_id: Option<Uuid>,
    pub quiz_title: String,
    pub quiz_description: String,
    pub total_questions: usize,
    pub score: i32,
    pub attempted_at: DateTime<Utc>,
    pub correct_answers: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub success: bool,
    pub data: Vec<DashboardRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
