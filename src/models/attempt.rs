use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: Uuid,
    pub selected_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// One persisted quiz attempt. Immutable after creation; every submission
/// creates a new record, never an upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub answers: Vec<AnswerRecord>,
    /// Count of correct answers among the processed (non-dropped) entries.
    pub score: i32,
    pub attempted_at: DateTime<Utc>,
}

/// Input to the attempt store, which owns id generation and timestamping.
#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub user_id: Uuid,
    pub quiz_id: Uuid,
    pub answers: Vec<AnswerRecord>,
    pub score: i32,
}
