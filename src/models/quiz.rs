use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 6;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Uuid,
    pub text: String,
    /// 2 to 6 entries, enforced when the quiz is created.
    pub options: Vec<String>,
    /// Always equal to one of `options`; enforced at creation time only,
    /// never re-checked during scoring.
    pub correct_answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub created_by: Uuid,
    /// Users enrolled in this quiz. No duplicates; joining twice is a no-op.
    #[serde(default)]
    pub participants: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub is_live: bool,
}

impl Quiz {
    /// Linear scan by id. Ids are unique by construction, so the first match
    /// is the only match.
    pub fn find_question(&self, question_id: Uuid) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}
