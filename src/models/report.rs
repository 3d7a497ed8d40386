use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Typed view of the performance report the model is prompted to produce.
///
/// The report pipeline itself returns the parsed JSON untyped and does not
/// validate it against this schema; deserializing into `Report` is the
/// opt-in conformance check for callers that want one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub summary: String,
    pub score: ReportScore,
    pub strengths: Vec<Strength>,
    pub weaknesses: Vec<Weakness>,
    #[serde(rename = "studyPlan7Days")]
    pub study_plan_7_days: Vec<StudyPlanDay>,
    pub next_steps: Vec<String>,
    pub confidence: String,
    /// Present only when the score is 100%.
    #[serde(default)]
    pub advanced_path: Option<AdvancedPath>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportScore {
    pub correct: i64,
    pub total: i64,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strength {
    pub question_id: String,
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weakness {
    pub question_id: String,
    pub selected_answer: String,
    pub correct_answer: String,
    pub inferred_topic: String,
    pub short_tip: String,
    pub recommended_exercises: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlanDay {
    pub day: i32,
    pub task: String,
    pub duration_min: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedPath {
    pub suggested_topics: Vec<String>,
    pub projects: Vec<String>,
    pub time_estimate_weeks: i32,
}

impl Report {
    pub fn from_value(value: &JsonValue) -> serde_json::Result<Self> {
        serde_json::from_value(value.clone())
    }
}
