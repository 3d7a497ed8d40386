use crate::dto::report_dto::GenerateReportRequest;
use crate::error::{Error, Result};
use crate::models::attempt::Attempt;
use crate::services::ai_service::{extract_text, GenerationOptions, TextGenerator};
use crate::stores::{AttemptStore, QuizStore, UserStore};
use crate::utils::ids::parse_id;
use crate::utils::json::coerce_json_object;
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use validator::Validate;

const REPORT_TEMPERATURE: f32 = 0.2;

#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub attempt: Attempt,
    /// Parsed model JSON, returned as-is without schema validation.
    pub report: JsonValue,
}

#[derive(Clone)]
pub struct ReportService {
    quizzes: Arc<dyn QuizStore>,
    users: Arc<dyn UserStore>,
    attempts: Arc<dyn AttemptStore>,
    generator: Arc<dyn TextGenerator>,
}

impl ReportService {
    pub fn new(
        quizzes: Arc<dyn QuizStore>,
        users: Arc<dyn UserStore>,
        attempts: Arc<dyn AttemptStore>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            quizzes,
            users,
            attempts,
            generator,
        }
    }

    /// Generate a performance report for the user's latest attempt on a
    /// quiz. Regenerated on every call, no caching, exactly one model
    /// invocation; any failure is terminal for the request.
    pub async fn generate_report(&self, req: GenerateReportRequest) -> Result<ReportOutput> {
        req.validate()?;
        let quiz_id = parse_id(&req.quiz_id)?;
        let user_id = parse_id(&req.user_id)?;

        self.quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
        let attempt = self
            .attempts
            .find_latest(quiz_id, user_id)
            .await?
            .ok_or_else(|| Error::NotFound("No attempt found".to_string()))?;

        let prompt = build_report_prompt(&attempt)?;
        tracing::debug!(attempt_id = %attempt.id, "invoking report model");

        let raw = self
            .generator
            .generate_text(&prompt, GenerationOptions::json(REPORT_TEMPERATURE))
            .await?;

        let text = extract_text(&raw);
        let report = coerce_json_object(&text).ok_or_else(|| {
            tracing::error!(attempt_id = %attempt.id, "model returned unparseable report");
            Error::ReportParse { raw_text: text }
        })?;

        tracing::info!(attempt_id = %attempt.id, "report generated");
        Ok(ReportOutput { attempt, report })
    }
}

/// Deterministic prompt embedding the full attempt payload. String length
/// caps and the conditional `advancedPath` are instructions to the model,
/// not validated on the response.
fn build_report_prompt(attempt: &Attempt) -> Result<String> {
    let attempt_json = serde_json::to_string(&json!({ "attempt": attempt }))?;

    Ok(format!(
        r#"You analyze ONE quiz attempt and output ONLY valid JSON following the SCHEMA below.

Keep all strings <= 140 chars.
If percent == 100, include "advancedPath".
If topic cannot be inferred, use "general review".

SCHEMA:
{{
  "summary": string,
  "score": {{ "correct": int, "total": int, "percent": number }},
  "strengths": [ {{ "questionId": string, "note": string }} ],
  "weaknesses": [
    {{
      "questionId": string,
      "selectedAnswer": string,
      "correctAnswer": string,
      "inferredTopic": string,
      "shortTip": string,
      "recommendedExercises": [ string ]
    }}
  ],
  "studyPlan7Days": [
    {{ "day": int, "task": string, "durationMin": int }}
  ],
  "nextSteps": [ string ],
  "confidence": string,
  "advancedPath": null | {{
    "suggestedTopics": [ string ],
    "projects": [ string ],
    "timeEstimateWeeks": int
  }}
}}

ANALYZE_ATTEMPT_JSON:
{attempt_json}
"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attempt::AnswerRecord;
    use crate::services::ai_service::MockTextGenerator;
    use crate::stores::memory::{MemoryAttemptStore, MemoryQuizStore, MemoryUserStore};
    use crate::stores::AttemptStore as _;
    use crate::models::quiz::{Question, Quiz};
    use crate::models::user::User;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_attempt() -> Attempt {
        Attempt {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            quiz_id: Uuid::new_v4(),
            answers: vec![AnswerRecord {
                question_id: Uuid::new_v4(),
                selected_answer: "Paris".to_string(),
                correct_answer: "Paris".to_string(),
                is_correct: true,
            }],
            score: 1,
            attempted_at: Utc::now(),
        }
    }

    #[test]
    fn prompt_embeds_attempt_and_schema_rules() {
        let attempt = sample_attempt();
        let prompt = build_report_prompt(&attempt).unwrap();
        assert!(prompt.contains(&attempt.id.to_string()));
        assert!(prompt.contains("\"selectedAnswer\":\"Paris\""));
        assert!(prompt.contains("If percent == 100, include \"advancedPath\""));
        assert!(prompt.contains("studyPlan7Days"));
    }

    #[tokio::test]
    async fn propagates_upstream_failures_without_retry() {
        let quizzes = Arc::new(MemoryQuizStore::new());
        let users = Arc::new(MemoryUserStore::new());
        let attempts = Arc::new(MemoryAttemptStore::new());

        let quiz = Quiz {
            id: Uuid::new_v4(),
            title: "t".into(),
            description: "d".into(),
            questions: vec![Question {
                id: Uuid::new_v4(),
                text: "q".into(),
                options: vec!["a".into(), "b".into()],
                correct_answer: "a".into(),
            }],
            created_by: Uuid::new_v4(),
            participants: Vec::new(),
            created_at: Utc::now(),
            is_live: true,
        };
        let user = User {
            id: Uuid::new_v4(),
            username: "kai".into(),
            first_name: "Kai".into(),
            last_name: "Rivera".into(),
            email: "kai@example.com".into(),
            is_verified: true,
            attempted_quizzes: vec![],
        };
        crate::stores::QuizStore::insert(&*quizzes, quiz.clone())
            .await
            .unwrap();
        users.insert(user.clone()).await;
        attempts
            .create(crate::models::attempt::NewAttempt {
                user_id: user.id,
                quiz_id: quiz.id,
                answers: vec![],
                score: 0,
            })
            .await
            .unwrap();

        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate_text()
            .times(1)
            .returning(|_, _| Err(Error::Upstream("model exploded".to_string())));

        let service = ReportService::new(quizzes, users, attempts, Arc::new(generator));
        let err = service
            .generate_report(GenerateReportRequest {
                quiz_id: quiz.id.to_string(),
                user_id: user.id.to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Upstream(_)));
        assert_eq!(err.status_code(), http::StatusCode::BAD_GATEWAY);
    }
}
