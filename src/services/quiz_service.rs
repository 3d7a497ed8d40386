use crate::dto::quiz_dto::GenerateQuizRequest;
use crate::error::{Error, Result};
use crate::models::quiz::{Question, Quiz, MAX_OPTIONS, MIN_OPTIONS};
use crate::models::user::User;
use crate::services::ai_service::{extract_text, GenerationOptions, TextGenerator};
use crate::stores::{QuizStore, UserStore};
use crate::utils::ids::parse_id;
use crate::utils::json::coerce_json_object;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

const QUIZ_TEMPERATURE: f32 = 0.7;

/// Shape the model is asked to produce for a new quiz.
#[derive(Debug, Deserialize)]
struct QuizDraft {
    title: String,
    description: String,
    questions: Vec<QuestionDraft>,
}

#[derive(Debug, Deserialize)]
struct QuestionDraft {
    question: String,
    options: Vec<String>,
    answer: String,
}

#[derive(Clone)]
pub struct QuizService {
    quizzes: Arc<dyn QuizStore>,
    users: Arc<dyn UserStore>,
    generator: Arc<dyn TextGenerator>,
}

impl QuizService {
    pub fn new(
        quizzes: Arc<dyn QuizStore>,
        users: Arc<dyn UserStore>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            quizzes,
            users,
            generator,
        }
    }

    /// Generate a quiz on a topic with the model and persist it, not live.
    /// The draft is schema-validated before anything is written: question
    /// counts, option counts and the correct-answer-in-options invariant are
    /// all enforced here and nowhere else.
    pub async fn create_quiz(&self, req: GenerateQuizRequest) -> Result<Quiz> {
        req.validate()?;
        let created_by = parse_id(&req.created_by)?;

        let prompt = build_quiz_prompt(&req.topic, req.difficulty.as_deref());
        tracing::info!(topic = %req.topic, "generating quiz");

        let raw = self
            .generator
            .generate_text(&prompt, GenerationOptions::text(QUIZ_TEMPERATURE))
            .await?;

        let text = extract_text(&raw);
        let value = coerce_json_object(&text).ok_or_else(|| {
            Error::Upstream("Quiz generation returned no parseable JSON".to_string())
        })?;
        let draft: QuizDraft = serde_json::from_value(value)
            .map_err(|e| Error::BadRequest(format!("Generated quiz has invalid shape: {}", e)))?;

        validate_draft(&draft)?;

        let quiz = Quiz {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            questions: draft
                .questions
                .into_iter()
                .map(|q| Question {
                    id: Uuid::new_v4(),
                    text: q.question,
                    options: q.options,
                    correct_answer: q.answer,
                })
                .collect(),
            created_by,
            participants: Vec::new(),
            created_at: Utc::now(),
            is_live: false,
        };

        let quiz = self.quizzes.insert(quiz).await?;
        tracing::info!(quiz_id = %quiz.id, questions = quiz.questions.len(), "quiz created");
        Ok(quiz)
    }

    /// Quiz plus its resolved creator. A missing creator document is not an
    /// error; the quiz is still returned.
    pub async fn get_quiz(&self, quiz_id: &str) -> Result<(Quiz, Option<User>)> {
        let quiz_id = parse_id(quiz_id)?;
        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| Error::NotFound("Quiz does not exist".to_string()))?;
        let creator = self.users.find_by_id(quiz.created_by).await?;
        Ok((quiz, creator))
    }

    pub async fn make_live(&self, quiz_id: &str) -> Result<()> {
        let quiz_id = parse_id(quiz_id)?;
        self.quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))?;
        self.quizzes.set_live(quiz_id).await
    }

    /// Succeeds only when the quiz exists and is live.
    pub async fn check_status(&self, quiz_id: &str) -> Result<()> {
        let quiz_id = parse_id(quiz_id)?;
        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| Error::NotFound("Quiz does not exist".to_string()))?;
        if !quiz.is_live {
            return Err(Error::Forbidden("Quiz is not live now".to_string()));
        }
        Ok(())
    }

    /// Enroll a user in the quiz's participant roster and return the updated
    /// quiz. Enrolling an already-enrolled user is a no-op, not an error.
    pub async fn add_participant(&self, quiz_id: &str, user_id: &str) -> Result<Quiz> {
        let quiz_id = parse_id(quiz_id)?;
        let user_id = parse_id(user_id)?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
        self.quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))?;

        self.quizzes.add_participant(quiz_id, user_id).await?;
        self.quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))
    }

    /// Succeeds only when `user_id` created the quiz.
    pub async fn check_owner(&self, quiz_id: &str, user_id: &str) -> Result<()> {
        let quiz_id = parse_id(quiz_id)?;
        let user_id = parse_id(user_id)?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::NotFound("User does not exist".to_string()))?;
        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| Error::NotFound("Quiz does not exist".to_string()))?;
        if quiz.created_by != user_id {
            return Err(Error::Unauthorized("Unauthorized user".to_string()));
        }
        Ok(())
    }
}

fn build_quiz_prompt(topic: &str, difficulty: Option<&str>) -> String {
    format!(
        r#"You are an AI quiz generator. Given a topic, generate a quiz in valid JSON format like this:

{{
  "title": "Quiz Title",
  "description": "Brief description",
  "questions": [
    {{
      "question": "What is ...?",
      "options": ["A", "B", "C", "D"],
      "answer": "Correct Option"
    }}
  ]
}}

Rules:
- Generate exactly 5 questions.
- Each question must have 4 options.
- Answers must match one of the options.
- Return JSON only.

Topic: {topic}
Difficulty: {difficulty}
"#,
        topic = topic,
        difficulty = difficulty.unwrap_or("medium"),
    )
}

fn validate_draft(draft: &QuizDraft) -> Result<()> {
    if draft.title.trim().is_empty() {
        return Err(Error::BadRequest("Generated quiz has no title".to_string()));
    }
    if draft.description.trim().is_empty() {
        return Err(Error::BadRequest(
            "Generated quiz has no description".to_string(),
        ));
    }
    if draft.questions.is_empty() {
        return Err(Error::BadRequest(
            "Generated quiz has no questions".to_string(),
        ));
    }
    for question in &draft.questions {
        if question.question.trim().is_empty() {
            return Err(Error::BadRequest(
                "Generated question has empty text".to_string(),
            ));
        }
        if question.options.len() < MIN_OPTIONS || question.options.len() > MAX_OPTIONS {
            return Err(Error::BadRequest(format!(
                "Question '{}' must have between {} and {} options",
                question.question, MIN_OPTIONS, MAX_OPTIONS
            )));
        }
        if !question.options.contains(&question.answer) {
            return Err(Error::BadRequest(format!(
                "Answer '{}' is not one of the options for '{}'",
                question.answer, question.question
            )));
        }
    }
    Ok(())
}
