use crate::dto::attempt_dto::{
    AnswerView, AttemptQuizView, AttemptUserView, AttemptView, DashboardRow,
    SubmitAttemptRequest, SubmittedAnswer,
};
use crate::error::{Error, Result};
use crate::models::attempt::{AnswerRecord, Attempt, NewAttempt};
use crate::models::quiz::Quiz;
use crate::stores::{AttemptStore, QuizStore, UserStore};
use crate::utils::ids::parse_id;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct ScoringService {
    quizzes: Arc<dyn QuizStore>,
    users: Arc<dyn UserStore>,
    attempts: Arc<dyn AttemptStore>,
}

impl ScoringService {
    pub fn new(
        quizzes: Arc<dyn QuizStore>,
        users: Arc<dyn UserStore>,
        attempts: Arc<dyn AttemptStore>,
    ) -> Self {
        Self {
            quizzes,
            users,
            attempts,
        }
    }

    /// Score a submission against its quiz and persist a fresh attempt.
    ///
    /// The attempt write and the history append are two independent writes
    /// with no transaction around them; if the append fails the attempt
    /// still exists, and the error is surfaced rather than masked.
    pub async fn submit_attempt(&self, req: SubmitAttemptRequest) -> Result<AttemptView> {
        req.validate()?;
        let quiz_id = parse_id(&req.quiz_id)?;
        let user_id = parse_id(&req.user_id)?;

        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| Error::NotFound("Quiz not found".to_string()))?;

        let (answers, score) = Self::score_submission(&quiz, &req.answers);

        let attempt = self
            .attempts
            .create(NewAttempt {
                user_id,
                quiz_id,
                answers,
                score,
            })
            .await?;
        tracing::info!(attempt_id = %attempt.id, %quiz_id, %user_id, score, "attempt recorded");

        self.users.append_attempt_ref(user_id, attempt.id).await?;

        self.resolve_view(attempt, &quiz).await
    }

    /// Pure scoring pass. Entries whose question id is malformed or not part
    /// of the quiz are dropped silently, never an error; correctness is
    /// exact, case-sensitive string equality with no trimming.
    pub fn score_submission(
        quiz: &Quiz,
        answers: &[SubmittedAnswer],
    ) -> (Vec<AnswerRecord>, i32) {
        let mut records = Vec::new();
        let mut score = 0;

        for submitted in answers {
            let Ok(question_id) = Uuid::parse_str(&submitted.question_id) else {
                continue;
            };
            let Some(question) = quiz.find_question(question_id) else {
                continue;
            };

            let is_correct = question.correct_answer == submitted.selected_answer;
            if is_correct {
                score += 1;
            }
            records.push(AnswerRecord {
                question_id,
                selected_answer: submitted.selected_answer.clone(),
                correct_answer: question.correct_answer.clone(),
                is_correct,
            });
        }

        (records, score)
    }

    /// Attempt history for a user merged with quiz metadata, most recent
    /// first. A deleted quiz still yields a row with placeholder metadata.
    pub async fn dashboard(&self, user_id: &str) -> Result<Vec<DashboardRow>> {
        let user_id = parse_id(user_id)?;
        let attempts = self.attempts.find_by_user(user_id).await?;
        if attempts.is_empty() {
            return Ok(Vec::new());
        }

        let quiz_ids: Vec<Uuid> = attempts.iter().map(|a| a.quiz_id).collect();
        let quizzes = self.quizzes.find_by_ids(&quiz_ids).await?;

        let rows = attempts
            .into_iter()
            .map(|attempt| {
                let quiz = quizzes.iter().find(|q| q.id == attempt.quiz_id);
                let correct_answers =
                    attempt.answers.iter().filter(|a| a.is_correct).count();
                DashboardRow {
                    quiz_id: quiz.map(|q| q.id),
                    quiz_title: quiz
                        .map(|q| q.title.clone())
                        .unwrap_or_else(|| "Unknown Quiz".to_string()),
                    quiz_description: quiz
                        .map(|q| q.description.clone())
                        .unwrap_or_default(),
                    total_questions: quiz.map(|q| q.questions.len()).unwrap_or(0),
                    score: attempt.score,
                    attempted_at: attempt.attempted_at,
                    correct_answers,
                }
            })
            .collect();

        Ok(rows)
    }

    async fn resolve_view(&self, attempt: Attempt, quiz: &Quiz) -> Result<AttemptView> {
        let user = self
            .users
            .find_by_id(attempt.user_id)
            .await?
            .map(|u| AttemptUserView {
                id: u.id,
                username: u.username.clone(),
                full_name: u.full_name(),
                email: u.email,
            });

        let answers = attempt
            .answers
            .iter()
            .map(|record| {
                let question = quiz.find_question(record.question_id);
                AnswerView {
                    question_id: record.question_id,
                    question_text: question.map(|q| q.text.clone()).unwrap_or_default(),
                    options: question.map(|q| q.options.clone()).unwrap_or_default(),
                    selected_answer: record.selected_answer.clone(),
                    correct_answer: record.correct_answer.clone(),
                    is_correct: record.is_correct,
                }
            })
            .collect();

        Ok(AttemptView {
            id: attempt.id,
            user,
            quiz: AttemptQuizView {
                id: quiz.id,
                title: quiz.title.clone(),
                description: quiz.description.clone(),
            },
            answers,
            score: attempt.score,
            attempted_at: attempt.attempted_at,
        })
    }
}
