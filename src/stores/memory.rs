//! In-memory stores with document-store semantics: per-record writes are
//! serialized by the lock, and there is no atomicity across stores.

use crate::error::Result;
use crate::models::attempt::{Attempt, NewAttempt};
use crate::models::quiz::Quiz;
use crate::models::user::User;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryQuizStore {
    quizzes: RwLock<HashMap<Uuid, Quiz>>,
}

impl MemoryQuizStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl super::QuizStore for MemoryQuizStore {
    async fn insert(&self, quiz: Quiz) -> Result<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        quizzes.insert(quiz.id, quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(ids.iter().filter_map(|id| quizzes.get(id).cloned()).collect())
    }

    async fn set_live(&self, id: Uuid) -> Result<()> {
        let mut quizzes = self.quizzes.write().await;
        if let Some(quiz) = quizzes.get_mut(&id) {
            quiz.is_live = true;
        }
        Ok(())
    }

    async fn add_participant(&self, quiz_id: Uuid, user_id: Uuid) -> Result<()> {
        let mut quizzes = self.quizzes.write().await;
        if let Some(quiz) = quizzes.get_mut(&quiz_id) {
            if !quiz.participants.contains(&user_id) {
                quiz.participants.push(user_id);
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) -> User {
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());
        user
    }
}

#[async_trait]
impl super::UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn append_attempt_ref(&self, user_id: Uuid, attempt_id: Uuid) -> Result<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(&user_id) {
            user.attempted_quizzes.push(attempt_id);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryAttemptStore {
    attempts: RwLock<Vec<Attempt>>,
}

impl MemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.attempts.read().await.len()
    }
}

#[async_trait]
impl super::AttemptStore for MemoryAttemptStore {
    async fn create(&self, attempt: NewAttempt) -> Result<Attempt> {
        let record = Attempt {
            id: Uuid::new_v4(),
            user_id: attempt.user_id,
            quiz_id: attempt.quiz_id,
            answers: attempt.answers,
            score: attempt.score,
            attempted_at: Utc::now(),
        };
        let mut attempts = self.attempts.write().await;
        attempts.push(record.clone());
        Ok(record)
    }

    async fn find_latest(&self, quiz_id: Uuid, user_id: Uuid) -> Result<Option<Attempt>> {
        let attempts = self.attempts.read().await;
        let mut latest: Option<&Attempt> = None;
        for attempt in attempts.iter() {
            if attempt.quiz_id == quiz_id && attempt.user_id == user_id {
                match latest {
                    Some(best) if attempt.attempted_at < best.attempted_at => {}
                    _ => latest = Some(attempt),
                }
            }
        }
        Ok(latest.cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Attempt>> {
        let attempts = self.attempts.read().await;
        let mut mine: Vec<Attempt> = attempts
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        // stable sort then reverse: ties on attempted_at resolve to the
        // later insertion
        mine.sort_by_key(|a| a.attempted_at);
        mine.reverse();
        Ok(mine)
    }
}
