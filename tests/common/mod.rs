#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use quizforge_backend::error::{Error, Result};
use quizforge_backend::models::quiz::{Question, Quiz};
use quizforge_backend::models::user::User;
use quizforge_backend::services::ai_service::{GenerationOptions, TextGenerator};
use quizforge_backend::stores::memory::{MemoryAttemptStore, MemoryQuizStore, MemoryUserStore};
use quizforge_backend::stores::QuizStore;
use serde_json::Value as JsonValue;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Generator that replays a canned response and records every prompt.
pub struct ScriptedGenerator {
    response: JsonValue,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(response: JsonValue) -> Arc<Self> {
        Arc::new(Self {
            response,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_text(&self, prompt: &str, _options: GenerationOptions) -> Result<JsonValue> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.response.clone())
    }
}

pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate_text(&self, _prompt: &str, _options: GenerationOptions) -> Result<JsonValue> {
        Err(Error::Upstream("model unavailable".to_string()))
    }
}

pub struct TestStores {
    pub quizzes: Arc<MemoryQuizStore>,
    pub users: Arc<MemoryUserStore>,
    pub attempts: Arc<MemoryAttemptStore>,
}

pub fn stores() -> TestStores {
    TestStores {
        quizzes: Arc::new(MemoryQuizStore::new()),
        users: Arc::new(MemoryUserStore::new()),
        attempts: Arc::new(MemoryAttemptStore::new()),
    }
}

pub fn sample_user() -> User {
    User {
        id: Uuid::new_v4(),
        username: "mira".to_string(),
        first_name: "Mira".to_string(),
        last_name: "Okafor".to_string(),
        email: "mira@example.com".to_string(),
        is_verified: true,
        attempted_quizzes: Vec::new(),
    }
}

/// Two-question quiz matching the canonical scoring example: Q1 expects
/// "Paris", Q2 expects "42".
pub fn sample_quiz(created_by: Uuid) -> Quiz {
    Quiz {
        id: Uuid::new_v4(),
        title: "Mixed Trivia".to_string(),
        description: "Two classics".to_string(),
        questions: vec![
            Question {
                id: Uuid::new_v4(),
                text: "Capital of France?".to_string(),
                options: vec![
                    "Paris".to_string(),
                    "Lyon".to_string(),
                    "Marseille".to_string(),
                    "Nice".to_string(),
                ],
                correct_answer: "Paris".to_string(),
            },
            Question {
                id: Uuid::new_v4(),
                text: "The answer to life, the universe and everything?".to_string(),
                options: vec!["41".to_string(), "42".to_string(), "43".to_string()],
                correct_answer: "42".to_string(),
            },
        ],
        created_by,
        participants: Vec::new(),
        created_at: Utc::now(),
        is_live: true,
    }
}

pub async fn seed(stores: &TestStores) -> (Quiz, User) {
    let user = stores.users.insert(sample_user()).await;
    let quiz = stores
        .quizzes
        .insert(sample_quiz(user.id))
        .await
        .expect("seed quiz");
    (quiz, user)
}
