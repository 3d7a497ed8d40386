pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod stores;
pub mod utils;

use crate::config::Config;
use crate::services::ai_service::{GeminiClient, TextGenerator};
use crate::services::quiz_service::QuizService;
use crate::services::report_service::ReportService;
use crate::services::scoring_service::ScoringService;
use crate::stores::{AttemptStore, QuizStore, UserStore};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: QuizService,
    pub scoring_service: ScoringService,
    pub report_service: ReportService,
}

impl AppState {
    /// Wire the services against a configuration-constructed Gemini client.
    pub fn new(
        config: &Config,
        quizzes: Arc<dyn QuizStore>,
        users: Arc<dyn UserStore>,
        attempts: Arc<dyn AttemptStore>,
    ) -> crate::error::Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.ai_timeout_secs))
            .build()?;
        let generator: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            http_client,
        ));
        Ok(Self::with_generator(generator, quizzes, users, attempts))
    }

    /// Same wiring with an explicit generator; this is the seam tests and
    /// alternative providers plug into.
    pub fn with_generator(
        generator: Arc<dyn TextGenerator>,
        quizzes: Arc<dyn QuizStore>,
        users: Arc<dyn UserStore>,
        attempts: Arc<dyn AttemptStore>,
    ) -> Self {
        let quiz_service =
            QuizService::new(quizzes.clone(), users.clone(), generator.clone());
        let scoring_service =
            ScoringService::new(quizzes.clone(), users.clone(), attempts.clone());
        let report_service = ReportService::new(quizzes, users, attempts, generator);

        Self {
            quiz_service,
            scoring_service,
            report_service,
        }
    }
}
