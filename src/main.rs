use quizforge_backend::config::Config;
use quizforge_backend::stores::memory::{MemoryAttemptStore, MemoryQuizStore, MemoryUserStore};
use quizforge_backend::AppState;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Smoke tool: generates one quiz on the topic given as the first argument
/// and prints it. Exercises the full config -> client -> generation ->
/// validation -> store path against the real model API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let topic = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "general knowledge".to_string());
    let difficulty = std::env::args().nth(2);

    let state = AppState::new(
        &config,
        Arc::new(MemoryQuizStore::new()),
        Arc::new(MemoryUserStore::new()),
        Arc::new(MemoryAttemptStore::new()),
    )?;

    info!(%topic, "requesting quiz generation");
    let quiz = state
        .quiz_service
        .create_quiz(quizforge_backend::dto::quiz_dto::GenerateQuizRequest {
            topic,
            difficulty,
            created_by: Uuid::new_v4().to_string(),
        })
        .await?;

    println!("{}", serde_json::to_string_pretty(&quiz)?);
    Ok(())
}
