pub mod memory;

use crate::error::Result;
use crate::models::attempt::{Attempt, NewAttempt};
use crate::models::quiz::Quiz;
use crate::models::user::User;
use async_trait::async_trait;
use uuid::Uuid;

/// Quiz documents. The scoring and report pipelines only read from this
/// store; writes happen on the quiz-creation path.
#[async_trait]
pub trait QuizStore: Send + Sync {
    async fn insert(&self, quiz: Quiz) -> Result<Quiz>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Quiz>>;
    /// Bulk lookup for dashboard merging. Missing ids are simply absent from
    /// the result, not an error.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Quiz>>;
    async fn set_live(&self, id: Uuid) -> Result<()>;
    /// Add a user to the quiz's participant roster. Idempotent; adding an
    /// already-enrolled user changes nothing.
    async fn add_participant(&self, quiz_id: Uuid, user_id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    /// Append an attempt id to the user's history. Append-only, no dedup;
    /// a missing user is a silent no-op (document-store update semantics).
    async fn append_attempt_ref(&self, user_id: Uuid, attempt_id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Persist a new attempt. The store owns id generation and timestamping.
    async fn create(&self, attempt: NewAttempt) -> Result<Attempt>;
    /// Latest attempt for the (quiz, user) pair by `attempted_at`, ties
    /// broken by insertion order.
    async fn find_latest(&self, quiz_id: Uuid, user_id: Uuid) -> Result<Option<Attempt>>;
    /// All attempts by the user, most recent first.
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Attempt>>;
}
