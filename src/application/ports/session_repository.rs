use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct SessionRow {
    pub token: String,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create_session(
        &self,
        token: &str,
        username: &str,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<SessionRow>;

    /// Resolves a token to its session. Expired sessions are treated as
    /// absent and removed.
    async fn find_valid(&self, token: &str) -> anyhow::Result<Option<SessionRow>>;

    async fn delete_session(&self, token: &str) -> anyhow::Result<bool>;
}
