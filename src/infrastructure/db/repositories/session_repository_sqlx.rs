use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use crate::application::ports::session_repository::{SessionRepository, SessionRow};
use crate::infrastructure::db::PgPool;

pub struct SqlxSessionRepository {
    pub pool: PgPool,
}

impl SqlxSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqlxSessionRepository {
    async fn create_session(
        &self,
        token: &str,
        username: &str,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<SessionRow> {
        let row = sqlx::query(
            r#"INSERT INTO sessions (token, username, expires_at)
               VALUES ($1, $2, $3)
               RETURNING token, username, expires_at"#,
        )
        .bind(token)
        .bind(username)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(SessionRow {
            token: row.get("token"),
            username: row.get("username"),
            expires_at: row.get("expires_at"),
        })
    }

    async fn find_valid(&self, token: &str) -> anyhow::Result<Option<SessionRow>> {
        // Expired rows for this token are swept on the way in, so the lookup
        // below only ever sees live sessions.
        sqlx::query("DELETE FROM sessions WHERE token = $1 AND expires_at <= now()")
            .bind(token)
            .execute(&self.pool)
            .await?;
        let row = sqlx::query(
            r#"SELECT token, username, expires_at FROM sessions
               WHERE token = $1 AND expires_at > now()"#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| SessionRow {
            token: r.get("token"),
            username: r.get("username"),
            expires_at: r.get("expires_at"),
        }))
    }

    async fn delete_session(&self, token: &str) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
