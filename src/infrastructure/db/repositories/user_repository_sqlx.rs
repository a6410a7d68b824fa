use async_trait::async_trait;
use sqlx::Row;

use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::infrastructure::db::PgPool;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_row(r: &sqlx::postgres::PgRow) -> UserRow {
    UserRow {
        username: r.get("username"),
        first_name: r.get("first_name"),
        last_name: r.get("last_name"),
        email: r.get("email"),
        password_hash: r.try_get("password_hash").ok(),
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(
        &self,
        username: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<UserRow>> {
        // ON CONFLICT returns no row for a taken username instead of erroring
        let row = sqlx::query(
            r#"INSERT INTO users (username, first_name, last_name, email, password_hash)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT (username) DO NOTHING
               RETURNING username, first_name, last_name, email, password_hash"#,
        )
        .bind(username)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_row))
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<UserRow>> {
        let row = sqlx::query(
            r#"SELECT username, first_name, last_name, email, password_hash
               FROM users WHERE username = $1"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_row))
    }
}
