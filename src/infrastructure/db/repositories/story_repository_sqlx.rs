use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::story_repository::{NewStory, StoryRepository};
use crate::domain::stories::story::Story;
use crate::infrastructure::db::PgPool;

pub struct SqlxStoryRepository {
    pub pool: PgPool,
}

impl SqlxStoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const STORY_COLS: &str = "id, story_name, famous_name, show_name, url, username, created_at";

fn map_row(r: &sqlx::postgres::PgRow) -> Story {
    Story {
        id: r.get("id"),
        story_name: r.get("story_name"),
        famous_name: r.get("famous_name"),
        show_name: r.get("show_name"),
        url: r.get("url"),
        username: r.get("username"),
        created_at: r.get("created_at"),
    }
}

/// Escapes LIKE wildcards so a keyword is matched literally.
pub(crate) fn escape_like(keyword: &str) -> String {
    keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl StoryRepository for SqlxStoryRepository {
    async fn list_all(&self) -> anyhow::Result<Vec<Story>> {
        let rows = sqlx::query(&format!(
            "SELECT {STORY_COLS} FROM stories ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_row).collect())
    }

    async fn list_for_user(&self, username: &str) -> anyhow::Result<Vec<Story>> {
        let rows = sqlx::query(&format!(
            "SELECT {STORY_COLS} FROM stories WHERE username = $1 ORDER BY created_at DESC"
        ))
        .bind(username)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_row).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Story>> {
        let row = sqlx::query(&format!("SELECT {STORY_COLS} FROM stories WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_row))
    }

    async fn create_for_user(&self, username: &str, story: &NewStory) -> anyhow::Result<Story> {
        let row = sqlx::query(&format!(
            "INSERT INTO stories (story_name, famous_name, show_name, url, username)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {STORY_COLS}"
        ))
        .bind(&story.story_name)
        .bind(&story.famous_name)
        .bind(&story.show_name)
        .bind(&story.url)
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_row(&row))
    }

    async fn update_owned(
        &self,
        id: Uuid,
        username: &str,
        story: &NewStory,
    ) -> anyhow::Result<Option<Story>> {
        let row = sqlx::query(&format!(
            "UPDATE stories
             SET story_name = $1, famous_name = $2, show_name = $3, url = $4
             WHERE id = $5 AND username = $6
             RETURNING {STORY_COLS}"
        ))
        .bind(&story.story_name)
        .bind(&story.famous_name)
        .bind(&story.show_name)
        .bind(&story.url)
        .bind(id)
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_row))
    }

    async fn delete_owned(&self, id: Uuid, username: &str) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM stories WHERE id = $1 AND username = $2")
            .bind(id)
            .bind(username)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn search(&self, keyword: &str) -> anyhow::Result<Vec<Story>> {
        let like = format!("%{}%", escape_like(keyword));
        let rows = sqlx::query(&format!(
            "SELECT {STORY_COLS} FROM stories
             WHERE story_name ILIKE $1 OR famous_name ILIKE $1 OR show_name ILIKE $1
             ORDER BY created_at DESC"
        ))
        .bind(like)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }
}
