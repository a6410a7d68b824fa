//! In-memory port implementations shared by use-case tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::ports::session_repository::{SessionRepository, SessionRow};
use crate::application::ports::story_repository::{NewStory, StoryRepository};
use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::domain::stories::story::Story;

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<HashMap<String, UserRow>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create_user(
        &self,
        username: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<UserRow>> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(username) {
            return Ok(None);
        }
        let row = UserRow {
            username: username.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password_hash: Some(password_hash.to_string()),
        };
        rows.insert(username.to_string(), row.clone());
        Ok(Some(row))
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<UserRow>> {
        Ok(self.rows.lock().unwrap().get(username).cloned())
    }
}

#[derive(Default)]
pub struct InMemorySessions {
    rows: Mutex<HashMap<String, SessionRow>>,
}

#[async_trait]
impl SessionRepository for InMemorySessions {
    async fn create_session(
        &self,
        token: &str,
        username: &str,
        expires_at: DateTime<Utc>,
    ) -> anyhow::Result<SessionRow> {
        let row = SessionRow {
            token: token.to_string(),
            username: username.to_string(),
            expires_at,
        };
        self.rows
            .lock()
            .unwrap()
            .insert(token.to_string(), row.clone());
        Ok(row)
    }

    async fn find_valid(&self, token: &str) -> anyhow::Result<Option<SessionRow>> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get(token).cloned() {
            Some(row) if row.expires_at > Utc::now() => Ok(Some(row)),
            Some(_) => {
                rows.remove(token);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete_session(&self, token: &str) -> anyhow::Result<bool> {
        Ok(self.rows.lock().unwrap().remove(token).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryStories {
    rows: Mutex<Vec<Story>>,
}

#[async_trait]
impl StoryRepository for InMemoryStories {
    async fn list_all(&self) -> anyhow::Result<Vec<Story>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_for_user(&self, username: &str) -> anyhow::Result<Vec<Story>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|s| s.username == username)
            .collect())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Story>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn create_for_user(&self, username: &str, story: &NewStory) -> anyhow::Result<Story> {
        let row = Story {
            id: Uuid::new_v4(),
            story_name: story.story_name.clone(),
            famous_name: story.famous_name.clone(),
            show_name: story.show_name.clone(),
            url: story.url.clone(),
            username: username.to_string(),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update_owned(
        &self,
        id: Uuid,
        username: &str,
        story: &NewStory,
    ) -> anyhow::Result<Option<Story>> {
        let mut rows = self.rows.lock().unwrap();
        for row in rows.iter_mut() {
            if row.id == id && row.username == username {
                row.story_name = story.story_name.clone();
                row.famous_name = story.famous_name.clone();
                row.show_name = story.show_name.clone();
                row.url = story.url.clone();
                return Ok(Some(row.clone()));
            }
        }
        Ok(None)
    }

    async fn delete_owned(&self, id: Uuid, username: &str) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| !(s.id == id && s.username == username));
        Ok(rows.len() < before)
    }

    async fn search(&self, keyword: &str) -> anyhow::Result<Vec<Story>> {
        let needle = keyword.to_lowercase();
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|s| {
                s.story_name.to_lowercase().contains(&needle)
                    || s.famous_name.to_lowercase().contains(&needle)
                    || s.show_name.to_lowercase().contains(&needle)
            })
            .collect())
    }
}
