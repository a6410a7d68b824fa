use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::stories::story::Story;

#[derive(Debug, Clone)]
pub struct NewStory {
    pub story_name: String,
    pub famous_name: String,
    pub show_name: String,
    pub url: String,
}

#[async_trait]
pub trait StoryRepository: Send + Sync {
    async fn list_all(&self) -> anyhow::Result<Vec<Story>>;

    async fn list_for_user(&self, username: &str) -> anyhow::Result<Vec<Story>>;

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Story>>;

    async fn create_for_user(&self, username: &str, story: &NewStory) -> anyhow::Result<Story>;

    /// Updates only when `username` owns the story. None means not
    /// found/unauthorized.
    async fn update_owned(
        &self,
        id: Uuid,
        username: &str,
        story: &NewStory,
    ) -> anyhow::Result<Option<Story>>;

    /// Returns true when a row owned by `username` was deleted.
    async fn delete_owned(&self, id: Uuid, username: &str) -> anyhow::Result<bool>;

    /// Keyword match over story name, famous name and show name. The keyword
    /// is bound as a parameter; `%`/`_` in it must not act as wildcards.
    async fn search(&self, keyword: &str) -> anyhow::Result<Vec<Story>>;
}
