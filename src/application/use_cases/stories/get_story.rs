use uuid::Uuid;

use crate::application::ports::story_repository::StoryRepository;
use crate::domain::stories::story::Story;

pub struct GetStory<'a, R: StoryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: StoryRepository + ?Sized> GetStory<'a, R> {
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<Option<Story>> {
        self.repo.get_by_id(id).await
    }
}
