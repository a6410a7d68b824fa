use crate::application::ports::story_repository::StoryRepository;
use crate::domain::stories::story::Story;

pub struct ListUserStories<'a, R: StoryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: StoryRepository + ?Sized> ListUserStories<'a, R> {
    pub async fn execute(&self, username: &str) -> anyhow::Result<Vec<Story>> {
        self.repo.list_for_user(username).await
    }
}
