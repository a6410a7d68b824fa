use crate::application::ports::story_repository::{NewStory, StoryRepository};
use crate::domain::stories::story::Story;

pub struct CreateStory<'a, R: StoryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: StoryRepository + ?Sized> CreateStory<'a, R> {
    pub async fn execute(&self, username: &str, story: &NewStory) -> anyhow::Result<Story> {
        self.repo.create_for_user(username, story).await
    }
}
