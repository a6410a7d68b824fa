use crate::application::ports::story_repository::StoryRepository;
use crate::domain::stories::story::Story;

pub struct ListStories<'a, R: StoryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: StoryRepository + ?Sized> ListStories<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<Story>> {
        self.repo.list_all().await
    }
}
