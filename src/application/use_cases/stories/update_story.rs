use uuid::Uuid;

use crate::application::ports::story_repository::{NewStory, StoryRepository};
use crate::domain::stories::story::Story;

pub struct UpdateStory<'a, R: StoryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: StoryRepository + ?Sized> UpdateStory<'a, R> {
    /// None means the story does not exist or is owned by someone else;
    /// the two are indistinguishable on purpose.
    pub async fn execute(
        &self,
        id: Uuid,
        username: &str,
        story: &NewStory,
    ) -> anyhow::Result<Option<Story>> {
        self.repo.update_owned(id, username, story).await
    }
}
