use uuid::Uuid;

use crate::application::ports::story_repository::StoryRepository;

pub struct DeleteStory<'a, R: StoryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: StoryRepository + ?Sized> DeleteStory<'a, R> {
    /// Returns false when the story does not exist or is owned by someone
    /// else.
    pub async fn execute(&self, id: Uuid, username: &str) -> anyhow::Result<bool> {
        self.repo.delete_owned(id, username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::story_repository::NewStory;
    use crate::application::use_cases::test_support::InMemoryStories;

    #[tokio::test]
    async fn only_the_owner_deletes() {
        let repo = InMemoryStories::default();
        let created = repo
            .create_for_user(
                "alicem",
                &NewStory {
                    story_name: "The interview".into(),
                    famous_name: "Jon Stewart".into(),
                    show_name: "The Daily Show".into(),
                    url: "https://example.com/clip".into(),
                },
            )
            .await
            .unwrap();

        let uc = DeleteStory { repo: &repo };
        assert!(!uc.execute(created.id, "mallory").await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_some());

        assert!(uc.execute(created.id, "alicem").await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());

        // already gone
        assert!(!uc.execute(created.id, "alicem").await.unwrap());
    }
}
