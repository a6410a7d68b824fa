use crate::application::ports::story_repository::StoryRepository;
use crate::domain::stories::story::Story;

pub struct SearchStories<'a, R: StoryRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: StoryRepository + ?Sized> SearchStories<'a, R> {
    pub async fn execute(&self, keyword: &str) -> anyhow::Result<Vec<Story>> {
        self.repo.search(keyword.trim()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::story_repository::NewStory;
    use crate::application::use_cases::test_support::InMemoryStories;

    async fn seed(repo: &InMemoryStories, story: &str, famous: &str, show: &str) {
        repo.create_for_user(
            "alicem",
            &NewStory {
                story_name: story.into(),
                famous_name: famous.into(),
                show_name: show.into(),
                url: "https://example.com/clip".into(),
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn keyword_matches_any_of_the_three_name_columns() {
        let repo = InMemoryStories::default();
        seed(&repo, "The walkout", "Jon Stewart", "Crossfire").await;
        seed(&repo, "Carpool karaoke", "Adele", "The Late Late Show").await;
        seed(&repo, "Stewart returns", "John Oliver", "Last Week Tonight").await;

        let uc = SearchStories { repo: &repo };
        // famous_name and story_name hits, case-insensitive
        let hits = uc.execute("stewart").await.unwrap();
        assert_eq!(hits.len(), 2);
        // show_name hit
        let hits = uc.execute("late late").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].famous_name, "Adele");
        // no hit
        assert!(uc.execute("karpool").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_keyword_lists_everything() {
        let repo = InMemoryStories::default();
        seed(&repo, "The walkout", "Jon Stewart", "Crossfire").await;
        seed(&repo, "Carpool karaoke", "Adele", "The Late Late Show").await;

        let uc = SearchStories { repo: &repo };
        assert_eq!(uc.execute("").await.unwrap().len(), 2);
        assert_eq!(uc.execute("   ").await.unwrap().len(), 2);
    }
}
