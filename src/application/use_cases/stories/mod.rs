pub mod create_story;
pub mod delete_story;
pub mod get_story;
pub mod list_stories;
pub mod list_user_stories;
pub mod search_stories;
pub mod update_story;
