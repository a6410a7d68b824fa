pub mod session_repository_sqlx;
pub mod story_repository_sqlx;
pub mod user_repository_sqlx;
