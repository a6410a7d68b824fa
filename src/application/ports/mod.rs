pub mod session_repository;
pub mod story_repository;
pub mod user_repository;
