use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Story {
    pub id: Uuid,
    pub story_name: String,
    pub famous_name: String,
    pub show_name: String,
    pub url: String,
    pub username: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
