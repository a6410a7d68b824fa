use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// None means the username is already taken. The check and the insert
    /// are one operation, so concurrent registrations cannot race past it.
    async fn create_user(
        &self,
        username: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<UserRow>>;

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<UserRow>>;
}
