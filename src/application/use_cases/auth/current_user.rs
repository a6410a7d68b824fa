use crate::application::ports::session_repository::SessionRepository;

pub struct CurrentUser<'a, S: SessionRepository + ?Sized> {
    pub sessions: &'a S,
}

impl<'a, S: SessionRepository + ?Sized> CurrentUser<'a, S> {
    /// Resolves a session token to the logged-in username, if any.
    pub async fn execute(&self, token: &str) -> anyhow::Result<Option<String>> {
        Ok(self
            .sessions
            .find_valid(token)
            .await?
            .map(|s| s.username))
    }
}
