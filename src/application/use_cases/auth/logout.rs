use crate::application::ports::session_repository::SessionRepository;

pub struct Logout<'a, S: SessionRepository + ?Sized> {
    pub sessions: &'a S,
}

impl<'a, S: SessionRepository + ?Sized> Logout<'a, S> {
    pub async fn execute(&self, token: &str) -> anyhow::Result<bool> {
        self.sessions.delete_session(token).await
    }
}
