use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Duration;
use rand::RngCore;

use crate::application::ports::session_repository::{SessionRepository, SessionRow};
use crate::application::ports::user_repository::{UserRepository, UserRow};

pub struct Login<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: SessionRepository + ?Sized,
{
    pub users: &'a U,
    pub sessions: &'a S,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl<'a, U, S> Login<'a, U, S>
where
    U: UserRepository + ?Sized,
    S: SessionRepository + ?Sized,
{
    /// Verifies the credentials and opens a session. Returns None for both an
    /// unknown username and a wrong password so callers cannot tell the two
    /// apart.
    pub async fn execute(
        &self,
        req: &LoginRequest,
        ttl: Duration,
    ) -> anyhow::Result<Option<(UserRow, SessionRow)>> {
        let row = match self.users.find_by_username(&req.username).await? {
            Some(r) => r,
            None => return Ok(None),
        };
        let hash = row.password_hash.clone().unwrap_or_default();
        let parsed = PasswordHash::new(&hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_err()
        {
            return Ok(None);
        }

        let token = mint_token();
        let expires_at = chrono::Utc::now() + ttl;
        let session = self
            .sessions
            .create_session(&token, &row.username, expires_at)
            .await?;
        Ok(Some((
            UserRow {
                password_hash: None,
                ..row
            },
            session,
        )))
    }
}

fn mint_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::auth::register::{Register, RegisterRequest};
    use crate::application::use_cases::test_support::{InMemorySessions, InMemoryUsers};

    async fn seed_user(users: &InMemoryUsers) {
        Register { repo: users }
            .execute(&RegisterRequest {
                username: "alicem".into(),
                first_name: "Alice".into(),
                last_name: "Morgan".into(),
                email: "alice@example.com".into(),
                password: "hunter2hunter".into(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_identical() {
        let users = InMemoryUsers::default();
        let sessions = InMemorySessions::default();
        seed_user(&users).await;
        let login = Login {
            users: &users,
            sessions: &sessions,
        };

        let wrong_password = login
            .execute(
                &LoginRequest {
                    username: "alicem".into(),
                    password: "not-the-password".into(),
                },
                Duration::hours(1),
            )
            .await
            .unwrap();
        let unknown_user = login
            .execute(
                &LoginRequest {
                    username: "nobody".into(),
                    password: "hunter2hunter".into(),
                },
                Duration::hours(1),
            )
            .await
            .unwrap();
        assert!(wrong_password.is_none());
        assert!(unknown_user.is_none());
    }

    #[tokio::test]
    async fn successful_login_opens_a_resolvable_session() {
        let users = InMemoryUsers::default();
        let sessions = InMemorySessions::default();
        seed_user(&users).await;
        let login = Login {
            users: &users,
            sessions: &sessions,
        };

        let (user, session) = login
            .execute(
                &LoginRequest {
                    username: "alicem".into(),
                    password: "hunter2hunter".into(),
                },
                Duration::hours(1),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.username, "alicem");
        assert!(user.password_hash.is_none());

        use crate::application::ports::session_repository::SessionRepository as _;
        let found = sessions.find_valid(&session.token).await.unwrap().unwrap();
        assert_eq!(found.username, "alicem");
    }

    #[test]
    fn tokens_are_long_and_unique() {
        let a = mint_token();
        let b = mint_token();
        assert_ne!(a, b);
        assert!(a.len() >= 40);
    }
}
