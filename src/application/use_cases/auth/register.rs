use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::ports::user_repository::{UserRepository, UserRow};

#[derive(thiserror::Error, Debug)]
pub enum RegisterError {
    #[error("username is already taken")]
    UsernameTaken,
    #[error("failed to hash password")]
    Hash(#[source] anyhow::Error),
    #[error("failed to persist user")]
    Repo(#[source] anyhow::Error),
}

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> Result<UserRow, RegisterError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| RegisterError::Hash(anyhow::anyhow!(e.to_string())))?
            .to_string();
        self.repo
            .create_user(
                &req.username,
                &req.first_name,
                &req.last_name,
                &req.email,
                &hash,
            )
            .await
            .map_err(RegisterError::Repo)?
            .ok_or(RegisterError::UsernameTaken)
    }
}
