use std::sync::Arc;

use crate::application::ports::session_repository::SessionRepository;
use crate::application::ports::story_repository::StoryRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    story_repo: Arc<dyn StoryRepository>,
    session_repo: Arc<dyn SessionRepository>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        story_repo: Arc<dyn StoryRepository>,
        session_repo: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            user_repo,
            story_repo,
            session_repo,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn story_repo(&self) -> Arc<dyn StoryRepository> {
        self.services.story_repo.clone()
    }

    pub fn session_repo(&self) -> Arc<dyn SessionRepository> {
        self.services.session_repo.clone()
    }
}
