//! Application state

use std::sync::Arc;

use showcase_access::ShowcaseService;
use showcase_db::pg::{PgEventRepository, PgUserRepository, Repositories};
use showcase_db::DbPool;

use crate::config::Config;

/// Type alias for the showcase service with concrete repository types
pub type ShowcaseServiceImpl = ShowcaseService<PgUserRepository, PgEventRepository>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Access service for tokens, tiers, and events
    pub service: Arc<ShowcaseServiceImpl>,
    /// Database pool (for health checks)
    pub pool: DbPool,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(repos: Repositories, pool: DbPool, config: Config) -> Self {
        let service = ShowcaseService::new(
            config.access.clone(),
            Arc::new(repos.users),
            Arc::new(repos.events),
        );

        Self {
            service: Arc::new(service),
            pool,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
