use std::sync::Arc;

use crate::config::AppConfig;
use crate::storage::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(config.upload.max_sessions)),
            config: Arc::new(config),
        }
    }
}
