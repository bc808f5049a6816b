use std::sync::Arc;

use crate::config::GameConfig;
use crate::services::SessionManager;
use crate::ws::hub::WsRegistry;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    sessions: Arc<SessionManager>,
    registry: Arc<WsRegistry>,
}

impl AppState {
    pub fn new(config: GameConfig) -> Self {
        Self {
            sessions: Arc::new(SessionManager::new(config)),
            registry: Arc::new(WsRegistry::new()),
        }
    }

    pub fn session_manager(&self) -> Arc<SessionManager> {
        self.sessions.clone()
    }

    pub fn ws_registry(&self) -> Arc<WsRegistry> {
        self.registry.clone()
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(GameConfig::default())
    }
}
