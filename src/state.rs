use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::GameManager;

/// The game registry as shared between request handlers
pub type SharedGameManager = Arc<RwLock<GameManager>>;

#[derive(Clone)]
pub struct AppState {
    pub game_manager: SharedGameManager,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_manager(GameManager::new())
    }

    pub fn with_manager(manager: GameManager) -> Self {
        Self {
            game_manager: Arc::new(RwLock::new(manager)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
