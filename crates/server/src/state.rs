use std::sync::Arc;
use kanban_core::{BoardController, Config};

/// Shared application state
pub struct AppState {
    config: Config,
    board: Arc<BoardController>,
}

impl AppState {
    pub fn new(config: Config, board: Arc<BoardController>) -> Self {
        Self { config, board }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn board(&self) -> &BoardController {
        self.board.as_ref()
    }
}
