use std::sync::Arc;

use game_design_core::GameDesignService;

/// 全ハンドラで共有する不変の状態
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<GameDesignService>,
}

impl AppState {
    pub fn new(service: GameDesignService) -> Self {
        Self { service: Arc::new(service) }
    }
}
