//! game_design_web
//!
//! ゲームデザイン生成サービスのHTTP層（axum）。
//! ルーティング、CORS、リクエスト検証とエラーのステータスコード変換を担当する。

pub mod handlers;
pub mod models;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use state::AppState;

/// ルーティング設定
pub fn app(state: AppState) -> Router {
    Router::new()
        // ヘルスチェック
        .route("/health", get(handlers::health))
        // 生成API（/api 付きの別名も受け付ける）
        .route("/generate-game-design", post(handlers::generate_game_design))
        .route("/api/generate-game-design", post(handlers::generate_game_design))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 全オリジンからのリクエストを許可
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
