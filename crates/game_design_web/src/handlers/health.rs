use axum::{extract::Json, http::StatusCode};

use game_design_core::config::SERVICE_NAME;
use crate::models::HealthResponse;

/// GET /health - ヘルスチェック（モデルには問い合わせない）
pub async fn health() -> (StatusCode, Json<HealthResponse>) {
    tracing::debug!(target: "web::health", "Health check");
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            service: SERVICE_NAME,
        }),
    )
}
