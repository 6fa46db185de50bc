use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use game_design_core::{GameIdea, GenerationError, UserInputs};
use crate::models::{ErrorResponse, GenerateRequest};
use crate::state::AppState;

/// GenerationErrorをHTTPレスポンスへ変換するラッパー
pub struct ApiError(pub GenerationError);

impl From<GenerationError> for ApiError {
    fn from(e: GenerationError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            GenerationError::Validation(_) => StatusCode::BAD_REQUEST,
            GenerationError::MalformedOutput(_) | GenerationError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorResponse {
            error: self.0.to_string(),
            raw_output: self.0.raw_output().map(str::to_string),
        };
        (status, Json(body)).into_response()
    }
}

/// POST /generate-game-design - ゲームアイデアからゲームデザインドキュメントを生成
pub async fn generate_game_design(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    // ボディがJSONとして読めない場合もモデルは呼ばずに400を返す
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::warn!(target: "web::design", error = %rejection.body_text(), "Invalid request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                ))),
            )
                .into_response();
        }
    };

    let idea = match GameIdea::parse(req.game_idea.as_deref()) {
        Ok(idea) => idea,
        Err(e) => {
            tracing::warn!(target: "web::design", "Rejected request without gameIdea");
            return ApiError(e).into_response();
        }
    };
    let user_inputs = UserInputs::from(req.user_inputs);

    tracing::info!(target: "web::design", idea = %idea, user_inputs = user_inputs.as_map().len(), "Received game idea");

    match state.service.generate(&idea, &user_inputs).await {
        Ok(document) => {
            tracing::info!(target: "web::design", "Game design document generated");
            (StatusCode::OK, Json(document)).into_response()
        }
        Err(e) => {
            tracing::error!(target: "web::design", error = %e, "Game design generation failed");
            ApiError(e).into_response()
        }
    }
}
