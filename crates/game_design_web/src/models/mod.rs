use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// ゲームデザイン生成リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub game_idea: Option<String>,
    /// 任意の追加入力（キャラクター案、アートの方向性など）
    #[serde(default)]
    pub user_inputs: Option<Map<String, Value>>,
}

/// ヘルスチェックレスポンス
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// エラーレスポンス
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// モデル応答のパースに失敗した場合のみ、元の応答テキスト
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into(), raw_output: None }
    }
}
