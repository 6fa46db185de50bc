//! GameDesignService
//!
//! ゲームデザインドキュメント生成のビジネスロジック層。
//! プロンプト構築 → モデル呼び出し（1回のみ、リトライなし） → 応答の解釈、の順に処理する。
//! HTTP層から独立しており、モデルクライアントは外から注入する。

use std::sync::Arc;

use color_eyre::Result;
use tracing::{debug, error, info, instrument};

use crate::config::AppConfig;
use crate::error::GenerationError;
use crate::interpret::interpret;
use crate::openai::{CompletionRequest, ModelClient, OpenAIModelClient};
use crate::prompt::{build_prompt, SchemaMode, SYSTEM_MESSAGE};
use crate::types::{GameDesignDocument, GameIdea, UserInputs};

/// 生成時に使う不変のパラメータ
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub json_mode: bool,
    pub max_tokens: u32,
    pub schema_mode: SchemaMode,
}

impl GenerationSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            model: config.openai.model.clone(),
            temperature: config.openai.temperature,
            json_mode: config.openai.json_mode,
            max_tokens: config.openai.max_tokens,
            schema_mode: config.schema_mode,
        }
    }
}

/// ゲームデザインサービス
pub struct GameDesignService {
    client: Arc<dyn ModelClient>,
    settings: GenerationSettings,
}

impl GameDesignService {
    /// 新しいGameDesignServiceインスタンスを作成
    pub fn new(client: Arc<dyn ModelClient>, settings: GenerationSettings) -> Self {
        Self { client, settings }
    }

    /// 設定からOpenAIクライアントを作成してサービスを組み立てる
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = OpenAIModelClient::new(&config.openai)?;
        Ok(Self::new(Arc::new(client), GenerationSettings::from_config(config)))
    }

    /// モデルに渡すリクエストを組み立てる（モデルは呼ばない）
    pub fn completion_request(&self, idea: &GameIdea, user_inputs: &UserInputs) -> CompletionRequest {
        CompletionRequest {
            system: SYSTEM_MESSAGE.to_string(),
            user: build_prompt(idea, user_inputs, self.settings.schema_mode),
            model: self.settings.model.clone(),
            temperature: self.settings.temperature,
            json_mode: self.settings.json_mode,
            max_tokens: self.settings.max_tokens,
        }
    }

    /// ゲームアイデアからゲームデザインドキュメントを生成する
    ///
    /// # Arguments
    /// * `idea` - 検証済みのゲームアイデア
    /// * `user_inputs` - 追加入力
    ///
    /// # Returns
    /// 成功時はドキュメント。モデル呼び出し失敗は `Upstream`、パース失敗は `MalformedOutput`。
    #[instrument(name = "generate_game_design", skip(self, user_inputs), fields(schema_mode = %self.settings.schema_mode))]
    pub async fn generate(
        &self,
        idea: &GameIdea,
        user_inputs: &UserInputs,
    ) -> Result<GameDesignDocument, GenerationError> {
        let request = self.completion_request(idea, user_inputs);
        debug!(target: "game_design::service", prompt_len = request.user.len(), "prompt built");

        let raw = match self.client.complete(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(target: "game_design::service", error = ?e, "model invocation failed");
                return Err(GenerationError::Upstream(e));
            }
        };
        debug!(target: "game_design::service", raw = %raw, "raw model output");

        let document = interpret(&raw).map_err(|e| {
            error!(target: "game_design::service", reason = %e.reason, "model output is not a JSON object");
            GenerationError::from(e)
        })?;

        info!(
            target: "game_design::service",
            fields = ?document.known_fields_present(),
            "game design document generated"
        );
        Ok(document)
    }
}
