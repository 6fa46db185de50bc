//! モデル呼び出しの境界
//!
//! サービス層は `ModelClient` トレイト越しにモデルを1回だけ呼び出す。
//! 本番は `OpenAIModelClient`、テストではスタブ実装を差し込む。

use std::time::Duration;

use async_openai::config::OpenAIConfig as ClientConfig;
use async_openai::Client;
use async_trait::async_trait;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use tracing::{debug, info, instrument};

use super::request::build_chat_request;
use crate::config::OpenAIConfig;

/// モデル呼び出し1回分の入力
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub model: String,
    pub temperature: f32,
    /// JSON出力モードを強制するか
    pub json_mode: bool,
    pub max_tokens: u32,
}

#[async_trait]
pub trait ModelClient: Send + Sync {
    /// チャット補完を1回実行し、生の応答テキストを返す
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// async-openaiを使った本番用クライアント
///
/// 起動時に一度だけ作成し、`Arc` で全リクエストから共有する。
pub struct OpenAIModelClient {
    client: Client<ClientConfig>,
}

impl OpenAIModelClient {
    pub fn new(config: &OpenAIConfig) -> Result<Self> {
        let mut client_config = ClientConfig::new().with_api_key(config.api_key.clone());
        if let Some(base) = &config.base_url {
            client_config = client_config.with_api_base(base.clone());
        }

        let mut http = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            http = http.timeout(Duration::from_secs(secs));
        }
        if config.accept_invalid_certs {
            tracing::warn!(target: "openai", "TLS certificate verification is disabled");
            http = http.danger_accept_invalid_certs(true);
        }
        let http = http.build().wrap_err("failed to build HTTP client")?;

        info!(
            target: "openai",
            base_url = config.base_url.as_deref().unwrap_or("(default)"),
            timeout_secs = ?config.timeout_secs,
            "OpenAI client initialized"
        );

        Ok(Self {
            client: Client::with_config(client_config).with_http_client(http),
        })
    }
}

#[async_trait]
impl ModelClient for OpenAIModelClient {
    #[instrument(name = "openai_complete", skip(self, request), fields(model = %request.model, json_mode = request.json_mode))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let req = build_chat_request(request)?;

        info!(target: "openai", "request: model={}, temperature={}, max_tokens={}", request.model, request.temperature, request.max_tokens);
        let resp = self
            .client
            .chat()
            .create(req)
            .await
            .wrap_err("chat completion request failed")?;
        debug!(target: "openai", "response_choices: {}", resp.choices.len());

        let text = resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| eyre!("model returned no content"))?;
        Ok(text.trim().to_string())
    }
}
