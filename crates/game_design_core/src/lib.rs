//! game_design_core
//!
//! ゲームアイデアをLLMに渡し、構造化されたゲームデザインドキュメント（JSON）を生成するコアクレート。
//! プロンプト構築、モデル応答の解釈、OpenAI呼び出し、設定読み込みを提供する。
//! HTTP層（game_design_web）からはサービス経由で利用する。

pub mod config;
pub mod error;
pub mod interpret;
pub mod openai;
pub mod prompt;
pub mod services;
pub mod types;

// 主要な型を再エクスポート
pub use config::{AppConfig, OpenAIConfig, ServerConfig};
pub use error::{GenerationError, MalformedOutputError};
pub use interpret::{interpret, strip_code_fence};
pub use openai::{CompletionRequest, ModelClient, OpenAIModelClient};
pub use prompt::{build_prompt, SchemaMode, SYSTEM_MESSAGE};
pub use services::{GameDesignService, GenerationSettings};
pub use types::{GameDesignDocument, GameIdea, UserInputs};

// テストプロセスでは最初に.envを読み込んでおく
#[cfg(test)]
#[ctor::ctor]
fn load_dotenv_for_tests() {
    let _ = dotenvy::dotenv();
}
