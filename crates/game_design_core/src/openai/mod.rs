//! OpenAI連携のモジュール

pub mod client;
pub mod request;

// 代表的な公開APIを再エクスポート
pub use client::{CompletionRequest, ModelClient, OpenAIModelClient};
pub use request::build_chat_request;
