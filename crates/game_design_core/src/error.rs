//! 生成処理のエラー型

use thiserror::Error;

/// モデル応答をJSONオブジェクトとして解釈できなかった
///
/// `raw` には診断用にフェンス除去前の応答をそのまま保持する。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to parse model output as JSON: {reason}")]
pub struct MalformedOutputError {
    pub raw: String,
    pub reason: String,
}

#[derive(Error, Debug)]
pub enum GenerationError {
    /// 必須入力の欠落（HTTP 400）
    #[error("{0}")]
    Validation(String),

    /// モデル応答のパース失敗（HTTP 500 + raw_output）
    #[error(transparent)]
    MalformedOutput(#[from] MalformedOutputError),

    /// モデル呼び出し自体の失敗（HTTP 500）
    #[error("Failed to generate game design document: {0}")]
    Upstream(color_eyre::Report),
}

impl GenerationError {
    /// パース失敗時の元テキスト
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            GenerationError::MalformedOutput(e) => Some(&e.raw),
            _ => None,
        }
    }
}
