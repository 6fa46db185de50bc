//! モデル応答の解釈
//!
//! 応答がMarkdownの ```json フェンスで囲まれていれば除去し、1回だけJSONとしてパースする。
//! 文章中のJSONを探し直すような二段目の抽出は行わない。

use serde_json::Value;
use tracing::debug;

use crate::error::MalformedOutputError;
use crate::types::GameDesignDocument;

const JSON_FENCE_OPEN: &str = "```json";
const FENCE: &str = "```";

/// 応答テキストからコードフェンスを取り除く
///
/// 先頭が ```json の場合のみ、開始マーカーと全ての ``` を削除して前後の空白を落とす。
/// それ以外は前後の空白を落とすだけ。
pub fn strip_code_fence(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with(JSON_FENCE_OPEN) {
        trimmed
            .replace(JSON_FENCE_OPEN, "")
            .replace(FENCE, "")
            .trim()
            .to_string()
    } else {
        trimmed.to_string()
    }
}

/// モデル応答をゲームデザインドキュメントとして解釈する
///
/// JSONオブジェクトであればフィールドの過不足に関わらずそのまま返す。
/// パースできない場合、またはオブジェクト以外のJSONだった場合は `MalformedOutputError`。
/// ドキュメントはマッピングとして定義しているため、配列や文字列などは正しいJSONでも成功扱いにしない。
pub fn interpret(raw: &str) -> Result<GameDesignDocument, MalformedOutputError> {
    let cleaned = strip_code_fence(raw);
    debug!(target: "game_design::interpret", raw_len = raw.len(), cleaned_len = cleaned.len(), "interpreting model output");

    let malformed = |reason: String| MalformedOutputError {
        raw: raw.to_string(),
        reason,
    };

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(map)) => Ok(GameDesignDocument::new(map)),
        Ok(other) => Err(malformed(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(malformed(e.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
