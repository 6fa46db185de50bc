//! リクエスト/レスポンスで扱うドメイン型

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{self, Display};

use crate::error::GenerationError;

/// ゲームデザインドキュメントで使われるフィールド名の語彙
pub const KNOWN_FIELDS: [&str; 11] = [
    "game_title",
    "genre",
    "core_mechanics",
    "game_flow",
    "characters",
    "enemies",
    "scoring_system",
    "controls",
    "target_audience",
    "unique_selling_points",
    "initial_level_design_notes",
];

/// ユーザーから受け取るゲームアイデア（空文字は不可）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameIdea(String);

impl GameIdea {
    /// 入力を検証してGameIdeaを作成する
    ///
    /// # Arguments
    /// * `raw` - リクエストボディの `gameIdea`（欠落時は `None`）
    ///
    /// # Returns
    /// 空または空白のみの場合は `GenerationError::Validation`
    pub fn parse(raw: Option<&str>) -> Result<Self, GenerationError> {
        match raw {
            Some(text) if !text.trim().is_empty() => Ok(Self(text.to_string())),
            _ => Err(GenerationError::Validation(
                "Game idea (gameIdea) is required.".to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for GameIdea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 任意の追加入力（キャラクター案、アートの方向性など）。中身のスキーマは問わない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserInputs(Map<String, Value>);

impl UserInputs {
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// プロンプト埋め込み用の表現。空なら `{}`、それ以外は整形済みJSON。
    pub fn to_prompt_json(&self) -> String {
        if self.0.is_empty() {
            return "{}".to_string();
        }
        // Map<String, Value> のシリアライズは失敗しない
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

impl From<Option<Map<String, Value>>> for UserInputs {
    fn from(value: Option<Map<String, Value>>) -> Self {
        Self(value.unwrap_or_default())
    }
}

/// モデルが生成したゲームデザインドキュメント
///
/// アダプティブモードでは不要なフィールドが省略されるため、固定の構造体ではなく
/// 開いたマップとして保持する。利用側は全フィールドを任意として扱うこと。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameDesignDocument(Map<String, Value>);

impl GameDesignDocument {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 語彙に含まれるフィールドのうち、実際に存在するもの（語彙順）
    pub fn known_fields_present(&self) -> Vec<&'static str> {
        KNOWN_FIELDS
            .iter()
            .copied()
            .filter(|k| self.0.contains_key(*k))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn game_idea_rejects_missing_and_blank() {
        assert!(matches!(GameIdea::parse(None), Err(GenerationError::Validation(_))));
        assert!(matches!(GameIdea::parse(Some("")), Err(GenerationError::Validation(_))));
        assert!(matches!(GameIdea::parse(Some("   \n")), Err(GenerationError::Validation(_))));
    }

    #[test]
    fn game_idea_keeps_text_verbatim() {
        let idea = GameIdea::parse(Some("  A frog game ")).unwrap();
        assert_eq!(idea.as_str(), "  A frog game ");
    }

    #[test]
    fn user_inputs_prompt_json() {
        assert_eq!(UserInputs::default().to_prompt_json(), "{}");
        assert_eq!(UserInputs::from(None).to_prompt_json(), "{}");

        let map = json!({ "art_style": "pixel" }).as_object().cloned();
        let inputs = UserInputs::from(map);
        assert_eq!(inputs.to_prompt_json(), "{\n  \"art_style\": \"pixel\"\n}");
    }

    #[test]
    fn document_reports_known_fields() {
        let map = json!({ "genre": "Puzzle", "game_title": "Hop", "extra": 1 })
            .as_object()
            .cloned()
            .unwrap();
        let doc = GameDesignDocument::new(map);
        assert_eq!(doc.known_fields_present(), vec!["game_title", "genre"]);
        assert!(doc.contains("extra"));
        assert!(!doc.contains("enemies"));
        assert_eq!(doc.len(), 3);
    }
}
