//! ゲームデザインドキュメント生成用のプロンプト構築

use std::fmt::{self, Display};
use std::str::FromStr;

use color_eyre::eyre::{eyre, Report};

use crate::types::{GameIdea, UserInputs};

/// モデルに渡す固定のsystemメッセージ
pub const SYSTEM_MESSAGE: &str = "You are an expert Game Designer AI. Your task is to analyze user game ideas \
and generate a detailed Game Design Document in JSON format. Provide only the JSON.";

/// 出力スキーマの指定方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaMode {
    /// 全フィールドを常に出力させる固定テンプレート
    #[default]
    Fixed,
    /// アイデアに関係のないフィールドは省略させる
    Adaptive,
}

impl SchemaMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaMode::Fixed => "fixed",
            SchemaMode::Adaptive => "adaptive",
        }
    }
}

impl Display for SchemaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaMode {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(SchemaMode::Fixed),
            "adaptive" => Ok(SchemaMode::Adaptive),
            other => Err(eyre!("unknown schema mode: {other} (expected `fixed` or `adaptive`)")),
        }
    }
}

const FIXED_SCHEMA: &str = r#"```json
{
  "game_title": "Game title (proposed by you)",
  "genre": "Game genre (e.g. Endless Runner, Puzzle, RPG)",
  "core_mechanics": [
    "Mechanic 1 (e.g. Jumping)",
    "Mechanic 2 (e.g. Collision detection)"
  ],
  "game_flow": "Short summary of the flow from the start of the game to the end.",
  "characters": [
    {"name": "Character name", "description": "Short description of the character"}
  ],
  "enemies": [
    {"name": "Enemy name", "description": "Short description of the enemy", "behavior": "Behavior"}
  ],
  "scoring_system": "Description of the scoring system (e.g. collected coins, defeated enemies)",
  "controls": "Description of the controls (e.g. tap the screen to jump)",
  "target_audience": "Target audience (e.g. children aged 8-12)",
  "unique_selling_points": [
    "Unique features of the game"
  ],
  "initial_level_design_notes": "Short design notes for the first level."
}
```"#;

const ADAPTIVE_SCHEMA: &str = r#"Always include these fields:
- "game_title": string, a title you propose for the game
- "genre": string, e.g. Endless Runner, Puzzle, RPG
- "core_mechanics": array of strings, the main mechanics
- "game_flow": string, short summary of the flow from start to end
- "target_audience": string, who the game is for
- "unique_selling_points": array of strings

Include these fields ONLY when they are relevant to the idea, otherwise omit the key entirely (do not emit null, empty strings or empty arrays):
- "characters": array of {"name", "description"}; omit when the game has no characters
- "enemies": array of {"name", "description", "behavior"}; omit when the game has no enemies or antagonists
- "scoring_system": string; omit when the game has no score
- "controls": string; omit when controls are not applicable
- "initial_level_design_notes": string; omit when the game has no levels

Do not add fields outside this list."#;

/// ゲームアイデアと追加入力からLLMへの指示文を構築する
///
/// 副作用なし。同じ入力に対して常に同じ文字列を返す。
///
/// # Arguments
/// * `idea` - ゲームアイデア
/// * `user_inputs` - 追加入力（空なら `{}` として埋め込む）
/// * `mode` - 出力スキーマの指定方法
pub fn build_prompt(idea: &GameIdea, user_inputs: &UserInputs, mode: SchemaMode) -> String {
    let schema_section = match mode {
        SchemaMode::Fixed => format!("Game Design Document format (JSON):\n{FIXED_SCHEMA}"),
        SchemaMode::Adaptive => format!(
            "Game Design Document rules (JSON object, keys adapt to the idea):\n{ADAPTIVE_SCHEMA}"
        ),
    };

    format!(
        "You are a Game Design Expert AI agent. You will be given a game idea from a user. \
Analyze the idea and create a detailed Game Design Document in the JSON format described below. \
Return **only JSON**, without any additional text or explanation.\n\n\
Game idea: \"{idea}\"\n\
Additional user inputs (if any): {inputs}\n\n\
{schema_section}\n\
JSON output:",
        idea = idea.as_str(),
        inputs = user_inputs.to_prompt_json(),
    )
}
