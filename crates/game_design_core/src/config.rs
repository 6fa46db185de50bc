//! アプリケーション設定
//!
//! 起動時に一度だけ環境変数（.envを含む）から読み込み、以降は不変のまま各リクエストで共有する。

use std::path::PathBuf;
use std::str::FromStr;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;

use crate::prompt::SchemaMode;

/// ヘルスチェックなどで名乗るサービス名
pub const SERVICE_NAME: &str = "game-design-expert-agent";

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
/// JSONモード強制時の温度
pub const JSON_MODE_TEMPERATURE: f32 = 0.6;
/// プロンプト指示のみに頼る場合の温度
pub const PROMPT_ONLY_TEMPERATURE: f32 = 0.7;

/// OpenAI呼び出しの設定
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAIConfig {
    /// APIキー
    pub api_key: String,
    /// モデル名
    pub model: String,
    /// サンプリング温度
    pub temperature: f32,
    /// 最大トークン数（4o系はmax_tokens、それ以外はmax_completion_tokensとして送る）
    pub max_tokens: u32,
    /// response_format=json_object を指定するか
    pub json_mode: bool,
    /// APIのベースURL（未指定ならライブラリのデフォルト）
    pub base_url: Option<String>,
    /// HTTPクライアントのタイムアウト秒数（未指定なら無制限）
    pub timeout_secs: Option<u64>,
    /// TLS証明書の検証を無効にする（社内プロキシ経由など）
    pub accept_invalid_certs: bool,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            temperature: JSON_MODE_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            json_mode: true,
            base_url: None,
            timeout_secs: None,
            accept_invalid_certs: false,
        }
    }
}

/// HTTPサーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// 指定されていれば日次ローテーションのログファイルも出力する
    pub log_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            log_dir: None,
        }
    }
}

/// プロセス全体の設定
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub openai: OpenAIConfig,
    pub schema_mode: SchemaMode,
    pub server: ServerConfig,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を読み込む
    ///
    /// 空文字の値は未設定として扱う。
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("OPENAI_API_KEY")
            .ok_or_else(|| eyre!("OPENAI_API_KEY is not set"))?;

        let json_mode = match get("GDD_JSON_MODE") {
            Some(v) => parse_bool("GDD_JSON_MODE", &v)?,
            None => true,
        };

        let temperature = match get("OPENAI_TEMPERATURE") {
            Some(v) => {
                let t: f32 = parse_value("OPENAI_TEMPERATURE", &v)?;
                if !(JSON_MODE_TEMPERATURE..=PROMPT_ONLY_TEMPERATURE).contains(&t) {
                    return Err(eyre!(
                        "OPENAI_TEMPERATURE must be between {JSON_MODE_TEMPERATURE} and {PROMPT_ONLY_TEMPERATURE}, got {t}"
                    ));
                }
                t
            }
            None => default_temperature(json_mode),
        };

        let openai = OpenAIConfig {
            api_key,
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature,
            max_tokens: match get("OPENAI_MAX_TOKENS") {
                Some(v) => parse_value("OPENAI_MAX_TOKENS", &v)?,
                None => DEFAULT_MAX_TOKENS,
            },
            json_mode,
            base_url: get("OPENAI_BASE_URL"),
            timeout_secs: get("OPENAI_TIMEOUT_SECS")
                .map(|v| parse_value("OPENAI_TIMEOUT_SECS", &v))
                .transpose()?,
            accept_invalid_certs: match get("OPENAI_ACCEPT_INVALID_CERTS") {
                Some(v) => parse_bool("OPENAI_ACCEPT_INVALID_CERTS", &v)?,
                None => false,
            },
        };

        let schema_mode = match get("GDD_SCHEMA_MODE") {
            Some(v) => v.parse::<SchemaMode>().wrap_err("invalid GDD_SCHEMA_MODE")?,
            None => SchemaMode::default(),
        };

        let server = ServerConfig {
            port: match get("PORT") {
                Some(v) => parse_value("PORT", &v)?,
                None => DEFAULT_PORT,
            },
            log_dir: get("LOG_DIR").map(PathBuf::from),
        };

        Ok(Self { openai, schema_mode, server })
    }
}

/// 温度が明示されていない場合のデフォルト値
///
/// JSONモード強制時は形式の逸脱がモード側で抑えられるため低めにする。
pub fn default_temperature(json_mode: bool) -> f32 {
    if json_mode {
        JSON_MODE_TEMPERATURE
    } else {
        PROMPT_ONLY_TEMPERATURE
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .wrap_err_with(|| format!("invalid value for {key}: {raw:?}"))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(eyre!("invalid boolean for {key}: {raw:?}")),
    }
}
