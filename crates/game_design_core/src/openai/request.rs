use async_openai::types::{
    ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs,
    ResponseFormat,
};
use color_eyre::Result;
use tracing::debug;

use super::client::CompletionRequest;

/// トークン制限戦略を表現する列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenLimitStrategy {
    /// `max_tokens` を使用（4oモデル向け）
    MaxTokens,
    /// `max_completion_tokens` を使用（5系モデル向け）
    MaxCompletionTokens,
}

/// モデル名からトークン制限戦略を判定する
fn determine_token_limit_strategy(model: &str) -> TokenLimitStrategy {
    if model.contains("4o") {
        debug!(model = %model, strategy = "MaxTokens", "モデルは4oファミリー");
        TokenLimitStrategy::MaxTokens
    } else {
        debug!(model = %model, strategy = "MaxCompletionTokens", "モデルは5系ファミリー");
        TokenLimitStrategy::MaxCompletionTokens
    }
}

/// system + user の2メッセージを構築する
fn build_messages(system: &str, user: &str) -> Result<Vec<ChatCompletionRequestMessage>> {
    let system = ChatCompletionRequestSystemMessageArgs::default()
        .content(system)
        .build()?;
    let user = ChatCompletionRequestUserMessageArgs::default()
        .content(user)
        .build()?;
    Ok(vec![system.into(), user.into()])
}

/// CompletionRequestからChatCompletionリクエストを構築する
///
/// # Arguments
/// * `request` - モデル呼び出しの入力一式
///
/// # Returns
/// JSONモード時は `response_format = json_object` を付与したリクエスト
pub fn build_chat_request(request: &CompletionRequest) -> Result<CreateChatCompletionRequest> {
    let mut builder = CreateChatCompletionRequestArgs::default();
    builder
        .model(&request.model)
        .messages(build_messages(&request.system, &request.user)?)
        .temperature(request.temperature);

    if request.json_mode {
        builder.response_format(ResponseFormat::JsonObject);
    }

    // トークン制限戦略に応じてリクエストを構築
    let req = match determine_token_limit_strategy(&request.model) {
        TokenLimitStrategy::MaxTokens => {
            debug!(max_tokens = request.max_tokens, "max_tokensを適用します");
            builder.max_tokens(request.max_tokens).build()?
        }
        TokenLimitStrategy::MaxCompletionTokens => {
            debug!(max_completion_tokens = request.max_tokens, "max_completion_tokensを適用します");
            builder.max_completion_tokens(request.max_tokens).build()?
        }
    };

    debug!("ChatCompletionリクエストを構築しました");
    Ok(req)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(model: &str, json_mode: bool) -> CompletionRequest {
        CompletionRequest {
            system: "system text".to_string(),
            user: "user text".to_string(),
            model: model.to_string(),
            temperature: 0.6,
            json_mode,
            max_tokens: 1234,
        }
    }

    #[test]
    fn json_mode_sets_response_format() {
        let req = build_chat_request(&completion("gpt-4o", true)).unwrap();
        assert!(matches!(req.response_format, Some(ResponseFormat::JsonObject)));
        assert_eq!(req.temperature, Some(0.6));
        assert_eq!(req.model, "gpt-4o");
    }

    #[test]
    fn prompt_only_mode_leaves_response_format_unset() {
        let req = build_chat_request(&completion("gpt-4o", false)).unwrap();
        assert!(req.response_format.is_none());
    }

    #[test]
    fn messages_are_system_then_user() {
        let req = build_chat_request(&completion("gpt-4o", true)).unwrap();
        assert_eq!(req.messages.len(), 2);
        assert!(matches!(req.messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(req.messages[1], ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    #[allow(deprecated)]
    fn token_limit_field_follows_model_family() {
        let req = build_chat_request(&completion("gpt-4o-mini", true)).unwrap();
        assert_eq!(req.max_tokens, Some(1234));
        assert_eq!(req.max_completion_tokens, None);

        let req = build_chat_request(&completion("gpt-5", true)).unwrap();
        assert_eq!(req.max_tokens, None);
        assert_eq!(req.max_completion_tokens, Some(1234));
    }

    #[test]
    fn strategy_detection() {
        assert_eq!(determine_token_limit_strategy("gpt-4o"), TokenLimitStrategy::MaxTokens);
        assert_eq!(determine_token_limit_strategy("gpt-5-mini"), TokenLimitStrategy::MaxCompletionTokens);
    }
}
