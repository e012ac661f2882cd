//! # OpenAI API client
//!
//! Thin wrapper around [async-openai] for chat completion against any OpenAI-compatible endpoint
//! (OpenAI, Gemini's OpenAI-compatible API, local proxies). Provides token masking for safe
//! logging and a simple request/response API.

use async_openai::{
    config::OpenAIConfig, error::OpenAIError, types::CreateChatCompletionRequestArgs, Client,
};
use std::sync::Arc;
use thiserror::Error;

pub use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

#[derive(Error, Debug)]
pub enum ChatCompletionError {
    #[error("{0}")]
    Api(#[from] OpenAIError),

    #[error("response contained no choices")]
    NoChoices,
}

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// OpenAI chat client. Wraps async-openai client and keeps a masked copy of the key for logging.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<OpenAIConfig>>,
    masked_key: String,
}

impl OpenAIClient {
    /// Builds a client with a custom base URL (e.g. Gemini's OpenAI-compatible endpoint or a proxy).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self::from_config(OpenAIConfig::new().with_api_base(base_url), api_key)
    }

    fn from_config(config: OpenAIConfig, api_key: String) -> Self {
        let masked_key = mask_token(&api_key);
        Self {
            client: Arc::new(Client::with_config(config.with_api_key(api_key))),
            masked_key,
        }
    }

    /// Sends a chat completion request and returns the first choice's content.
    ///
    /// Logs the masked API key, the request JSON at debug level and token usage.
    pub async fn chat_completion(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<String, ChatCompletionError> {
        tracing::info!(
            model = %model,
            message_count = messages.len(),
            api_key = %self.masked_key,
            "chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .build()?;

        if let Ok(json) = serde_json::to_string_pretty(&request) {
            tracing::debug!(request_json = %json, "chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "chat_completion usage"
            );
        }

        response
            .choices
            .first()
            .map(|choice| choice.message.content.clone().unwrap_or_default())
            .ok_or(ChatCompletionError::NoChoices)
    }
}
