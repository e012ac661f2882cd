//! [`ModelBackend`] over an OpenAI-compatible chat completion endpoint.

use async_trait::async_trait;
use openai_client::{ChatCompletionError, OpenAIClient};
use prompt::to_chat_messages;
use relay_core::BackendError;
use tracing::{info, instrument, warn};

use super::{chat_message_to_openai, LlmConfig, ModelBackend, DEFAULT_MODEL};

/// Sends the prompt as one user message, preceded by the optional system instruction.
#[derive(Clone)]
pub struct OpenAiBackend {
    client: OpenAIClient,
    model: String,
    system_prompt: Option<String>,
}

impl OpenAiBackend {
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
        }
    }

    /// Builds a backend from any [`LlmConfig`] (endpoint, model, system prompt).
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
            .with_system_prompt_opt(config.system_prompt().map(str::to_string))
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ModelBackend for OpenAiBackend {
    #[instrument(
        skip(self, prompt),
        fields(model = %self.model, prompt_chars = prompt.chars().count())
    )]
    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let messages = to_chat_messages(self.system_prompt.as_deref(), prompt)
            .iter()
            .map(chat_message_to_openai)
            .collect::<Result<Vec<_>, _>>()?;

        match self.client.chat_completion(&self.model, messages).await {
            Ok(text) => {
                info!(reply_chars = text.chars().count(), "model reply received");
                Ok(text)
            }
            Err(ChatCompletionError::NoChoices) => {
                warn!("model returned no choices");
                Err(BackendError::EmptyChoices)
            }
            Err(e) => {
                warn!(error = %e, "model call failed");
                Err(BackendError::Request(e.to_string()))
            }
        }
    }
}
