//! # LLM client abstraction
//!
//! Defines the [`ModelBackend`] trait (one prompt string in, one reply string out) and its
//! implementations:
//!
//! - [`OpenAiBackend`]: any OpenAI-compatible chat completion endpoint (Gemini by default).
//! - [`BlockingBackend`]: adapts a synchronous [`BlockingModel`] by running it on tokio's
//!   blocking pool.
//!
//! Failures are returned as [`BackendError`] values rather than propagated as panics, so the
//! session controller can turn them into a user-visible message.

use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use prompt::{ChatMessage, MessageRole};
use relay_core::BackendError;

mod blocking;
mod config;
mod openai_llm;

pub use blocking::{BlockingBackend, BlockingModel};
pub use config::{EnvLlmConfig, LlmConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use openai_llm::OpenAiBackend;

/// Model backend: generates a reply for a fully assembled prompt.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, BackendError>;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage, BackendError> {
    let content = msg.content.clone();
    let built: Result<ChatCompletionRequestMessage, _> = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()
            .map(Into::into),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map(Into::into),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()
            .map(Into::into),
    };
    built.map_err(|e| BackendError::Request(format!("invalid request message: {}", e)))
}
