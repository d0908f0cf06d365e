//! OpenAI Chat Completions client implementing `CompletionClient`.
//!
//! Uses the real Chat Completions API with `response_format = json_object` so
//! the model returns a single JSON object. Requires `OPENAI_API_KEY` (or
//! explicit config). Transport and API errors surface as
//! `WheelError::Completion`; content shape is the caller's concern.

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::WheelError;
use crate::llm::{CompletionClient, CompletionRequest};

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI Chat Completions client.
///
/// Uses `OPENAI_API_KEY` from the environment by default; or provide config
/// via [`OpenAiCompletion::with_config`]. Every request asks for a JSON
/// object response so the `impacts` array can be parsed downstream.
pub struct OpenAiCompletion {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompletion {
    /// Builds a client with default config (API key from `OPENAI_API_KEY` env).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
        }
    }

    /// Builds a client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, WheelError> {
        let messages = vec![
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage::from(
                request.system.as_str(),
            )),
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(
                request.prompt.as_str(),
            )),
        ];

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(messages);
        args.temperature(request.temperature);
        args.response_format(ResponseFormat::JsonObject);
        let api_request = args
            .build()
            .map_err(|e| WheelError::Completion(format!("request build failed: {}", e)))?;

        debug!(
            model = %self.model,
            temperature = request.temperature,
            count = request.count,
            "chat completion create"
        );
        trace!(prompt = %request.prompt, "completion prompt");

        let response = self
            .client
            .chat()
            .create(api_request)
            .await
            .map_err(|e| WheelError::Completion(format!("OpenAI API error: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| WheelError::Completion("OpenAI returned no choices".to_string()))?;
        let content = choice.message.content.unwrap_or_default();
        trace!(content = %content, "completion response");
        Ok(content)
    }
}
