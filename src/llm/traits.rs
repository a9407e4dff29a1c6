//! Language-model traits and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which model to run, and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSelector {
    pub provider: String,
    pub model: String,
}

impl ModelSelector {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
        }
    }
}

/// A single completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Conversation key, forwarded for provider-side continuity
    pub session_id: String,
    pub system_prompt: String,
    pub user_text: String,
}

/// Language-model invocation errors
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("model API key is not configured")]
    MissingApiKey,

    #[error("request to model provider failed: {0}")]
    Transport(String),

    #[error("model provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed model response: {0}")]
    Malformed(String),

    #[error("model returned no text")]
    EmptyResponse,
}

/// A hosted chat model that turns a system prompt and user text into a reply
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// The model this client targets
    fn selector(&self) -> &ModelSelector;

    /// Generate plain-text reply
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}
