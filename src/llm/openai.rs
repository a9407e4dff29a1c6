//! OpenAI-compatible chat completions client

use super::traits::*;
use crate::config::LlmSettings;
use crate::network::{HttpClient, HttpRequest, HttpResponse};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for `POST {base_url}/chat/completions`
pub struct OpenAiChat {
    client: HttpClient,
    endpoint: String,
    api_key: Option<String>,
    selector: ModelSelector,
    timeout: Duration,
}

impl OpenAiChat {
    pub fn new(client: HttpClient, settings: &LlmSettings) -> Self {
        Self {
            client,
            endpoint: format!("{}/chat/completions", settings.base_url.trim_end_matches('/')),
            api_key: settings.api_key.clone(),
            selector: ModelSelector::new(&settings.provider, &settings.model),
            timeout: Duration::from_secs_f64(settings.timeout),
        }
    }

    /// Build the HTTP request for a completion
    fn request(&self, request: &CompletionRequest) -> Result<HttpRequest, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let body = json!({
            "model": self.selector.model,
            "user": request.session_id,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.user_text },
            ],
        });

        Ok(HttpRequest::post(&self.endpoint).bearer(api_key).json(body))
    }

    /// Extract the reply text
    fn response(&self, response: HttpResponse) -> Result<String, LlmError> {
        if !response.is_success() {
            return Err(LlmError::Status {
                status: response.status,
                body: response.body_excerpt(200),
            });
        }

        let completion: ChatCompletion = response
            .json()
            .map_err(|e| LlmError::Malformed(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)
    }
}

#[async_trait]
impl LanguageModel for OpenAiChat {
    fn selector(&self) -> &ModelSelector {
        &self.selector
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let http_request = self.request(&request)?;

        debug!(
            "Invoking {}/{} for session {}",
            self.selector.provider, self.selector.model, request.session_id
        );

        let response = self
            .client
            .execute_with_timeout(http_request, self.timeout)
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        self.response(response)
    }
}
