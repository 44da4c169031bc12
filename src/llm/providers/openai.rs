use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{Value, json};

use crate::config::constants::{defaults, models, prompts, urls};
use crate::llm::provider::{CompletionProvider, ProviderError, transport_error};

/// OpenAI-style backend: bearer-token auth, chat-completions payload.
pub struct OpenAiProvider {
    api_key: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, models::openai::DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        Self {
            api_key,
            http_client: HttpClient::new(),
            base_url: urls::OPENAI_API_BASE.to_string(),
            model,
        }
    }

    pub fn from_config(
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        let mut provider = match model {
            Some(model) => Self::with_model(api_key.unwrap_or_default(), model),
            None => Self::new(api_key.unwrap_or_default()),
        };
        if let Some(base) = base_url {
            provider.base_url = base;
        }
        provider
    }

    fn build_request(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": prompts::SYSTEM_INSTRUCTION
                },
                {
                    "role": "user",
                    "content": prompt
                }
            ],
            "max_tokens": defaults::OPENAI_MAX_TOKENS,
            "temperature": defaults::COMPLETION_TEMPERATURE,
            "stream": false
        })
    }

    fn parse_response(payload: &Value) -> Result<String, ProviderError> {
        payload
            .get("choices")
            .and_then(|choices| choices.as_array())
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                ProviderError::ParseFailure("missing choices[0].message.content".to_string())
            })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, prompt: &str, deadline: Duration) -> Result<String, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::Unauthenticated);
        }

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(deadline)
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream { status, body });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| ProviderError::ParseFailure(err.to_string()))?;
        Self::parse_response(&payload)
    }
}
