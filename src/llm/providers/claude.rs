use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{Value, json};

use crate::config::constants::{defaults, models, urls};
use crate::llm::provider::{CompletionProvider, ProviderError, transport_error};

/// Claude-style backend: API-key header plus version header, messages payload.
pub struct ClaudeProvider {
    api_key: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
}

impl ClaudeProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, models::anthropic::DEFAULT_MODEL.to_string())
    }

    pub fn with_model(api_key: String, model: String) -> Self {
        Self {
            api_key,
            http_client: HttpClient::new(),
            base_url: urls::ANTHROPIC_API_BASE.to_string(),
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
            "max_tokens": defaults::ANTHROPIC_MAX_TOKENS,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        })
    }

    fn parse_response(payload: &Value) -> Result<String, ProviderError> {
        payload
            .get("content")
            .and_then(|content| content.as_array())
            .and_then(|blocks| blocks.first())
            .and_then(|block| block.get("text"))
            .and_then(|text| text.as_str())
            .map(str::to_string)
            .ok_or_else(|| ProviderError::ParseFailure("missing content[0].text".to_string()))
    }
}

#[async_trait]
impl CompletionProvider for ClaudeProvider {
    fn name(&self) -> &str {
        "claude"
    }

    async fn complete(&self, prompt: &str, deadline: Duration) -> Result<String, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::Unauthenticated);
        }

        let url = format!("{}/messages", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", urls::ANTHROPIC_VERSION)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_the_messages_payload_shape() {
        let provider = ClaudeProvider::new("sk-ant-test".to_string());
        let request = provider.build_request("complete this");
        assert_eq!(request["max_tokens"], 150);
        assert_eq!(request["messages"][0]["role"], "user");
        assert_eq!(request["messages"][0]["content"], "complete this");
        assert!(request.get("temperature").is_none());
    }

    #[test]
    fn parses_text_with_escaped_characters() {
        let body = r#"{
            "content": [{"type": "text", "text": "a \"quoted\" word\nnext line"}],
            "stop_reason": "end_turn"
        }"#;
        let payload: Value = serde_json::from_str(body).unwrap();
        assert_eq!(
            ClaudeProvider::parse_response(&payload).unwrap(),
            "a \"quoted\" word\nnext line"
        );
    }

    #[test]
    fn empty_content_is_a_parse_failure() {
        let payload: Value = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(matches!(
            ClaudeProvider::parse_response(&payload),
            Err(ProviderError::ParseFailure(_))
        ));
    }
}
