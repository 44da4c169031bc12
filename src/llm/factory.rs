//! Provider selection from configuration.

use crate::config::{CopilotConfig, ProviderKind};

use super::provider::CompletionProvider;
use super::providers::{ClaudeProvider, OpenAiProvider};

/// Instantiate the provider the config selects. Credentials may be empty;
/// the provider reports `Unauthenticated` at call time in that case.
pub fn create_provider(config: &CopilotConfig) -> Box<dyn CompletionProvider> {
    match config.provider {
        ProviderKind::OpenAi => Box::new(OpenAiProvider::from_config(
            Some(config.openai_api_key.clone()),
            config.model.clone(),
            None,
        )),
        ProviderKind::Claude => Box::new(ClaudeProvider::from_config(
            Some(config.anthropic_api_key.clone()),
            config.model.clone(),
            None,
        )),
    }
}
