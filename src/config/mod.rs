//! Runtime configuration for the completion core.
//!
//! The config is an explicitly owned value handed to the components that need
//! it; nothing in this crate reads ambient global state after construction.
//! `from_env` builds a config the way the original environment-driven setup
//! worked (`OPENAI_API_KEY` / `ANTHROPIC_API_KEY` / `AI_PROVIDER`), while hosts
//! with their own settings store can fill the struct directly.

pub mod constants;

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use constants::{defaults, env_vars};

/// Which remote completion backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Claude,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopilotConfig {
    pub provider: ProviderKind,
    pub openai_api_key: String,
    pub anthropic_api_key: String,
    /// Overrides the provider's default model when set
    pub model: Option<String>,
    /// Deadline for automatic (as-you-type) completion requests
    pub automatic_timeout: Duration,
    /// Deadline for explicitly requested completions
    pub manual_timeout: Duration,
    pub cache_size: usize,
    pub enable_auto_completion: bool,
    pub enable_comment_completion: bool,
    pub enable_code_completion: bool,
    pub enable_caching: bool,
}

impl Default for CopilotConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenAi,
            openai_api_key: String::new(),
            anthropic_api_key: String::new(),
            model: None,
            automatic_timeout: Duration::from_millis(defaults::AUTOMATIC_TIMEOUT_MS),
            manual_timeout: Duration::from_millis(defaults::MANUAL_TIMEOUT_MS),
            cache_size: defaults::CACHE_SIZE,
            enable_auto_completion: true,
            enable_comment_completion: true,
            enable_code_completion: true,
            enable_caching: true,
        }
    }
}

impl CopilotConfig {
    /// Build a config from the environment. `AI_PROVIDER=claude` selects the
    /// Claude backend; anything else (including unset) means OpenAI.
    pub fn from_env() -> Self {
        let provider = match env::var(env_vars::AI_PROVIDER) {
            Ok(value) if value.eq_ignore_ascii_case("claude") => ProviderKind::Claude,
            _ => ProviderKind::OpenAi,
        };

        Self {
            provider,
            openai_api_key: env::var(env_vars::OPENAI_API_KEY).unwrap_or_default(),
            anthropic_api_key: env::var(env_vars::ANTHROPIC_API_KEY).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Credential for the currently selected provider
    pub fn active_api_key(&self) -> &str {
        match self.provider {
            ProviderKind::OpenAi => &self.openai_api_key,
            ProviderKind::Claude => &self.anthropic_api_key,
        }
    }

    /// A provider is available when its credential is configured
    pub fn provider_available(&self) -> bool {
        !self.active_api_key().trim().is_empty()
    }
}
