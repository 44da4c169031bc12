//! Deadline-bounded completion dispatch with response caching and cleanup.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::config::CopilotConfig;
use crate::context::ContextBundle;
use crate::llm::{CompletionProvider, ProviderError};

use super::cache::{CompletionCache, cache_key};

/// How a completion request was initiated; selects the deadline budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    /// Fired while the user types; short deadline
    Automatic,
    /// Explicitly requested; generous deadline
    Manual,
}

/// What the host gets back for one request. Provider failures surface here as
/// values, never as panics or errors crossing the async boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Suggestion(String),
    NoSuggestion,
    Failed(String),
}

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```\w*\n?").expect("code fence pattern is valid"));

/// Strip fenced code-block delimiters and outer whitespace from a raw
/// provider suggestion.
pub fn clean_suggestion(raw: &str) -> String {
    CODE_FENCE.replace_all(raw, "").trim().to_string()
}

pub struct CompletionOrchestrator {
    provider: Box<dyn CompletionProvider>,
    cache: Arc<CompletionCache>,
    automatic_timeout: Duration,
    manual_timeout: Duration,
    caching_enabled: bool,
}

impl CompletionOrchestrator {
    pub fn new(
        provider: Box<dyn CompletionProvider>,
        cache: Arc<CompletionCache>,
        config: &CopilotConfig,
    ) -> Self {
        Self {
            provider,
            cache,
            automatic_timeout: config.automatic_timeout,
            manual_timeout: config.manual_timeout,
            caching_enabled: config.enable_caching,
        }
    }

    /// Provider-agnostic prompt: instruction preamble, context, current line,
    /// completion cue.
    pub fn build_prompt(context: &str, current_line: &str) -> String {
        format!(
            "Complete the following code. Provide only the completion, no explanations:\n\n\
             Context:\n{context}\n\nCurrent line to complete:\n{current_line}\n\nCompletion:"
        )
    }

    /// Resolve a completion for the bundle: cache first, then one provider
    /// call under the trigger's deadline. Cache insertion is the only side
    /// effect.
    pub async fn get_completion(
        &self,
        bundle: &ContextBundle,
        current_line: &str,
        trigger: TriggerKind,
    ) -> CompletionOutcome {
        let key = cache_key(bundle.as_text(), current_line);
        if self.caching_enabled {
            if let Some(cached) = self.cache.get(&key) {
                debug!(provider = self.provider.name(), "serving completion from cache");
                return CompletionOutcome::Suggestion(cached);
            }
        }

        let prompt = Self::build_prompt(bundle.as_text(), current_line);
        let deadline = match trigger {
            TriggerKind::Automatic => self.automatic_timeout,
            TriggerKind::Manual => self.manual_timeout,
        };

        debug!(
            provider = self.provider.name(),
            deadline_ms = deadline.as_millis() as u64,
            prompt_chars = prompt.chars().count(),
            "dispatching completion request"
        );

        let result = tokio::time::timeout(deadline, self.provider.complete(&prompt, deadline)).await;
        match result {
            Err(_) => {
                warn!(
                    provider = self.provider.name(),
                    deadline_ms = deadline.as_millis() as u64,
                    "completion request timed out"
                );
                CompletionOutcome::Failed(ProviderError::Timeout.to_string())
            }
            Ok(Err(err)) => {
                warn!(provider = self.provider.name(), error = %err, "completion request failed");
                CompletionOutcome::Failed(err.to_string())
            }
            Ok(Ok(raw)) => {
                let cleaned = clean_suggestion(&raw);
                if cleaned.is_empty() {
                    return CompletionOutcome::NoSuggestion;
                }
                if self.caching_enabled {
                    self.cache.insert(key, cleaned.clone());
                }
                CompletionOutcome::Suggestion(cleaned)
            }
        }
    }

    pub fn cache(&self) -> &Arc<CompletionCache> {
        &self.cache
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_strips_fences_and_whitespace() {
        assert_eq!(
            clean_suggestion("```java\nreturn value;\n```"),
            "return value;"
        );
        assert_eq!(clean_suggestion("```\nx = 1\n```"), "x = 1");
        assert_eq!(clean_suggestion("  plain text  "), "plain text");
        assert_eq!(clean_suggestion("``````"), "");
    }

    #[test]
    fn prompt_has_the_fixed_sections_in_order() {
        let prompt = CompletionOrchestrator::build_prompt("CTX", "LINE");
        let context_at = prompt.find("Context:\nCTX").unwrap();
        let line_at = prompt.find("Current line to complete:\nLINE").unwrap();
        let cue_at = prompt.find("Completion:").unwrap();
        assert!(prompt.starts_with("Complete the following code."));
        assert!(context_at < line_at && line_at < cue_at);
    }
}
