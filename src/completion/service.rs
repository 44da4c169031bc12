//! Inbound façade for hosts: gate, extract, orchestrate.

use std::sync::Arc;

use tracing::debug;

use crate::config::CopilotConfig;
use crate::context::ContextExtractor;
use crate::llm::{self, CompletionProvider};
use crate::text::TextIndex;

use super::cache::CompletionCache;
use super::orchestrator::{CompletionOrchestrator, CompletionOutcome, TriggerKind};
use super::trigger::{self, TriggerPolicy};

/// One service instance per process; holds the cache and the configured
/// provider. Each `request_completion` call is an independent future, so
/// hosts may spawn concurrent requests freely — no ordering or coalescing is
/// guaranteed between them.
pub struct CompletionService {
    config: CopilotConfig,
    extractor: ContextExtractor,
    policy: TriggerPolicy,
    orchestrator: CompletionOrchestrator,
}

impl CompletionService {
    pub fn new(config: CopilotConfig) -> Self {
        let provider = llm::create_provider(&config);
        Self::with_provider(config, provider)
    }

    pub fn from_env() -> Self {
        Self::new(CopilotConfig::from_env())
    }

    /// Build the service around an explicit provider; the seam used by tests
    /// and by hosts with custom backends.
    pub fn with_provider(config: CopilotConfig, provider: Box<dyn CompletionProvider>) -> Self {
        let cache = Arc::new(CompletionCache::new(config.cache_size));
        let orchestrator = CompletionOrchestrator::new(provider, cache, &config);
        Self {
            policy: TriggerPolicy::from_config(&config),
            extractor: ContextExtractor::new(),
            orchestrator,
            config,
        }
    }

    /// Entry point for hosts. On `Suggestion(text)` the host inserts `text`
    /// at `cursor_offset` and advances the cursor by its length; the buffer
    /// itself is never touched here.
    ///
    /// The textual trigger cascade applies to `Automatic` requests only. A
    /// `Manual` request is an explicit user ask: it needs a configured
    /// provider and nothing else.
    pub async fn request_completion(
        &self,
        file_text: &str,
        file_name: &str,
        language_id: &str,
        cursor_offset: usize,
        trigger_kind: TriggerKind,
    ) -> CompletionOutcome {
        if trigger_kind == TriggerKind::Automatic && !self.config.enable_auto_completion {
            return CompletionOutcome::NoSuggestion;
        }

        let index = TextIndex::new(file_text);
        let current_line = match index.position_of(cursor_offset) {
            Ok(pos) => &file_text[pos.line_start..pos.line_end],
            Err(err) => return CompletionOutcome::Failed(err.to_string()),
        };

        match trigger_kind {
            TriggerKind::Manual => {
                if !self.config.provider_available() {
                    debug!(file = file_name, "manual completion without a configured provider");
                    return CompletionOutcome::NoSuggestion;
                }
            }
            TriggerKind::Automatic => {
                let extension = file_name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
                let in_comment = trigger::looks_like_comment(current_line);
                let decision = self.policy.should_trigger(
                    extension,
                    in_comment,
                    current_line,
                    self.config.provider_available(),
                );
                if !decision.trigger {
                    debug!(reason = ?decision.reason, file = file_name, "completion not triggered");
                    return CompletionOutcome::NoSuggestion;
                }
            }
        }

        let bundle = self
            .extractor
            .extract(file_text, cursor_offset, file_name, language_id);
        self.orchestrator
            .get_completion(&bundle, current_line, trigger_kind)
            .await
    }

    pub fn provider_available(&self) -> bool {
        self.config.provider_available()
    }

    pub fn cache(&self) -> &Arc<CompletionCache> {
        self.orchestrator.cache()
    }

    pub fn clear_cache(&self) {
        self.orchestrator.cache().clear();
    }
}
