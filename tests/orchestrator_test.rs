//! Orchestrator behavior: caching, deadlines, cleanup, failure mapping.

mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use aicopilot_core::completion::{CompletionCache, CompletionOrchestrator, CompletionOutcome, TriggerKind};
use aicopilot_core::config::CopilotConfig;
use aicopilot_core::context::{ContextBundle, ContextExtractor};

use common::{FailureMode, MockProvider};

fn test_config() -> CopilotConfig {
    CopilotConfig {
        openai_api_key: "test-key".to_string(),
        automatic_timeout: Duration::from_millis(100),
        manual_timeout: Duration::from_millis(500),
        ..CopilotConfig::default()
    }
}

fn sample_bundle() -> ContextBundle {
    let source = "import os\n\ndef add(a, b):\n    ";
    ContextExtractor::new().extract(source, source.len(), "math.py", "Python")
}

fn orchestrator_with(
    provider: MockProvider,
    config: &CopilotConfig,
) -> (CompletionOrchestrator, Arc<CompletionCache>) {
    let cache = Arc::new(CompletionCache::new(config.cache_size));
    let orchestrator = CompletionOrchestrator::new(Box::new(provider), Arc::clone(&cache), config);
    (orchestrator, cache)
}

#[tokio::test]
async fn cache_hit_resolves_without_a_provider_call() {
    let config = test_config();
    let provider = MockProvider::returning("return a + b");
    let calls = provider.call_counter();
    let (orchestrator, _cache) = orchestrator_with(provider, &config);
    let bundle = sample_bundle();

    let first = orchestrator
        .get_completion(&bundle, "    ", TriggerKind::Automatic)
        .await;
    let second = orchestrator
        .get_completion(&bundle, "    ", TriggerKind::Automatic)
        .await;

    assert_eq!(first, CompletionOutcome::Suggestion("return a + b".to_string()));
    assert_eq!(second, first);
    assert_eq!(calls.load(Ordering::SeqCst), 1, "second request must come from cache");
}

#[tokio::test]
async fn timeout_resolves_as_failed_within_slack() {
    let config = test_config();
    let provider = MockProvider::returning("too late").with_delay(Duration::from_secs(5));
    let (orchestrator, _cache) = orchestrator_with(provider, &config);
    let bundle = sample_bundle();

    let started = Instant::now();
    let outcome = orchestrator
        .get_completion(&bundle, "    ", TriggerKind::Automatic)
        .await;
    let elapsed = started.elapsed();

    match outcome {
        CompletionOutcome::Failed(reason) => assert!(reason.contains("deadline")),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(
        elapsed < Duration::from_secs(1),
        "timeout must not hang: {elapsed:?}"
    );
}

#[tokio::test]
async fn blank_responses_mean_no_suggestion_and_are_never_cached() {
    let config = test_config();
    let provider = MockProvider::returning("  \n ```\n``` ");
    let calls = provider.call_counter();
    let (orchestrator, cache) = orchestrator_with(provider, &config);
    let bundle = sample_bundle();

    let first = orchestrator
        .get_completion(&bundle, "    ", TriggerKind::Automatic)
        .await;
    let second = orchestrator
        .get_completion(&bundle, "    ", TriggerKind::Automatic)
        .await;

    assert_eq!(first, CompletionOutcome::NoSuggestion);
    assert_eq!(second, CompletionOutcome::NoSuggestion);
    assert!(cache.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn fenced_responses_are_cleaned_before_caching() {
    let config = test_config();
    let provider = MockProvider::returning("```python\nreturn a + b\n```");
    let (orchestrator, cache) = orchestrator_with(provider, &config);
    let bundle = sample_bundle();

    let outcome = orchestrator
        .get_completion(&bundle, "    ", TriggerKind::Manual)
        .await;

    assert_eq!(outcome, CompletionOutcome::Suggestion("return a + b".to_string()));
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn provider_failures_surface_as_failed_values() {
    let config = test_config();

    let provider = MockProvider::returning("").failing_with(FailureMode::Unauthenticated);
    let (orchestrator, _cache) = orchestrator_with(provider, &config);
    let outcome = orchestrator
        .get_completion(&sample_bundle(), "    ", TriggerKind::Automatic)
        .await;
    assert_eq!(
        outcome,
        CompletionOutcome::Failed("no API credential configured".to_string())
    );

    let provider = MockProvider::returning("").failing_with(FailureMode::Upstream);
    let (orchestrator, cache) = orchestrator_with(provider, &config);
    let outcome = orchestrator
        .get_completion(&sample_bundle(), "    ", TriggerKind::Automatic)
        .await;
    match outcome {
        CompletionOutcome::Failed(reason) => {
            assert!(reason.contains("429"), "reason should carry the status: {reason}");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(cache.is_empty(), "failures must never be cached");
}

#[tokio::test]
async fn caching_can_be_disabled_entirely() {
    let config = CopilotConfig {
        enable_caching: false,
        ..test_config()
    };
    let provider = MockProvider::returning("return a + b");
    let calls = provider.call_counter();
    let (orchestrator, cache) = orchestrator_with(provider, &config);
    let bundle = sample_bundle();

    for _ in 0..2 {
        let outcome = orchestrator
            .get_completion(&bundle, "    ", TriggerKind::Automatic)
            .await;
        assert_eq!(outcome, CompletionOutcome::Suggestion("return a + b".to_string()));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(cache.is_empty());
}
