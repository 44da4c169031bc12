//! Shared test support: a scriptable in-memory completion provider.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use aicopilot_core::llm::{CompletionProvider, ProviderError};
use async_trait::async_trait;

#[derive(Clone, Copy)]
pub enum FailureMode {
    None,
    Unauthenticated,
    Upstream,
}

/// Provider double that records how often it is called and can be told to
/// stall past any deadline or to fail.
pub struct MockProvider {
    response: String,
    delay: Duration,
    failure: FailureMode,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn returning(response: &str) -> Self {
        Self {
            response: response.to_string(),
            delay: Duration::ZERO,
            failure: FailureMode::None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing_with(mut self, failure: FailureMode) -> Self {
        self.failure = failure;
        self
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, _prompt: &str, _deadline: Duration) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.failure {
            FailureMode::None => Ok(self.response.clone()),
            FailureMode::Unauthenticated => Err(ProviderError::Unauthenticated),
            FailureMode::Upstream => Err(ProviderError::Upstream {
                status: 429,
                body: "rate limited".to_string(),
            }),
        }
    }
}
