//! Provider abstraction over remote text-completion backends.
//!
//! Both concrete providers receive the same provider-agnostic prompt and
//! return plain suggestion text; everything wire-specific (auth headers,
//! payload shape, response decoding) lives behind this trait.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no API credential configured")]
    Unauthenticated,

    #[error("provider returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("request deadline elapsed")]
    Timeout,

    #[error("could not decode provider response: {0}")]
    ParseFailure(String),

    #[error("network error: {0}")]
    Network(String),
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name (e.g. "openai", "claude")
    fn name(&self) -> &str;

    /// Send `prompt` to the backend and return the raw suggestion text.
    /// `deadline` bounds the whole network exchange.
    async fn complete(&self, prompt: &str, deadline: Duration) -> Result<String, ProviderError>;
}

/// Map a reqwest transport failure onto the provider error taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Network(err.to_string())
    }
}
