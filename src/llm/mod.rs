//! Remote completion backends behind a single [`CompletionProvider`] trait.

pub mod factory;
pub mod provider;
pub mod providers;

pub use factory::create_provider;
pub use provider::{CompletionProvider, ProviderError};
pub use providers::{ClaudeProvider, OpenAiProvider};
