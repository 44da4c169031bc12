//! # aicopilot-core
//!
//! Host-independent core of an AI inline code-completion assistant. Given a
//! file snapshot and a cursor offset, it extracts a bounded textual context,
//! gates the request through cheap trigger heuristics, and orchestrates a
//! cached, deadline-bounded call to a remote completion provider.
//!
//! ## Architecture
//!
//! - `text`: line/offset conversion over a borrowed buffer snapshot.
//! - `syntax`: tree-sitter grammars for the structure-context walk.
//! - `context`: the [`context::ContextBundle`] assembly — dependencies,
//!   enclosing structure, and a line-numbered code window around the cursor,
//!   capped at 2000 characters.
//! - `llm`: the [`llm::CompletionProvider`] trait with OpenAI-style and
//!   Claude-style backends selected by configuration.
//! - `completion`: cache, trigger policy, orchestrator, and the
//!   [`completion::CompletionService`] façade hosts call.
//! - `config`: explicit, injectable runtime configuration.
//!
//! ## Quickstart
//!
//! ```rust,no_run
//! use aicopilot_core::{CompletionOutcome, CompletionService, TriggerKind};
//!
//! #[tokio::main]
//! async fn main() {
//!     let service = CompletionService::from_env();
//!     let outcome = service
//!         .request_completion("def greet():\n    ", "greet.py", "Python", 17, TriggerKind::Manual)
//!         .await;
//!     match outcome {
//!         CompletionOutcome::Suggestion(text) => println!("{text}"),
//!         CompletionOutcome::NoSuggestion => {}
//!         CompletionOutcome::Failed(reason) => eprintln!("{reason}"),
//!     }
//! }
//! ```
//!
//! Hosts own everything beyond that exchange: rendering, insertion at the
//! cursor, keybindings, and settings persistence.

pub mod completion;
pub mod config;
pub mod context;
pub mod llm;
pub mod syntax;
pub mod text;

pub use completion::{
    CompletionCache, CompletionOrchestrator, CompletionOutcome, CompletionService, TriggerDecision,
    TriggerKind, TriggerPolicy, TriggerReason,
};
pub use config::{CopilotConfig, ProviderKind};
pub use context::{ContextBundle, ContextExtractor};
pub use llm::{ClaudeProvider, CompletionProvider, OpenAiProvider, ProviderError};
pub use syntax::LanguageSupport;
pub use text::{CursorPosition, TextIndex, TextIndexError};
