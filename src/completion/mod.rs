//! Completion orchestration: trigger gating, caching, deadline-bounded
//! provider dispatch, and the host-facing service.

mod cache;
mod orchestrator;
mod service;
mod trigger;

pub use cache::{CompletionCache, cache_key};
pub use orchestrator::{
    CompletionOrchestrator, CompletionOutcome, TriggerKind, clean_suggestion,
};
pub use service::CompletionService;
pub use trigger::{
    LineKind, SUPPORTED_EXTENSIONS, TriggerDecision, TriggerPolicy, TriggerReason, classify_line,
    is_incomplete_code, looks_like_comment,
};
