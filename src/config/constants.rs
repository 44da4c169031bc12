//! Centralized constants so provider URLs, model ids, and tuning knobs are not
//! hardcoded throughout the codebase.

/// Provider endpoint constants
pub mod urls {
    pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
    pub const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com/v1";
    pub const ANTHROPIC_VERSION: &str = "2023-06-01";
}

/// Model ID constants
pub mod models {
    pub mod openai {
        pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
    }

    pub mod anthropic {
        pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
    }
}

/// Environment variable names consumed by `CopilotConfig::from_env`
pub mod env_vars {
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
    pub const AI_PROVIDER: &str = "AI_PROVIDER";
}

/// Default tuning values; all of them can be overridden through `CopilotConfig`
pub mod defaults {
    /// Deadline for completions fired while the user is typing
    pub const AUTOMATIC_TIMEOUT_MS: u64 = 3_000;
    /// Deadline for completions the user asked for explicitly
    pub const MANUAL_TIMEOUT_MS: u64 = 30_000;
    pub const CACHE_SIZE: usize = 100;
    pub const OPENAI_MAX_TOKENS: u32 = 100;
    pub const ANTHROPIC_MAX_TOKENS: u32 = 150;
    pub const COMPLETION_TEMPERATURE: f32 = 0.1;
    /// Minimum trimmed line length before an automatic completion is worth it
    pub const MIN_TRIGGER_LENGTH: usize = 3;
}

/// Prompt fragments shared by every provider
pub mod prompts {
    pub const SYSTEM_INSTRUCTION: &str = "You are a code completion assistant. Provide clean, accurate code completions without explanations.";
}
