mod claude;
mod openai;

pub use claude::ClaudeProvider;
pub use openai::OpenAiProvider;
