//! Cheap textual gating that decides whether an automatic (as-you-type)
//! completion attempt is worth making, ordered from cheapest and most
//! specific to most general. Explicitly requested completions skip this
//! cascade; they only need a configured provider.

use crate::config::CopilotConfig;
use crate::config::constants::defaults;

/// File extensions completions are offered for
pub const SUPPORTED_EXTENSIONS: &[&str] = &["java", "py", "js", "ts", "kt", "scala"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    ProviderUnavailable,
    UnsupportedFileType,
    InComment,
    CommentCompletionDisabled,
    IncompleteCode,
    CodeCompletionDisabled,
    MinimumLength,
    LineTooShort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerDecision {
    pub trigger: bool,
    pub reason: TriggerReason,
}

impl TriggerDecision {
    fn allow(reason: TriggerReason) -> Self {
        Self {
            trigger: true,
            reason,
        }
    }

    fn deny(reason: TriggerReason) -> Self {
        Self {
            trigger: false,
            reason,
        }
    }
}

/// What kind of line the cursor sits on; drives both triggering and any
/// host-side presentation choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Comment,
    ImportStatement,
    ClassDefinition,
    FunctionDefinition,
    BlockStart,
    General,
}

#[derive(Debug, Clone)]
pub struct TriggerPolicy {
    enable_comment_completion: bool,
    enable_code_completion: bool,
}

impl TriggerPolicy {
    pub fn from_config(config: &CopilotConfig) -> Self {
        Self {
            enable_comment_completion: config.enable_comment_completion,
            enable_code_completion: config.enable_code_completion,
        }
    }

    /// Ordered cascade: provider availability, file type, comment context,
    /// incomplete-statement shape, minimum line length.
    pub fn should_trigger(
        &self,
        extension: &str,
        in_comment: bool,
        current_line: &str,
        provider_available: bool,
    ) -> TriggerDecision {
        if !provider_available {
            return TriggerDecision::deny(TriggerReason::ProviderUnavailable);
        }
        if !SUPPORTED_EXTENSIONS.contains(&extension) {
            return TriggerDecision::deny(TriggerReason::UnsupportedFileType);
        }
        if in_comment {
            return if self.enable_comment_completion {
                TriggerDecision::allow(TriggerReason::InComment)
            } else {
                TriggerDecision::deny(TriggerReason::CommentCompletionDisabled)
            };
        }
        if !self.enable_code_completion {
            return TriggerDecision::deny(TriggerReason::CodeCompletionDisabled);
        }
        if is_incomplete_code(current_line) {
            return TriggerDecision::allow(TriggerReason::IncompleteCode);
        }
        if current_line.trim().chars().count() >= defaults::MIN_TRIGGER_LENGTH {
            TriggerDecision::allow(TriggerReason::MinimumLength)
        } else {
            TriggerDecision::deny(TriggerReason::LineTooShort)
        }
    }
}

/// Incomplete-statement shapes: a block opener, or a definition keyword with
/// an argument list started.
pub fn is_incomplete_code(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.ends_with(':') || trimmed.ends_with('{') {
        return true;
    }
    let has_definition_keyword = ["def ", "function ", "public ", "private ", "protected "]
        .iter()
        .any(|keyword| trimmed.contains(keyword));
    has_definition_keyword && trimmed.contains('(')
}

/// Cheap in-comment check for hosts without a parse-tree view of the buffer.
pub fn looks_like_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('#')
}

/// Classify the current line for completion purposes.
pub fn classify_line(line: &str, in_comment: bool) -> LineKind {
    let trimmed = line.trim();
    if in_comment || looks_like_comment(trimmed) {
        return LineKind::Comment;
    }
    if trimmed.contains("import ") || trimmed.contains("from ") {
        return LineKind::ImportStatement;
    }
    if trimmed.contains("class ") {
        return LineKind::ClassDefinition;
    }
    if trimmed.contains("def ")
        || trimmed.contains("function ")
        || (trimmed.contains('(')
            && (trimmed.contains("public ") || trimmed.contains("private ")))
    {
        return LineKind::FunctionDefinition;
    }
    if trimmed.ends_with(':') || trimmed.ends_with('{') || trimmed.ends_with('(') {
        return LineKind::BlockStart;
    }
    LineKind::General
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> TriggerPolicy {
        TriggerPolicy::from_config(&CopilotConfig::default())
    }

    #[test]
    fn provider_unavailable_always_denies() {
        let policy = policy();
        for (extension, in_comment, line) in [
            ("java", true, "// write a parser"),
            ("py", false, "def main():"),
            ("ts", false, "const parser = new"),
        ] {
            let decision = policy.should_trigger(extension, in_comment, line, false);
            assert!(!decision.trigger);
            assert_eq!(decision.reason, TriggerReason::ProviderUnavailable);
        }
    }

    #[test]
    fn unsupported_extensions_deny_before_anything_else() {
        let decision = policy().should_trigger("rb", true, "# a comment", true);
        assert!(!decision.trigger);
        assert_eq!(decision.reason, TriggerReason::UnsupportedFileType);
    }

    #[test]
    fn comments_are_the_primary_trigger() {
        let decision = policy().should_trigger("java", true, "//", true);
        assert!(decision.trigger);
        assert_eq!(decision.reason, TriggerReason::InComment);
    }

    #[test]
    fn incomplete_statements_trigger_regardless_of_length() {
        let policy = policy();
        for line in ["if x:", "while (true) {", "def f(", "public int get("] {
            let decision = policy.should_trigger("py", false, line, true);
            assert!(decision.trigger, "expected trigger for {line:?}");
        }
    }

    #[test]
    fn short_plain_lines_do_not_trigger() {
        let decision = policy().should_trigger("js", false, "  ab  ", true);
        assert!(!decision.trigger);
        assert_eq!(decision.reason, TriggerReason::LineTooShort);

        let decision = policy().should_trigger("js", false, "abc", true);
        assert!(decision.trigger);
        assert_eq!(decision.reason, TriggerReason::MinimumLength);
    }

    #[test]
    fn toggles_gate_their_trigger_paths() {
        let config = CopilotConfig {
            enable_comment_completion: false,
            enable_code_completion: false,
            ..CopilotConfig::default()
        };
        let policy = TriggerPolicy::from_config(&config);

        let decision = policy.should_trigger("java", true, "// comment", true);
        assert_eq!(decision.reason, TriggerReason::CommentCompletionDisabled);

        let decision = policy.should_trigger("java", false, "int value = compute()", true);
        assert_eq!(decision.reason, TriggerReason::CodeCompletionDisabled);
    }

    #[test]
    fn classifies_common_line_shapes() {
        assert_eq!(classify_line("# note", false), LineKind::Comment);
        assert_eq!(classify_line("anything", true), LineKind::Comment);
        assert_eq!(
            classify_line("import java.util.List;", false),
            LineKind::ImportStatement
        );
        assert_eq!(
            classify_line("class Parser:", false),
            LineKind::ClassDefinition
        );
        assert_eq!(
            classify_line("def parse(self):", false),
            LineKind::FunctionDefinition
        );
        assert_eq!(classify_line("match value {", false), LineKind::BlockStart);
        assert_eq!(classify_line("total += 1", false), LineKind::General);
    }
}
