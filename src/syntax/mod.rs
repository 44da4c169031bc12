//! Tree-sitter language registry for the structure-context walk.
//!
//! Kotlin and Scala are on the completion allow-list but ship no grammar
//! here; callers are expected to fall back to text heuristics for them, and
//! for any source a grammar refuses to parse.

use thiserror::Error;
use tree_sitter::{Language, Parser, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageSupport {
    Java,
    Python,
    JavaScript,
    TypeScript,
    Kotlin,
    Scala,
}

impl LanguageSupport {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "java" => Some(Self::Java),
            "py" => Some(Self::Python),
            "js" | "jsx" => Some(Self::JavaScript),
            "ts" | "tsx" => Some(Self::TypeScript),
            "kt" | "kts" => Some(Self::Kotlin),
            "scala" => Some(Self::Scala),
            _ => None,
        }
    }

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        Self::from_extension(extension)
    }

    /// Whether a tree-sitter grammar is bundled for this language
    pub fn has_grammar(self) -> bool {
        !matches!(self, Self::Kotlin | Self::Scala)
    }
}

#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("no grammar available for {0:?}")]
    UnsupportedLanguage(LanguageSupport),

    #[error("grammar for {0:?} was rejected by the parser: {1}")]
    Grammar(LanguageSupport, tree_sitter::LanguageError),

    #[error("failed to parse source")]
    Parse,
}

fn grammar_for(language: LanguageSupport) -> Result<Language, SyntaxError> {
    let lang = match language {
        LanguageSupport::Java => tree_sitter_java::LANGUAGE,
        LanguageSupport::Python => tree_sitter_python::LANGUAGE,
        LanguageSupport::JavaScript => tree_sitter_javascript::LANGUAGE,
        LanguageSupport::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT,
        LanguageSupport::Kotlin | LanguageSupport::Scala => {
            return Err(SyntaxError::UnsupportedLanguage(language));
        }
    };
    Ok(lang.into())
}

/// Parse `source` with the grammar for `language`.
pub fn parse(source: &str, language: LanguageSupport) -> Result<Tree, SyntaxError> {
    let mut parser = Parser::new();
    parser
        .set_language(&grammar_for(language)?)
        .map_err(|err| SyntaxError::Grammar(language, err))?;
    parser.parse(source, None).ok_or(SyntaxError::Parse)
}
