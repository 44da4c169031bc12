use std::fmt::Write as _;

use crate::syntax::LanguageSupport;
use crate::text::{TextIndex, TextIndexError};

use super::structure::structure_context;

/// Upper bound on the assembled context, in characters
pub const MAX_CONTEXT_CHARS: usize = 2_000;
pub const TRUNCATION_MARKER: &str = "\n... (truncated for brevity)";
/// Marker spliced into the cursor's line at the exact column
pub const CURSOR_MARKER: char = '█';

const LINES_BEFORE_CURSOR: usize = 15;
const LINES_AFTER_CURSOR: usize = 5;
const MAX_DEPENDENCIES: usize = 15;
const DEPENDENCY_SCAN_LINES: usize = 50;
const DEPENDENCY_SCAN_HITS: usize = 20;

/// The assembled textual summary handed to a completion provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextBundle {
    pub file_name: String,
    pub language_id: String,
    pub dependency_lines: Vec<String>,
    pub structure_lines: Vec<String>,
    pub code_window: String,
    text: String,
}

impl ContextBundle {
    /// The capped, provider-ready rendering of the bundle
    pub fn as_text(&self) -> &str {
        &self.text
    }
}

/// Builds a [`ContextBundle`] from a file snapshot and a cursor offset.
///
/// Individual extraction steps degrade to empty sections instead of failing;
/// extraction as a whole always produces a bundle.
#[derive(Debug, Default)]
pub struct ContextExtractor;

impl ContextExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(
        &self,
        text: &str,
        offset: usize,
        file_name: &str,
        language_id: &str,
    ) -> ContextBundle {
        let index = TextIndex::new(text);
        let offset = offset.min(text.len());
        let language = LanguageSupport::from_file_name(file_name);

        let dependency_lines = dependency_lines(text);
        let structure_lines = structure_context(text, &index, offset, language);
        let code_window = match code_window(&index, offset) {
            Ok(window) => window,
            Err(err) => {
                tracing::warn!(error = %err, "code window extraction degraded");
                String::new()
            }
        };

        let mut assembled = format!("File: {file_name}\nLanguage: {language_id}\n\n");
        if !dependency_lines.is_empty() {
            assembled.push_str("Dependencies:\n");
            assembled.push_str(&dependency_lines.join("\n"));
            assembled.push_str("\n\n");
        }
        if !structure_lines.is_empty() {
            assembled.push_str("Structure Context:\n");
            assembled.push_str(&structure_lines.join("\n"));
            assembled.push_str("\n\n");
        }
        assembled.push_str("Code Context:\n");
        assembled.push_str(&code_window);

        ContextBundle {
            file_name: file_name.to_string(),
            language_id: language_id.to_string(),
            dependency_lines,
            structure_lines,
            code_window,
            text: cap_length(assembled),
        }
    }
}

/// Import/package/require-style lines from the top of the file, deduplicated,
/// in scan order. Scans at most the first 50 lines, stops early after 20 hits,
/// and returns at most 15 entries.
fn dependency_lines(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        if line_no >= DEPENDENCY_SCAN_LINES || found.len() >= DEPENDENCY_SCAN_HITS {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with("/*") {
            continue;
        }
        if is_dependency_line(trimmed) && !found.iter().any(|seen| seen == trimmed) {
            found.push(trimmed.to_string());
        }
    }
    found.truncate(MAX_DEPENDENCIES);
    found
}

fn is_dependency_line(trimmed: &str) -> bool {
    trimmed.starts_with("package ")
        || trimmed.starts_with("import ")
        || trimmed.starts_with("from ")
        || ((trimmed.starts_with("const ") || trimmed.starts_with("let "))
            && trimmed.contains("require"))
}

/// Renders a 15-before/5-after window of numbered lines around the cursor,
/// clipped to the file. The cursor's own line is always part of the window
/// and carries the marker at the exact column.
fn code_window(index: &TextIndex<'_>, offset: usize) -> Result<String, TextIndexError> {
    let pos = index.position_of(offset)?;
    let first = pos.line.saturating_sub(LINES_BEFORE_CURSOR);
    let last = (pos.line + LINES_AFTER_CURSOR).min(index.line_count() - 1);

    let mut window = String::new();
    for line_no in first..=last {
        let line = index.line_text(line_no)?;
        let _ = write!(window, "{:3}: ", line_no + 1);
        if line_no == pos.line {
            let split = floor_char_boundary(line, pos.column.min(line.len()));
            window.push_str(&line[..split]);
            window.push(CURSOR_MARKER);
            window.push_str(&line[split..]);
        } else {
            window.push_str(line);
        }
        window.push('\n');
    }
    Ok(window)
}

fn floor_char_boundary(text: &str, mut pos: usize) -> usize {
    while pos > 0 && !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Caps the bundle at [`MAX_CONTEXT_CHARS`] characters; oversized bundles are
/// cut on a char boundary and always end with the truncation marker.
fn cap_length(mut assembled: String) -> String {
    match assembled.char_indices().nth(MAX_CONTEXT_CHARS) {
        None => assembled,
        Some((cut, _)) => {
            assembled.truncate(cut);
            assembled.push_str(TRUNCATION_MARKER);
            assembled
        }
    }
}
