//! Structure context: the enclosing declarations around the cursor.
//!
//! The primary path walks the tree-sitter parse tree outward from the node at
//! the cursor. Languages without a grammar, and any source the parser
//! rejects, degrade to a backward text scan over a handful of lines.

use tree_sitter::Node;

use crate::syntax::{self, LanguageSupport, SyntaxError};
use crate::text::TextIndex;

const MAX_STRUCTURE_ENTRIES: usize = 5;
const TEXT_SCAN_LINES: usize = 20;
const MAX_ENTRY_CHARS: usize = 100;

/// Enclosing declarations as labeled one-liners, nearest scope first,
/// deduplicated, at most five entries. Never fails; the worst case is an
/// empty list.
pub fn structure_context(
    text: &str,
    index: &TextIndex<'_>,
    offset: usize,
    language: Option<LanguageSupport>,
) -> Vec<String> {
    if let Some(lang) = language.filter(|lang| lang.has_grammar()) {
        match tree_walk(text, offset, lang) {
            Ok(entries) if !entries.is_empty() => return entries,
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(language = ?lang, error = %err, "structure walk failed, using text scan");
            }
        }
    }
    text_scan(text, index, offset)
}

fn tree_walk(
    text: &str,
    offset: usize,
    language: LanguageSupport,
) -> Result<Vec<String>, SyntaxError> {
    let tree = syntax::parse(text, language)?;
    let target = offset.min(text.len());
    let mut entries = Vec::new();
    let mut node = tree.root_node().descendant_for_byte_range(target, target);

    while let Some(current) = node {
        if entries.len() >= MAX_STRUCTURE_ENTRIES {
            break;
        }
        if let Some(entry) = describe_node(&current, text) {
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }
        node = current.parent();
    }

    Ok(entries)
}

/// Render a declaration-shaped node as a labeled one-liner, or `None` for
/// nodes that are not declarations.
fn describe_node(node: &Node<'_>, source: &str) -> Option<String> {
    let kind = node.kind();
    if !kind.contains("declaration") && !kind.contains("definition") {
        return None;
    }

    let label = if kind.contains("class") || kind.contains("interface") || kind.contains("enum") {
        "Class"
    } else if kind.contains("method") || kind.contains("constructor") {
        "Method"
    } else if kind.contains("function") {
        "Function"
    } else if kind.contains("field")
        || kind.contains("variable")
        || kind.contains("property")
        || kind.contains("lexical")
    {
        "Field"
    } else {
        return None;
    };

    let snippet = node.utf8_text(source.as_bytes()).ok()?;
    let first_line = snippet.lines().next()?.trim();
    let cleaned = clean_declaration(first_line);
    if cleaned.is_empty() {
        return None;
    }
    Some(format!("{label}: {cleaned}"))
}

fn text_scan(text: &str, index: &TextIndex<'_>, offset: usize) -> Vec<String> {
    let Ok(current_line) = index.line_for_offset(offset.min(text.len())) else {
        return Vec::new();
    };

    let mut entries: Vec<String> = Vec::new();
    let first_line = current_line.saturating_sub(TEXT_SCAN_LINES);
    for line_no in (first_line..=current_line).rev() {
        if entries.len() >= MAX_STRUCTURE_ENTRIES {
            break;
        }
        let Ok(line) = index.line_text(line_no) else {
            continue;
        };
        let trimmed = line.trim();

        let entry = if is_class_declaration(trimmed) {
            Some(format!("Class: {}", clean_declaration(trimmed)))
        } else if is_method_declaration(trimmed) {
            Some(format!("Method: {}", clean_declaration(trimmed)))
        } else if is_function_declaration(trimmed) {
            Some(format!("Function: {}", clean_declaration(trimmed)))
        } else {
            None
        };

        if let Some(entry) = entry {
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }
    }
    entries
}

fn is_class_declaration(line: &str) -> bool {
    line.contains("class ") && !line.starts_with("//") && !line.starts_with('*')
}

fn is_method_declaration(line: &str) -> bool {
    (line.contains("public ") || line.contains("private ") || line.contains("protected "))
        && line.contains('(')
        && !line.starts_with("//")
}

fn is_function_declaration(line: &str) -> bool {
    (line.starts_with("def ") || line.contains("function "))
        && line.contains('(')
        && !line.starts_with("//")
}

/// Strip a trailing brace or (outside `def` signatures) a trailing colon, and
/// cap the entry length.
fn clean_declaration(line: &str) -> String {
    let mut cleaned = line.trim();
    if let Some(brace) = cleaned.find('{') {
        cleaned = cleaned[..brace].trim_end();
    }
    let mut cleaned = cleaned.to_string();
    if cleaned.ends_with(':') && !cleaned.starts_with("def ") {
        cleaned.pop();
        cleaned.truncate(cleaned.trim_end().len());
    }
    if cleaned.chars().count() > MAX_ENTRY_CHARS {
        let cut = cleaned
            .char_indices()
            .nth(MAX_ENTRY_CHARS)
            .map(|(pos, _)| pos)
            .unwrap_or(cleaned.len());
        cleaned.truncate(cut);
        cleaned.push_str("...");
    }
    cleaned
}
