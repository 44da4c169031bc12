//! Context extraction: the bounded textual summary sent with a completion
//! request.

mod extractor;
mod structure;

pub use extractor::{
    ContextBundle, ContextExtractor, CURSOR_MARKER, MAX_CONTEXT_CHARS, TRUNCATION_MARKER,
};
pub use structure::structure_context;
