//! Plain-text indexing over an immutable buffer snapshot.

mod index;

pub use index::{CursorPosition, TextIndex, TextIndexError};
