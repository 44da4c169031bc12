//! Bounded response cache shared by concurrent completion requests.
//!
//! Eviction is clear-all on overflow rather than LRU; the size check and the
//! clear happen under the same lock, so a burst of concurrent inserts cannot
//! lose the overflow handling.

use std::collections::HashMap;

use parking_lot::Mutex;
use sha2::{Digest, Sha256};

/// Deterministic fingerprint of a (context, current line) pair. Used only as
/// a memoization key, not as a security boundary.
pub fn cache_key(context: &str, current_line: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(context.as_bytes());
    hasher.update(b"\n");
    hasher.update(current_line.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub struct CompletionCache {
    entries: Mutex<HashMap<String, String>>,
    limit: usize,
}

impl CompletionCache {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            limit,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    /// Insert a suggestion. When the cache is full and the key is new, the
    /// whole cache is cleared first.
    pub fn insert(&self, key: String, suggestion: String) {
        let mut entries = self.entries.lock();
        if entries.len() >= self.limit && !entries.contains_key(&key) {
            tracing::debug!(limit = self.limit, "completion cache full, clearing");
            entries.clear();
        }
        entries.insert(key, suggestion);
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
