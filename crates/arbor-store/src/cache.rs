//! Memoized lookup results
//!
//! Element and collection results cache in separate maps so a key shared by
//! both config halves never fights over one slot. A present entry with an
//! empty value is a memoized "resolved to absent" and is served without
//! re-resolution; clearing removes entries outright so the next access
//! resolves lazily again.

use std::collections::HashMap;

use arbor_dom::NodeId;

/// Per-kind memoization of resolved lookups
#[derive(Debug, Default)]
pub struct LookupCache {
    elements: HashMap<String, Option<NodeId>>,
    collections: HashMap<String, Vec<NodeId>>,
}

impl LookupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached element result; outer `None` means "not resolved yet"
    pub fn element(&self, key: &str) -> Option<Option<NodeId>> {
        self.elements.get(key).copied()
    }

    /// Cached collection result, `None` if not resolved yet
    pub fn collection(&self, key: &str) -> Option<&[NodeId]> {
        self.collections.get(key).map(Vec::as_slice)
    }

    pub fn store_element(&mut self, key: &str, value: Option<NodeId>) {
        self.elements.insert(key.to_string(), value);
    }

    pub fn store_collection(&mut self, key: &str, value: Vec<NodeId>) {
        self.collections.insert(key.to_string(), value);
    }

    /// Drop every entry so future lookups re-resolve
    pub fn clear(&mut self) {
        self.elements.clear();
        self.collections.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            elements: self.elements.len(),
            collections: self.collections.len(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub elements: usize,
    pub collections: usize,
}

impl CacheStats {
    pub fn total(&self) -> usize {
        self.elements + self.collections
    }
}
