//! Lookup configuration
//!
//! Two mappings of key to entry, one per lookup kind. The shape is plain
//! data and deserializes from the obvious JSON:
//!
//! ```json
//! { "elements": { "title": { "selector": "h2", "eager": true } },
//!   "collections": { "items": { "selector": "li" } } }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One configured lookup
///
/// A missing selector is representable on purpose: it only becomes an error
/// when the entry is first resolved, never at merge time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Selector resolved under the store root
    #[serde(default)]
    pub selector: Option<String>,
    /// Resolve and cache at init time
    #[serde(default)]
    pub eager: bool,
    /// Never memoize this key
    #[serde(default)]
    pub nocache: bool,
}

impl ConfigEntry {
    /// Entry with a selector and default flags
    pub fn with_selector(selector: &str) -> Self {
        Self {
            selector: Some(selector.to_string()),
            ..Self::default()
        }
    }
}

/// Named element and collection lookups
///
/// The same key may exist in both halves; the store keeps the two cached
/// independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub elements: HashMap<String, ConfigEntry>,
    #[serde(default)]
    pub collections: HashMap<String, ConfigEntry>,
}

impl StoreConfig {
    /// Merge `overrides` into this config, per-key shallow replace
    pub fn merge(&mut self, overrides: StoreConfig) {
        self.elements.extend(overrides.elements);
        self.collections.extend(overrides.collections);
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty() && self.collections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_replaces_per_key() {
        let mut config = StoreConfig::default();
        config
            .elements
            .insert("foo".to_string(), ConfigEntry::with_selector(".baz"));
        config
            .collections
            .insert("test".to_string(), ConfigEntry::with_selector(".test"));

        let mut overrides = StoreConfig::default();
        overrides
            .elements
            .insert("foo".to_string(), ConfigEntry::with_selector(".foo"));
        overrides
            .elements
            .insert("bar".to_string(), ConfigEntry::with_selector(".bar"));

        config.merge(overrides);

        assert_eq!(
            config.elements["foo"].selector.as_deref(),
            Some(".foo"),
            "override wins"
        );
        assert_eq!(config.elements["bar"].selector.as_deref(), Some(".bar"));
        assert_eq!(config.collections["test"].selector.as_deref(), Some(".test"));
    }

    #[test]
    fn test_merge_replaces_whole_entry() {
        let mut config = StoreConfig::default();
        config.elements.insert(
            "title".to_string(),
            ConfigEntry {
                selector: Some("h2".to_string()),
                eager: true,
                nocache: false,
            },
        );

        let mut overrides = StoreConfig::default();
        overrides
            .elements
            .insert("title".to_string(), ConfigEntry::with_selector("h1"));
        config.merge(overrides);

        // Shallow replace: the eager flag from the old entry is gone.
        assert!(!config.elements["title"].eager);
    }

    #[test]
    fn test_deserialize_from_json() {
        let config: StoreConfig = serde_json::from_str(
            r#"{
                "elements": {
                    "title": { "selector": "h2", "eager": true },
                    "badItem": {}
                },
                "collections": {
                    "items": { "selector": "li", "nocache": true }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.elements["title"].selector.as_deref(), Some("h2"));
        assert!(config.elements["title"].eager);
        assert_eq!(config.elements["badItem"].selector, None);
        assert!(config.collections["items"].nocache);
    }
}
