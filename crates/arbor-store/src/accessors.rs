//! Accessor registration
//!
//! The Rust rendition of runtime getter synthesis: a construction-time
//! registration step that returns a name-to-accessor table. The plain key
//! name is used when free; otherwise the `<key>_element` /
//! `<key>_collection` fallback; if both are taken registration fails.

use std::collections::{HashMap, HashSet};

use arbor_selector::Resolver;

use crate::store::{ElementStore, Lookup};
use crate::{LookupKind, StoreConfig, StoreError};

/// A registered accessor delegating to the store by key and kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    key: String,
    kind: LookupKind,
}

impl Accessor {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> LookupKind {
        self.kind
    }

    /// Run the lookup this accessor was registered for
    pub fn invoke<R: Resolver>(
        &self,
        store: &mut ElementStore<R>,
    ) -> Result<Option<Lookup>, StoreError> {
        match self.kind {
            LookupKind::Element => Ok(store.element(&self.key)?.map(Lookup::Element)),
            LookupKind::Collection => Ok(store.collection(&self.key)?.map(Lookup::Collection)),
        }
    }
}

/// Name-to-accessor table built from a compiled config
///
/// `reserved` carries the names the consuming type already uses; those are
/// never overwritten, the fallback name is tried instead.
#[derive(Debug, Default)]
pub struct AccessorTable {
    entries: HashMap<String, Accessor>,
}

impl AccessorTable {
    /// Register an accessor for every configured key, elements first
    pub fn build(config: &StoreConfig, reserved: &HashSet<String>) -> Result<Self, StoreError> {
        let mut table = Self::default();
        for key in config.elements.keys() {
            table.register(key, LookupKind::Element, reserved)?;
        }
        for key in config.collections.keys() {
            table.register(key, LookupKind::Collection, reserved)?;
        }
        tracing::debug!(accessors = table.entries.len(), "accessor table built");
        Ok(table)
    }

    fn register(
        &mut self,
        key: &str,
        kind: LookupKind,
        reserved: &HashSet<String>,
    ) -> Result<(), StoreError> {
        let fallback = match kind {
            LookupKind::Element => format!("{key}_element"),
            LookupKind::Collection => format!("{key}_collection"),
        };

        let name = if self.is_free(key, reserved) {
            key.to_string()
        } else if self.is_free(&fallback, reserved) {
            fallback
        } else {
            return Err(StoreError::AccessorNameTaken {
                kind,
                key: key.to_string(),
            });
        };

        self.entries.insert(
            name,
            Accessor {
                key: key.to_string(),
                kind,
            },
        );
        Ok(())
    }

    fn is_free(&self, name: &str, reserved: &HashSet<String>) -> bool {
        !reserved.contains(name) && !self.entries.contains_key(name)
    }

    /// Accessor registered under `name`, if any
    pub fn get(&self, name: &str) -> Option<&Accessor> {
        self.entries.get(name)
    }

    /// Invoke by registered name; an unknown name is a valid miss
    pub fn invoke<R: Resolver>(
        &self,
        name: &str,
        store: &mut ElementStore<R>,
    ) -> Result<Option<Lookup>, StoreError> {
        match self.entries.get(name) {
            Some(accessor) => accessor.invoke(store),
            None => Ok(None),
        }
    }

    /// Registered accessor names, unordered
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigEntry;

    fn config_with(elements: &[&str], collections: &[&str]) -> StoreConfig {
        let mut config = StoreConfig::default();
        for key in elements {
            config
                .elements
                .insert(key.to_string(), ConfigEntry::with_selector("div"));
        }
        for key in collections {
            config
                .collections
                .insert(key.to_string(), ConfigEntry::with_selector("li"));
        }
        config
    }

    #[test]
    fn test_plain_name_when_free() {
        let table = AccessorTable::build(&config_with(&["title"], &["items"]), &HashSet::new())
            .unwrap();

        assert_eq!(table.get("title").unwrap().kind(), LookupKind::Element);
        assert_eq!(table.get("items").unwrap().kind(), LookupKind::Collection);
    }

    #[test]
    fn test_fallback_when_reserved() {
        let reserved = HashSet::from(["title".to_string()]);
        let table = AccessorTable::build(&config_with(&["title"], &[]), &reserved).unwrap();

        assert!(table.get("title").is_none());
        let accessor = table.get("title_element").unwrap();
        assert_eq!(accessor.key(), "title");
    }

    #[test]
    fn test_same_key_in_both_halves() {
        let table =
            AccessorTable::build(&config_with(&["title"], &["title"]), &HashSet::new()).unwrap();

        // Elements register first and take the plain name.
        assert_eq!(table.get("title").unwrap().kind(), LookupKind::Element);
        assert_eq!(
            table.get("title_collection").unwrap().kind(),
            LookupKind::Collection
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_error_when_name_and_fallback_taken() {
        let reserved = HashSet::from(["title".to_string(), "title_element".to_string()]);
        let err = AccessorTable::build(&config_with(&["title"], &[]), &reserved).unwrap_err();

        match err {
            StoreError::AccessorNameTaken { kind, key } => {
                assert_eq!(kind, LookupKind::Element);
                assert_eq!(key, "title");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
