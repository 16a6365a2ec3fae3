//! Named element/collection lookup store

use std::fmt;

use arbor_dom::{NodeId, NodeRef};
use arbor_selector::{Resolver, SelectorEngine};

use crate::cache::{CacheStats, LookupCache};
use crate::config::StoreConfig;
use crate::{LookupKind, StoreError};

/// Result of an untyped [`ElementStore::get`] lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Element(NodeId),
    Collection(Vec<NodeId>),
}

/// Key-to-selector registry with lazy, memoizing resolution
///
/// A store is built empty, configured via [`set_config`], and becomes live
/// once [`init`] establishes a root node. Lookups resolve through the
/// [`Resolver`] on first access and serve from the cache afterwards; the
/// cache is invalidated whenever the root changes.
///
/// [`set_config`]: ElementStore::set_config
/// [`init`]: ElementStore::init
#[derive(Debug)]
pub struct ElementStore<R: Resolver = SelectorEngine> {
    resolver: R,
    config: Option<StoreConfig>,
    cache: Option<LookupCache>,
    root: Option<NodeRef>,
    document: Option<NodeRef>,
}

impl ElementStore<SelectorEngine> {
    /// Store resolving through the stock [`SelectorEngine`]
    pub fn new() -> Self {
        Self::with_resolver(SelectorEngine::default())
    }
}

impl Default for ElementStore<SelectorEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resolver> ElementStore<R> {
    /// Store resolving through a custom resolver
    pub fn with_resolver(resolver: R) -> Self {
        Self {
            resolver,
            config: None,
            cache: None,
            root: None,
            document: None,
        }
    }

    /// Bring the store up under `root`
    ///
    /// Keeps any config set before init, resets the cache, repoints the
    /// root and runs the eager load. Also revives a torn-down store.
    pub fn init(&mut self, root: NodeRef) -> Result<(), StoreError> {
        if self.config.is_none() {
            self.config = Some(StoreConfig::default());
        }
        self.cache = Some(LookupCache::new());
        self.set_root(root);
        self.eager_load()
    }

    /// Repoint the root node, invalidating every memoized lookup
    ///
    /// Cached nodes were scoped to the old root and must not survive.
    pub fn set_root(&mut self, root: NodeRef) {
        self.clear_cache();
        self.document = Some(if root.is_document() {
            root.clone()
        } else {
            root.owner_document()
        });
        tracing::debug!(root = ?root, "element store root set");
        self.root = Some(root);
    }

    /// Merge `overrides` into the store config, per-key shallow replace
    ///
    /// Does not clear the cache: changing the selector of an already-cached
    /// key leaves the stale entry in place until the caller invalidates.
    pub fn set_config(&mut self, overrides: StoreConfig) {
        self.config
            .get_or_insert_with(StoreConfig::default)
            .merge(overrides);
    }

    /// Look up a configured element by key
    ///
    /// `Ok(None)` is a valid miss: the key is not configured, or its
    /// selector matched nothing (which is then memoized too).
    pub fn element(&mut self, key: &str) -> Result<Option<NodeId>, StoreError> {
        let Some(root) = self.root.clone() else {
            return Err(StoreError::MissingRoot);
        };
        if self.cache.is_none() {
            return Err(StoreError::MissingRoot);
        }

        let Some(entry) = self
            .config
            .as_ref()
            .and_then(|c| c.elements.get(key))
            .cloned()
        else {
            return Ok(None);
        };

        if let Some(cached) = self.cache.as_ref().and_then(|c| c.element(key)) {
            tracing::trace!(key, "element cache hit");
            return Ok(cached);
        }

        let Some(selector) = entry.selector.as_deref() else {
            return Err(StoreError::MissingSelector {
                kind: LookupKind::Element,
                key: key.to_string(),
            });
        };

        let found = self
            .resolver
            .find_one(root.document(), root.id(), selector)?;
        tracing::trace!(key, selector, found = found.is_some(), "element resolved");

        if !entry.nocache {
            if let Some(cache) = self.cache.as_mut() {
                cache.store_element(key, found);
            }
        }
        Ok(found)
    }

    /// Look up a configured collection by key
    ///
    /// `Ok(None)` means the key is not configured; a configured key always
    /// yields a sequence, possibly empty, in document order.
    pub fn collection(&mut self, key: &str) -> Result<Option<Vec<NodeId>>, StoreError> {
        let Some(root) = self.root.clone() else {
            return Err(StoreError::MissingRoot);
        };
        if self.cache.is_none() {
            return Err(StoreError::MissingRoot);
        }

        let Some(entry) = self
            .config
            .as_ref()
            .and_then(|c| c.collections.get(key))
            .cloned()
        else {
            return Ok(None);
        };

        if let Some(cached) = self.cache.as_ref().and_then(|c| c.collection(key)) {
            tracing::trace!(key, "collection cache hit");
            return Ok(Some(cached.to_vec()));
        }

        let Some(selector) = entry.selector.as_deref() else {
            return Err(StoreError::MissingSelector {
                kind: LookupKind::Collection,
                key: key.to_string(),
            });
        };

        let found = self
            .resolver
            .find_all(root.document(), root.id(), selector)?;
        tracing::trace!(key, selector, count = found.len(), "collection resolved");

        if !entry.nocache {
            if let Some(cache) = self.cache.as_mut() {
                cache.store_collection(key, found.clone());
            }
        }
        Ok(Some(found))
    }

    /// Untyped lookup: the element half first, then the collection half
    ///
    /// A configured element that resolved to nothing falls through to a
    /// same-named collection entry, if one exists.
    pub fn get(&mut self, key: &str) -> Result<Option<Lookup>, StoreError> {
        if let Some(node) = self.element(key)? {
            return Ok(Some(Lookup::Element(node)));
        }
        Ok(self.collection(key)?.map(Lookup::Collection))
    }

    /// Every configured key, both halves, unordered; duplicates permitted
    /// when a key exists in both halves
    pub fn keys(&self) -> Vec<&str> {
        match &self.config {
            Some(config) => config
                .elements
                .keys()
                .chain(config.collections.keys())
                .map(String::as_str)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Resolve and cache every entry marked eager
    ///
    /// Entries marked both eager and nocache are skipped: resolving them
    /// would store nothing, so the combination is a deliberate no-op.
    pub fn eager_load(&mut self) -> Result<(), StoreError> {
        let Some(config) = self.config.clone() else {
            return Ok(());
        };

        for (key, entry) in &config.elements {
            if entry.eager && !entry.nocache {
                self.element(key)?;
            }
        }
        for (key, entry) in &config.collections {
            if entry.eager && !entry.nocache {
                self.collection(key)?;
            }
        }

        if let Some(stats) = self.stats() {
            tracing::debug!(cached = stats.total(), "eager load complete");
        }
        Ok(())
    }

    /// Drop every memoized lookup; next access re-resolves lazily
    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }

    /// Tear the store down: cache, config, root and document are released
    ///
    /// Idempotent. The store is unusable until [`init`] runs again.
    ///
    /// [`init`]: ElementStore::init
    pub fn teardown(&mut self) {
        if self.cache.is_some() {
            self.clear_cache();
            self.cache = None;
        }
        self.config = None;
        self.root = None;
        self.document = None;
        tracing::debug!("element store torn down");
    }

    /// Current root node, if the store is live
    pub fn root(&self) -> Option<&NodeRef> {
        self.root.as_ref()
    }

    /// Document owning the root, if the store is live
    pub fn document(&self) -> Option<&NodeRef> {
        self.document.as_ref()
    }

    /// Current configuration, if any has been set
    pub fn config(&self) -> Option<&StoreConfig> {
        self.config.as_ref()
    }

    /// Cache statistics, `None` once torn down
    pub fn stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(LookupCache::stats)
    }
}

impl<R: Resolver> fmt::Display for ElementStore<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ElementStore")
    }
}
