//! Arbor store - named element/collection lookups with memoization
//!
//! Consumers declare lookups by key and selector once, then address nodes
//! by key. The store resolves a key through a [`Resolver`] on first access,
//! memoizes the result, and invalidates the cache whenever the root node
//! changes.
//!
//! ```
//! use std::rc::Rc;
//! use arbor_dom::{Document, NodeRef};
//! use arbor_store::{ConfigEntry, ElementStore, StoreConfig};
//!
//! let mut doc = Document::new("about:blank");
//! let body = doc.body().unwrap();
//! let h2 = doc.tree_mut().create_element("h2");
//! doc.tree_mut().append_child(body, h2);
//! let doc = Rc::new(doc);
//!
//! let mut config = StoreConfig::default();
//! config.elements.insert("title".to_string(), ConfigEntry::with_selector("h2"));
//!
//! let mut store = ElementStore::new();
//! store.set_config(config);
//! store.init(NodeRef::new(Rc::clone(&doc), body)).unwrap();
//!
//! assert_eq!(store.element("title").unwrap(), Some(h2));
//! ```

mod accessors;
mod cache;
mod compile;
mod config;
mod store;

pub use accessors::{Accessor, AccessorTable};
pub use cache::{CacheStats, LookupCache};
pub use compile::{compile, compile_cached};
pub use config::{ConfigEntry, StoreConfig};
pub use store::{ElementStore, Lookup};

use std::fmt;

use arbor_selector::SelectorError;

/// Which half of the configuration a lookup goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Element,
    Collection,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKind::Element => f.write_str("element"),
            LookupKind::Collection => f.write_str("collection"),
        }
    }
}

/// Store error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Lookup on a store with no root: `init` has not run, or `teardown` has
    #[error("missing required root: store is not initialized")]
    MissingRoot,

    /// A configured entry was resolved but declares no selector
    #[error("missing required config \"selector\" for {kind} {key}")]
    MissingSelector { kind: LookupKind, key: String },

    /// An accessor name and its fallback are both already taken
    #[error("cannot register accessor for {kind} {key}: name and fallback are both taken")]
    AccessorNameTaken { kind: LookupKind, key: String },

    /// The selector failed to parse
    #[error(transparent)]
    Selector(#[from] SelectorError),
}
