//! Example: declarative element lookups for a small form view
//!
//! Run with logging to watch the store resolve and memoize:
//! `RUST_LOG=trace cargo run -p arbor-store --example form_view`

use std::collections::HashSet;
use std::rc::Rc;
use std::sync::OnceLock;

use anyhow::Result;
use arbor_dom::{Document, NodeRef};
use arbor_store::{compile_cached, AccessorTable, ConfigEntry, ElementStore, StoreConfig};

static VIEW_CONFIG: OnceLock<StoreConfig> = OnceLock::new();

/// Base lookups every form view shares
fn form_layer() -> StoreConfig {
    let mut config = StoreConfig::default();
    config.elements.insert(
        "submit".to_string(),
        ConfigEntry::with_selector("button[type=submit]"),
    );
    config
        .elements
        .insert("title".to_string(), ConfigEntry::with_selector("h1"));
    config
}

/// Lookups specific to the signup view; overrides the shared title
fn signup_layer() -> StoreConfig {
    let mut config = StoreConfig::default();
    config.elements.insert(
        "title".to_string(),
        ConfigEntry {
            selector: Some("h2".to_string()),
            eager: true,
            nocache: false,
        },
    );
    config
        .collections
        .insert("fields".to_string(), ConfigEntry::with_selector("input"));
    config
}

fn build_document() -> Document {
    let mut doc = Document::new("https://example.com/signup");
    let body = doc.body().expect("scaffolded document has a body");
    let tree = doc.tree_mut();

    let h2 = tree.create_element("h2");
    let heading = tree.create_text("Sign up");
    let form = tree.create_element("form");
    let email = tree.create_element("input");
    tree.set_attr(email, "type", "email");
    let password = tree.create_element("input");
    tree.set_attr(password, "type", "password");
    let button = tree.create_element("button");
    tree.set_attr(button, "type", "submit");

    tree.append_child(body, h2);
    tree.append_child(h2, heading);
    tree.append_child(body, form);
    tree.append_child(form, email);
    tree.append_child(form, password);
    tree.append_child(form, button);

    doc
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let doc = Rc::new(build_document());
    let body = doc.body().expect("scaffolded document has a body");

    let config = compile_cached(&VIEW_CONFIG, || vec![form_layer(), signup_layer()]).clone();

    // The view already has a `submit` method, so that accessor lands on the
    // submit_element fallback name.
    let reserved = HashSet::from(["submit".to_string()]);
    let accessors = AccessorTable::build(&config, &reserved)?;

    let mut store = ElementStore::new();
    store.set_config(config);
    store.init(NodeRef::new(Rc::clone(&doc), body))?;

    for name in ["title", "submit_element", "fields"] {
        match accessors.invoke(name, &mut store)? {
            Some(lookup) => println!("{name}: {lookup:?}"),
            None => println!("{name}: no match"),
        }
    }

    if let Some(stats) = store.stats() {
        println!(
            "cached {} elements, {} collections",
            stats.elements, stats.collections
        );
    }

    Ok(())
}
