//! Layered configuration compilation
//!
//! The prototype-walking config inheritance of mixin libraries becomes an
//! explicit ordered merge: a consumer lists the configs of its composed
//! collaborators, most specific last, and compiles them once.

use std::sync::OnceLock;

use crate::StoreConfig;

/// Merge configuration layers in order; later layers win per key
pub fn compile<I>(layers: I) -> StoreConfig
where
    I: IntoIterator<Item = StoreConfig>,
{
    let mut compiled = StoreConfig::default();
    for layer in layers {
        compiled.merge(layer);
    }
    compiled
}

/// Compile at most once per consuming type
///
/// The consumer holds a `static OnceLock<StoreConfig>`; every instance gets
/// the same compiled config and the layer list is only built on first use.
pub fn compile_cached<F>(cell: &OnceLock<StoreConfig>, layers: F) -> &StoreConfig
where
    F: FnOnce() -> Vec<StoreConfig>,
{
    cell.get_or_init(|| compile(layers()))
}
