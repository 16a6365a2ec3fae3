//! Arbor selector engine
//!
//! Parses a small CSS-flavored selector language and resolves it against an
//! [`arbor_dom`] tree, scoped to a root node. The [`Resolver`] trait is the
//! seam consumers program against; [`SelectorEngine`] is the stock
//! implementation with two find-one strategies.

mod engine;
mod parser;
mod selector;

pub use engine::{FindOne, Resolver, SelectorEngine};
pub use selector::{
    AttributeMatcher, AttributeSelector, Component, Compound, Selector, SelectorList,
};

/// Selector parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unclosed attribute selector in \"{selector}\"")]
    UnclosedAttribute { selector: String },
}
