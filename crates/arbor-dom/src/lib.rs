//! Arbor DOM - arena-backed document tree
//!
//! Minimal node model for selector-driven lookups. Nodes live in a flat
//! arena and reference each other by `NodeId` instead of pointers.

mod document;
mod node;
mod tree;

pub use document::{Document, NodeRef};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use tree::{Children, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The document node at the base of every tree
    pub const DOCUMENT: NodeId = NodeId(0);

    /// Arena index of this node
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
