//! Document - high-level document API

use std::fmt;
use std::rc::Rc;

use crate::{DomTree, Node, NodeId};

/// A document: a DOM tree plus its URL
#[derive(Debug)]
pub struct Document {
    tree: DomTree,
    url: String,
    html_element: Option<NodeId>,
    body_element: Option<NodeId>,
}

impl Document {
    /// Create a document with the usual html/head/body scaffold
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        let root = tree.root();
        tree.append_child(root, html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: Some(html),
            body_element: Some(body),
        }
    }

    /// Create an empty document (document node only)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: None,
            body_element: None,
        }
    }

    /// Document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the `<html>` element, if the scaffold exists
    pub fn document_element(&self) -> Option<NodeId> {
        self.html_element
    }

    /// Get the `<body>` element, if the scaffold exists
    pub fn body(&self) -> Option<NodeId> {
        self.body_element
    }

    /// Find an element by its id attribute, depth first
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .find(|(_, node)| {
                node.as_element()
                    .is_some_and(|e| e.id.as_deref() == Some(id))
            })
            .map(|(node_id, _)| node_id)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

/// Cheap, non-owning handle to one node of a shared document
///
/// Clones share the underlying document. The handle can tell whether it
/// points at the document node itself and which document owns it, which is
/// all a lookup root needs to expose.
#[derive(Clone)]
pub struct NodeRef {
    document: Rc<Document>,
    id: NodeId,
}

impl NodeRef {
    /// Handle to an arbitrary node of `document`
    pub fn new(document: Rc<Document>, id: NodeId) -> Self {
        Self { document, id }
    }

    /// Handle to the document node itself
    pub fn document_node(document: Rc<Document>) -> Self {
        let id = document.tree().root();
        Self { document, id }
    }

    /// The node this handle points at
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The document hosting this node
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Shared handle to the hosting document
    pub fn document_rc(&self) -> &Rc<Document> {
        &self.document
    }

    /// Check if this handle points at the document node
    pub fn is_document(&self) -> bool {
        self.document
            .tree()
            .get(self.id)
            .is_some_and(Node::is_document)
    }

    /// Handle to the document node owning this node
    pub fn owner_document(&self) -> NodeRef {
        NodeRef::document_node(Rc::clone(&self.document))
    }

    /// Check if two handles point at the same node of the same document
    pub fn same_node(&self, other: &NodeRef) -> bool {
        Rc::ptr_eq(&self.document, &other.document) && self.id == other.id
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("url", &self.document.url())
            .field("id", &self.id)
            .finish()
    }
}
