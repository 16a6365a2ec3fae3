//! DOM Tree (arena-based allocation)

use crate::{ElementData, Node, NodeData, NodeId};

/// Arena-based DOM tree
///
/// The document node always occupies slot 0. All other nodes are created
/// detached and wired in with [`DomTree::append_child`].
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree containing only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
        }
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        NodeId::DOCUMENT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds only the document node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::new(NodeData::Element(ElementData::new(tag))))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::new(NodeData::Text(content.to_string())))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::new(NodeData::Comment(content.to_string())))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append a detached node as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev = self.get(parent).and_then(|n| n.last_child);

        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
            node.prev_sibling = prev;
            node.next_sibling = None;
        }

        if let Some(prev_id) = prev {
            if let Some(node) = self.get_mut(prev_id) {
                node.next_sibling = Some(child);
            }
        }

        if let Some(node) = self.get_mut(parent) {
            if node.first_child.is_none() {
                node.first_child = Some(child);
            }
            node.last_child = Some(child);
        }
    }

    /// Set an attribute on an element node
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(elem) = self.get_mut(id).and_then(Node::as_element_mut) {
            elem.set_attr(name, value);
        }
    }

    /// Iterate the direct children of a node, in order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).and_then(|n| n.first_child),
        }
    }

    /// Iterate every node below `start` in document order, `start` excluded
    pub fn descendants(&self, start: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            start,
            next: self.get(start).and_then(|n| n.first_child),
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order document-order traversal below a start node
pub struct Descendants<'a> {
    tree: &'a DomTree,
    start: NodeId,
    next: Option<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.tree.get(id)?;

        // Depth first: descend, else advance, else climb until a sibling
        // exists or the start node is reached.
        self.next = if node.first_child.is_some() {
            node.first_child
        } else {
            let mut cur = id;
            loop {
                let Some(n) = self.tree.get(cur) else {
                    break None;
                };
                if let Some(sibling) = n.next_sibling {
                    break Some(sibling);
                }
                match n.parent {
                    Some(parent) if parent != self.start => cur = parent,
                    _ => break None,
                }
            }
        };

        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_tree() -> (DomTree, NodeId) {
        let mut tree = DomTree::new();
        let ul = tree.create_element("ul");
        let li1 = tree.create_element("li");
        let li2 = tree.create_element("li");
        let text = tree.create_text("item one");
        tree.append_child(tree.root(), ul);
        tree.append_child(ul, li1);
        tree.append_child(ul, li2);
        tree.append_child(li1, text);
        (tree, ul)
    }

    #[test]
    fn test_new_tree_has_document_node() {
        let tree = DomTree::new();
        assert_eq!(tree.len(), 1);
        assert!(tree.get(tree.root()).is_some_and(Node::is_document));
    }

    #[test]
    fn test_append_child_links_siblings() {
        let (tree, ul) = list_tree();
        let tags: Vec<&str> = tree
            .children(ul)
            .filter_map(|(_, n)| n.as_element())
            .map(|e| e.tag.as_str())
            .collect();
        assert_eq!(tags, ["li", "li"]);
    }

    #[test]
    fn test_descendants_document_order() {
        let (tree, _) = list_tree();
        let kinds: Vec<String> = tree
            .descendants(tree.root())
            .map(|(_, n)| match &n.data {
                NodeData::Element(e) => e.tag.clone(),
                NodeData::Text(_) => "#text".to_string(),
                NodeData::Comment(_) => "#comment".to_string(),
                NodeData::Document => "#document".to_string(),
            })
            .collect();
        assert_eq!(kinds, ["ul", "li", "#text", "li"]);
    }

    #[test]
    fn test_descendants_excludes_start() {
        let (tree, ul) = list_tree();
        let ids: Vec<NodeId> = tree.descendants(ul).map(|(id, _)| id).collect();
        assert!(!ids.contains(&ul));
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_descendants_scoped_to_subtree() {
        let mut tree = DomTree::new();
        let a = tree.create_element("section");
        let b = tree.create_element("section");
        let inner = tree.create_element("p");
        tree.append_child(tree.root(), a);
        tree.append_child(tree.root(), b);
        tree.append_child(a, inner);

        // Traversal under `a` must not leak into its sibling `b`.
        let ids: Vec<NodeId> = tree.descendants(a).map(|(id, _)| id).collect();
        assert_eq!(ids, [inner]);
    }
}
