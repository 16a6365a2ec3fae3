//! DOM Node - compact representation
//!
//! Sibling and child links are `Option<NodeId>` so a missing link is
//! unrepresentable as a dangling index.

use crate::NodeId;

/// DOM node: tree links plus node-specific data
#[derive(Debug)]
pub struct Node {
    /// Parent node (None for the document node)
    pub parent: Option<NodeId>,
    /// First child
    pub first_child: Option<NodeId>,
    /// Last child (for O(1) append)
    pub last_child: Option<NodeId>,
    /// Previous sibling
    pub prev_sibling: Option<NodeId>,
    /// Next sibling
    pub next_sibling: Option<NodeId>,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            data,
        }
    }

    /// Check if this is the document node
    #[inline]
    pub fn is_document(&self) -> bool {
        matches!(self.data, NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Tag name, stored lowercase
    pub tag: String,
    /// Attributes in insertion order
    pub attrs: Vec<Attribute>,
    /// Cached id attribute (very common lookup)
    pub id: Option<String>,
    /// Cached class list
    pub classes: Vec<String>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            id: None,
            classes: Vec::new(),
        }
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, keeping the id and class caches in sync
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match name {
            "id" => self.id = Some(value.to_string()),
            "class" => {
                self.classes = value.split_whitespace().map(str::to_string).collect();
            }
            _ => {}
        }

        for attr in self.attrs.iter_mut() {
            if attr.name == name {
                attr.value = value.to_string();
                return;
            }
        }

        self.attrs.push(Attribute {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    /// Check class list membership
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Attribute
#[derive(Debug)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_caches_id() {
        let mut elem = ElementData::new("div");
        elem.set_attr("id", "main");

        assert_eq!(elem.id.as_deref(), Some("main"));
        assert_eq!(elem.attr("id"), Some("main"));
    }

    #[test]
    fn test_set_attr_caches_classes() {
        let mut elem = ElementData::new("div");
        elem.set_attr("class", "btn btn-primary");

        assert!(elem.has_class("btn"));
        assert!(elem.has_class("btn-primary"));
        assert!(!elem.has_class("btn-secondary"));
    }

    #[test]
    fn test_set_attr_overwrites() {
        let mut elem = ElementData::new("input");
        elem.set_attr("type", "text");
        elem.set_attr("type", "password");

        assert_eq!(elem.attr("type"), Some("password"));
        assert_eq!(elem.attrs.len(), 1);
    }

    #[test]
    fn test_tag_is_lowercased() {
        let elem = ElementData::new("DIV");
        assert_eq!(elem.tag, "div");
    }
}
