//! Selector AST and matching
//!
//! Supports selector groups, the descendant combinator, and compound simple
//! selectors: universal, type, id, class, and the attribute matchers.

use arbor_dom::{DomTree, ElementData, NodeId};

/// A parsed selector group: `h2, ul li`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<Selector>,
}

/// One selector of a group: compounds joined by descendant combinators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub compounds: Vec<Compound>,
}

/// A compound simple selector: `input.wide[type=text]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    pub components: Vec<Component>,
}

/// A component of a compound selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let Some(val) = value else {
            return false;
        };
        let Some(matcher) = &self.matcher else {
            // [attr] - just check existence
            return true;
        };

        let val = if self.case_insensitive {
            val.to_lowercase()
        } else {
            val.to_string()
        };
        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        };

        match matcher {
            AttributeMatcher::Exact(expected) => val == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                val.split_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                val == expected || val.starts_with(&format!("{}-", expected))
            }
            AttributeMatcher::Prefix(expected) => val.starts_with(&fold(expected)),
            AttributeMatcher::Suffix(expected) => val.ends_with(&fold(expected)),
            AttributeMatcher::Substring(expected) => val.contains(&fold(expected)),
        }
    }
}

/// Match a selector group against an element node
pub(crate) fn matches_list(tree: &DomTree, list: &SelectorList, id: NodeId) -> bool {
    list.selectors.iter().any(|s| matches_selector(tree, s, id))
}

/// Match one selector: the rightmost compound matches the node itself, every
/// remaining compound matches some ancestor, nearest first.
fn matches_selector(tree: &DomTree, selector: &Selector, id: NodeId) -> bool {
    let Some((last, rest)) = selector.compounds.split_last() else {
        return false;
    };
    if !matches_compound(tree, last, id) {
        return false;
    }

    let mut cursor = tree.get(id).and_then(|n| n.parent);
    for compound in rest.iter().rev() {
        loop {
            let Some(ancestor) = cursor else {
                return false;
            };
            cursor = tree.get(ancestor).and_then(|n| n.parent);
            if matches_compound(tree, compound, ancestor) {
                break;
            }
        }
    }
    true
}

fn matches_compound(tree: &DomTree, compound: &Compound, id: NodeId) -> bool {
    let Some(elem) = tree.get(id).and_then(|n| n.as_element()) else {
        return false;
    };
    compound
        .components
        .iter()
        .all(|c| matches_component(c, elem))
}

/// Match a single component against element data
fn matches_component(component: &Component, element: &ElementData) -> bool {
    match component {
        Component::Universal => true,
        Component::Type(tag) => element.tag.eq_ignore_ascii_case(tag),
        Component::Id(id) => element.id.as_deref() == Some(id.as_str()),
        Component::Class(class) => element.has_class(class),
        Component::Attribute(attr) => attr.matches(element.attr(&attr.name)),
    }
}
