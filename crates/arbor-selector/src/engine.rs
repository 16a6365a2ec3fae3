//! Selector resolution against a document
//!
//! One interface, two find-one strategies. The strategies only differ in
//! how the single-result lookup is unwrapped; matching and scoping are
//! shared.

use arbor_dom::{Document, NodeId};

use crate::parser;
use crate::selector::matches_list;
use crate::SelectorError;

/// Finds nodes by selector under a scope node
///
/// The scope node itself is never part of the result; matches are its
/// descendants in document order.
pub trait Resolver {
    /// All matches under `scope`, document order
    fn find_all(
        &self,
        document: &Document,
        scope: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>, SelectorError>;

    /// First match under `scope`, if any
    fn find_one(
        &self,
        document: &Document,
        scope: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>, SelectorError> {
        Ok(self.find_all(document, scope, selector)?.into_iter().next())
    }
}

/// How [`SelectorEngine`] unwraps a single-result lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FindOne {
    /// Stop the traversal at the first hit
    #[default]
    FirstMatch,
    /// Run the full query, then take the head
    CollectFirst,
}

/// Stock resolver over an [`arbor_dom`] tree
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorEngine {
    strategy: FindOne,
}

impl SelectorEngine {
    pub fn new(strategy: FindOne) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> FindOne {
        self.strategy
    }
}

impl Resolver for SelectorEngine {
    fn find_all(
        &self,
        document: &Document,
        scope: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>, SelectorError> {
        let list = parser::parse(selector)?;
        let tree = document.tree();
        let matches: Vec<NodeId> = tree
            .descendants(scope)
            .filter(|&(id, _)| matches_list(tree, &list, id))
            .map(|(id, _)| id)
            .collect();
        tracing::trace!(selector, count = matches.len(), "resolved selector");
        Ok(matches)
    }

    fn find_one(
        &self,
        document: &Document,
        scope: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>, SelectorError> {
        match self.strategy {
            FindOne::FirstMatch => {
                let list = parser::parse(selector)?;
                let tree = document.tree();
                Ok(tree
                    .descendants(scope)
                    .find(|&(id, _)| matches_list(tree, &list, id))
                    .map(|(id, _)| id))
            }
            FindOne::CollectFirst => {
                Ok(self.find_all(document, scope, selector)?.into_iter().next())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_dom::Document;

    /// <body><div id="main" class="panel"><h2/><ul><li class="item"/>
    /// <li class="item"/></ul></div><p lang="en-US"/></body>
    fn fixture() -> (Document, NodeId) {
        let mut doc = Document::new("about:test");
        let body = doc.body().unwrap();
        let tree = doc.tree_mut();

        let div = tree.create_element("div");
        tree.set_attr(div, "id", "main");
        tree.set_attr(div, "class", "panel");
        let h2 = tree.create_element("h2");
        let ul = tree.create_element("ul");
        let li1 = tree.create_element("li");
        tree.set_attr(li1, "class", "item");
        let li2 = tree.create_element("li");
        tree.set_attr(li2, "class", "item");
        let p = tree.create_element("p");
        tree.set_attr(p, "lang", "en-US");
        let note = tree.create_comment("layout boundary");

        tree.append_child(body, div);
        tree.append_child(div, h2);
        tree.append_child(div, ul);
        tree.append_child(ul, li1);
        tree.append_child(ul, li2);
        tree.append_child(body, p);
        tree.append_child(body, note);

        (doc, body)
    }

    #[test]
    fn test_find_all_document_order() {
        let (doc, body) = fixture();
        let engine = SelectorEngine::default();

        let items = engine.find_all(&doc, body, "li").unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].index() < items[1].index());
    }

    #[test]
    fn test_find_all_empty_result() {
        let (doc, body) = fixture();
        let engine = SelectorEngine::default();

        assert!(engine.find_all(&doc, body, "table").unwrap().is_empty());
    }

    #[test]
    fn test_find_one_by_id() {
        let (doc, body) = fixture();
        let engine = SelectorEngine::default();

        let found = engine.find_one(&doc, body, "#main").unwrap();
        assert_eq!(found, doc.get_element_by_id("main"));
    }

    #[test]
    fn test_find_one_strategies_agree() {
        let (doc, body) = fixture();
        let native = SelectorEngine::new(FindOne::FirstMatch);
        let wrapped = SelectorEngine::new(FindOne::CollectFirst);

        for selector in ["li", "div h2", ".item", "[lang|=en]", "nav"] {
            assert_eq!(
                native.find_one(&doc, body, selector).unwrap(),
                wrapped.find_one(&doc, body, selector).unwrap(),
                "strategies disagree on {selector}"
            );
        }
    }

    #[test]
    fn test_scope_excluded_from_results() {
        let (doc, body) = fixture();
        let engine = SelectorEngine::default();

        // body matches `*` but is the scope, so only descendants appear
        let all = engine.find_all(&doc, body, "*").unwrap();
        assert!(!all.contains(&body));
        assert_eq!(all.len(), 6); // comment node never matches
    }

    #[test]
    fn test_scoped_to_subtree() {
        let (doc, _) = fixture();
        let engine = SelectorEngine::default();

        let ul = engine
            .find_one(&doc, doc.tree().root(), "ul")
            .unwrap()
            .unwrap();
        // h2 is outside the ul subtree
        assert!(engine.find_one(&doc, ul, "h2").unwrap().is_none());
        assert_eq!(engine.find_all(&doc, ul, "li").unwrap().len(), 2);
    }

    #[test]
    fn test_descendant_combinator_crosses_levels() {
        let (doc, body) = fixture();
        let engine = SelectorEngine::default();

        assert_eq!(engine.find_all(&doc, body, "div li").unwrap().len(), 2);
        assert_eq!(engine.find_all(&doc, body, "#main .item").unwrap().len(), 2);
        assert!(engine.find_all(&doc, body, "p li").unwrap().is_empty());
    }

    #[test]
    fn test_selector_group() {
        let (doc, body) = fixture();
        let engine = SelectorEngine::default();

        let found = engine.find_all(&doc, body, "h2, p").unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_parse_error_propagates() {
        let (doc, body) = fixture();
        let engine = SelectorEngine::default();

        assert!(engine.find_all(&doc, body, "").is_err());
        assert!(engine.find_one(&doc, body, "[broken").is_err());
    }
}
