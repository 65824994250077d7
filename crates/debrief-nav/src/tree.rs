//! Navigation tree building and validation.
//!
//! A [`NavTree`] is built eagerly from a declared forest. The build walks the
//! declaration depth-first, left to right, and fails on the first problem:
//!
//! - a doc id missing from the [`DocIndex`] ([`NavError::UnknownDocId`])
//! - a category with no items ([`NavError::EmptyCategory`])
//! - a doc id declared twice anywhere in the tree ([`NavError::DuplicateDocRef`])
//!
//! The declaration is a plain value, so the resulting structure cannot contain
//! cycles and no cycle check is performed.

use std::collections::HashSet;

use serde::Serialize;

use crate::declaration::{DeclaredItem, NavDeclaration};
use crate::docs::DocIndex;
use crate::linear::{LinearOrder, Neighbors};

/// Node of a navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavNode {
    /// Leaf pointing at a known document.
    Doc { id: String },
    /// Labelled group with at least one child.
    Category {
        label: String,
        children: Vec<NavNode>,
    },
}

/// Error returned when a declaration does not form a valid tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// Document id is not in the document index.
    #[error("Unknown document id {0:?}")]
    UnknownDocId(String),
    /// Category declares no items.
    #[error("Category {0:?} has no items")]
    EmptyCategory(String),
    /// Document id is referenced more than once.
    #[error("Document {0:?} appears more than once")]
    DuplicateDocRef(String),
}

/// Validated navigation tree for one sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavTree {
    id: String,
    items: Vec<NavNode>,
    order: LinearOrder,
}

impl NavTree {
    /// Build a tree from a declared forest.
    ///
    /// # Errors
    ///
    /// Returns the first [`NavError`] found in depth-first order.
    pub fn build(
        id: impl Into<String>,
        declaration: &[NavDeclaration],
        known_docs: &DocIndex,
    ) -> Result<Self, NavError> {
        let id = id.into();
        let mut builder = TreeBuilder {
            known_docs,
            seen: HashSet::new(),
        };
        let items = builder.build_nodes(declaration)?;
        let order = LinearOrder::from_nodes(&items);

        tracing::debug!(sidebar = %id, docs = order.len(), "Built navigation tree");

        Ok(Self { id, items, order })
    }

    /// Sidebar id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Top-level nodes in declaration order.
    #[must_use]
    pub fn items(&self) -> &[NavNode] {
        &self.items
    }

    /// Reading order of the tree's documents.
    #[must_use]
    pub fn linear_order(&self) -> &LinearOrder {
        &self.order
    }

    /// Whether `doc_id` appears in this tree.
    #[must_use]
    pub fn contains(&self, doc_id: &str) -> bool {
        self.order.position(doc_id).is_some()
    }

    /// Previous and next documents around `doc_id`.
    #[must_use]
    pub fn neighbors(&self, doc_id: &str) -> Neighbors<'_> {
        self.order.neighbors(doc_id)
    }

    /// Labels of the categories enclosing `doc_id`, outermost first.
    ///
    /// Returns `None` if the document is not in this tree.
    #[must_use]
    pub fn breadcrumbs(&self, doc_id: &str) -> Option<Vec<&str>> {
        fn find<'a>(nodes: &'a [NavNode], doc_id: &str, trail: &mut Vec<&'a str>) -> bool {
            for node in nodes {
                match node {
                    NavNode::Doc { id } if id == doc_id => return true,
                    NavNode::Doc { .. } => {}
                    NavNode::Category { label, children } => {
                        trail.push(label);
                        if find(children, doc_id, trail) {
                            return true;
                        }
                        trail.pop();
                    }
                }
            }
            false
        }

        if !self.contains(doc_id) {
            return None;
        }
        let mut trail = Vec::new();
        find(&self.items, doc_id, &mut trail).then_some(trail)
    }
}

/// Depth-first builder carrying the tree-wide set of seen doc ids.
struct TreeBuilder<'a> {
    known_docs: &'a DocIndex,
    seen: HashSet<String>,
}

impl TreeBuilder<'_> {
    fn build_nodes(&mut self, declaration: &[NavDeclaration]) -> Result<Vec<NavNode>, NavError> {
        declaration
            .iter()
            .map(|element| self.build_node(element))
            .collect()
    }

    fn build_node(&mut self, element: &NavDeclaration) -> Result<NavNode, NavError> {
        match element {
            NavDeclaration::Doc(id) | NavDeclaration::Item(DeclaredItem::Doc { id }) => {
                self.build_doc(id)
            }
            NavDeclaration::Item(DeclaredItem::Category { label, items }) => {
                if items.is_empty() {
                    return Err(NavError::EmptyCategory(label.clone()));
                }
                let children = self.build_nodes(items)?;
                Ok(NavNode::Category {
                    label: label.clone(),
                    children,
                })
            }
        }
    }

    fn build_doc(&mut self, id: &str) -> Result<NavNode, NavError> {
        if !self.known_docs.contains(id) {
            return Err(NavError::UnknownDocId(id.to_owned()));
        }
        if !self.seen.insert(id.to_owned()) {
            return Err(NavError::DuplicateDocRef(id.to_owned()));
        }
        Ok(NavNode::Doc { id: id.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn known(ids: &[&str]) -> DocIndex {
        ids.iter().copied().collect()
    }

    fn doc(id: &str) -> NavDeclaration {
        NavDeclaration::doc(id)
    }

    fn features() -> Vec<NavDeclaration> {
        vec![
            doc("intro"),
            NavDeclaration::category("Features", vec![doc("discord-commands"), doc("rest-api")]),
        ]
    }

    fn features_docs() -> DocIndex {
        known(&["intro", "discord-commands", "rest-api"])
    }

    #[test]
    fn test_build_preserves_structure() {
        let tree = NavTree::build("docsSidebar", &features(), &features_docs()).unwrap();

        assert_eq!(tree.id(), "docsSidebar");
        assert_eq!(
            tree.items(),
            [
                NavNode::Doc {
                    id: "intro".to_owned()
                },
                NavNode::Category {
                    label: "Features".to_owned(),
                    children: vec![
                        NavNode::Doc {
                            id: "discord-commands".to_owned()
                        },
                        NavNode::Doc {
                            id: "rest-api".to_owned()
                        },
                    ],
                },
            ]
        );
    }

    #[test]
    fn test_build_linear_order_and_neighbors() {
        let tree = NavTree::build("docsSidebar", &features(), &features_docs()).unwrap();
        let order = tree.linear_order();

        assert_eq!(order.as_slice(), ["intro", "discord-commands", "rest-api"]);
        assert_eq!(order.previous("rest-api"), Some("discord-commands"));
        assert_eq!(order.next("intro"), Some("discord-commands"));
        assert_eq!(order.next("rest-api"), None);
    }

    #[test]
    fn test_unknown_doc_id_fails() {
        let declaration = vec![doc("intro"), doc("missing")];

        let err = NavTree::build("main", &declaration, &known(&["intro"])).unwrap_err();

        assert_eq!(err, NavError::UnknownDocId("missing".to_owned()));
    }

    #[test]
    fn test_unknown_doc_id_nested_fails() {
        let declaration = vec![NavDeclaration::category("A", vec![doc("missing")])];

        let err = NavTree::build("main", &declaration, &known(&[])).unwrap_err();

        assert_eq!(err, NavError::UnknownDocId("missing".to_owned()));
    }

    #[test]
    fn test_duplicate_across_categories_fails() {
        let declaration = vec![
            NavDeclaration::category("A", vec![doc("intro")]),
            NavDeclaration::category("B", vec![doc("rest-api"), doc("intro")]),
        ];

        let err = NavTree::build("main", &declaration, &known(&["intro", "rest-api"])).unwrap_err();

        assert_eq!(err, NavError::DuplicateDocRef("intro".to_owned()));
    }

    #[test]
    fn test_duplicate_at_top_level_fails() {
        let declaration = vec![doc("intro"), doc("intro")];

        let err = NavTree::build("main", &declaration, &known(&["intro"])).unwrap_err();

        assert_eq!(err, NavError::DuplicateDocRef("intro".to_owned()));
    }

    #[test]
    fn test_explicit_doc_item_counts_as_duplicate_of_shorthand() {
        let declaration = vec![
            doc("intro"),
            NavDeclaration::Item(DeclaredItem::Doc {
                id: "intro".to_owned(),
            }),
        ];

        let err = NavTree::build("main", &declaration, &known(&["intro"])).unwrap_err();

        assert_eq!(err, NavError::DuplicateDocRef("intro".to_owned()));
    }

    #[test]
    fn test_empty_category_fails() {
        let declaration = vec![doc("intro"), NavDeclaration::category("X", vec![])];

        let err = NavTree::build("main", &declaration, &known(&["intro"])).unwrap_err();

        assert_eq!(err, NavError::EmptyCategory("X".to_owned()));
    }

    #[test]
    fn test_first_error_in_traversal_order_wins() {
        let declaration = vec![NavDeclaration::category("X", vec![]), doc("missing")];

        let err = NavTree::build("main", &declaration, &known(&[])).unwrap_err();

        assert_eq!(err, NavError::EmptyCategory("X".to_owned()));
    }

    #[test]
    fn test_empty_declaration_builds_empty_tree() {
        let tree = NavTree::build("main", &[], &known(&[])).unwrap();

        assert!(tree.items().is_empty());
        assert!(tree.linear_order().is_empty());
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let first = NavTree::build("docsSidebar", &features(), &features_docs()).unwrap();
        let second = NavTree::build("docsSidebar", &features(), &features_docs()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.linear_order(), second.linear_order());
    }

    #[test]
    fn test_breadcrumbs() {
        let declaration = vec![
            doc("intro"),
            NavDeclaration::category(
                "Architecture",
                vec![NavDeclaration::category("Patterns", vec![doc("cqrs-pattern")])],
            ),
        ];
        let tree =
            NavTree::build("main", &declaration, &known(&["intro", "cqrs-pattern"])).unwrap();

        assert_eq!(
            tree.breadcrumbs("cqrs-pattern"),
            Some(vec!["Architecture", "Patterns"])
        );
        assert_eq!(tree.breadcrumbs("intro"), Some(vec![]));
        assert_eq!(tree.breadcrumbs("missing"), None);
    }

    #[test]
    fn test_serialization() {
        let tree = NavTree::build("docsSidebar", &features(), &features_docs()).unwrap();

        let json = serde_json::to_value(&tree).unwrap();

        assert_eq!(json["id"], "docsSidebar");
        assert_eq!(json["items"][0]["type"], "doc");
        assert_eq!(json["items"][0]["id"], "intro");
        assert_eq!(json["items"][1]["type"], "category");
        assert_eq!(json["items"][1]["label"], "Features");
        assert_eq!(json["items"][1]["children"][1]["id"], "rest-api");
        assert_eq!(json["order"][2], "rest-api");
    }
}
