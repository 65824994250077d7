//! Flattened reading order of a navigation tree.

use std::collections::HashMap;

use serde::Serialize;

use crate::tree::NavNode;

/// Depth-first, pre-order sequence of the document leaves of a tree.
///
/// Categories never appear; the leaves of one category are contiguous.
/// Derived from a built tree and owned by it, so it cannot drift from the
/// structure it describes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LinearOrder {
    docs: Vec<String>,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

/// Previous and next documents around a position in a [`LinearOrder`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neighbors<'a> {
    pub previous: Option<&'a str>,
    pub next: Option<&'a str>,
}

impl LinearOrder {
    /// Flatten `nodes` in pre-order.
    pub(crate) fn from_nodes(nodes: &[NavNode]) -> Self {
        fn collect(nodes: &[NavNode], docs: &mut Vec<String>) {
            for node in nodes {
                match node {
                    NavNode::Doc { id } => docs.push(id.clone()),
                    NavNode::Category { children, .. } => collect(children, docs),
                }
            }
        }

        let mut docs = Vec::new();
        collect(nodes, &mut docs);
        let positions = docs
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        Self { docs, positions }
    }

    /// Document ids in reading order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.docs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Position of `id` in reading order.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// First document in reading order.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.docs.first().map(String::as_str)
    }

    /// Document before `id`, `None` at the start or if `id` is not in the order.
    #[must_use]
    pub fn previous(&self, id: &str) -> Option<&str> {
        let idx = self.position(id)?.checked_sub(1)?;
        self.docs.get(idx).map(String::as_str)
    }

    /// Document after `id`, `None` at the end or if `id` is not in the order.
    #[must_use]
    pub fn next(&self, id: &str) -> Option<&str> {
        let idx = self.position(id)? + 1;
        self.docs.get(idx).map(String::as_str)
    }

    /// Both neighbors of `id`.
    #[must_use]
    pub fn neighbors(&self, id: &str) -> Neighbors<'_> {
        Neighbors {
            previous: self.previous(id),
            next: self.next(id),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.docs.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(id: &str) -> NavNode {
        NavNode::Doc { id: id.to_owned() }
    }

    fn category(label: &str, children: Vec<NavNode>) -> NavNode {
        NavNode::Category {
            label: label.to_owned(),
            children,
        }
    }

    fn sample() -> LinearOrder {
        LinearOrder::from_nodes(&[
            doc("intro"),
            category(
                "Features",
                vec![doc("discord-commands"), category("API", vec![doc("rest-api")])],
            ),
            doc("configuration"),
        ])
    }

    #[test]
    fn test_from_nodes_is_preorder_leaves_only() {
        let order = sample();

        assert_eq!(
            order.as_slice(),
            ["intro", "discord-commands", "rest-api", "configuration"]
        );
    }

    #[test]
    fn test_previous_and_next() {
        let order = sample();

        assert_eq!(order.previous("rest-api"), Some("discord-commands"));
        assert_eq!(order.next("rest-api"), Some("configuration"));
        assert_eq!(order.next("intro"), Some("discord-commands"));
    }

    #[test]
    fn test_ends_have_no_neighbor() {
        let order = sample();

        assert_eq!(order.previous("intro"), None);
        assert_eq!(order.next("configuration"), None);
    }

    #[test]
    fn test_unknown_id_has_no_neighbors() {
        let order = sample();

        assert_eq!(order.neighbors("missing"), Neighbors::default());
        assert_eq!(order.position("missing"), None);
    }

    #[test]
    fn test_single_doc_has_no_neighbors() {
        let order = LinearOrder::from_nodes(&[doc("intro")]);

        assert_eq!(
            order.neighbors("intro"),
            Neighbors {
                previous: None,
                next: None
            }
        );
        assert_eq!(order.first(), Some("intro"));
    }

    #[test]
    fn test_serializes_as_id_list() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(
            json,
            serde_json::json!(["intro", "discord-commands", "rest-api", "configuration"])
        );
    }
}
