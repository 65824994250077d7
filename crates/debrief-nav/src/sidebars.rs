//! Collection of independently addressable navigation trees.

use std::collections::{BTreeMap, BTreeSet};

use crate::declaration::SidebarsDeclaration;
use crate::docs::DocIndex;
use crate::tree::{NavError, NavTree};

/// Error building one sidebar of a declaration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Sidebar {sidebar:?}: {source}")]
pub struct SidebarError {
    /// Id of the sidebar that failed to build.
    pub sidebar: String,
    /// What was wrong with it.
    #[source]
    pub source: NavError,
}

/// Built sidebars keyed by id.
///
/// Document uniqueness is enforced per tree: two sidebars may both list
/// the same document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sidebars {
    trees: BTreeMap<String, NavTree>,
}

impl Sidebars {
    /// Build every declared sidebar, in sidebar-id order.
    ///
    /// # Errors
    ///
    /// Returns the first failing sidebar with its [`NavError`].
    pub fn build(
        declarations: &SidebarsDeclaration,
        known_docs: &DocIndex,
    ) -> Result<Self, SidebarError> {
        let trees = declarations
            .iter()
            .map(|(id, declaration)| {
                NavTree::build(id.as_str(), declaration, known_docs)
                    .map(|tree| (id.clone(), tree))
                    .map_err(|source| SidebarError {
                        sidebar: id.clone(),
                        source,
                    })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { trees })
    }

    /// Get a sidebar by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&NavTree> {
        self.trees.get(id)
    }

    /// Sidebar ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.trees.keys().map(String::as_str)
    }

    /// Sidebars in id order.
    pub fn iter(&self) -> impl Iterator<Item = &NavTree> {
        self.trees.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// First sidebar (in id order) that lists `doc_id`.
    #[must_use]
    pub fn sidebar_for(&self, doc_id: &str) -> Option<&NavTree> {
        self.trees.values().find(|tree| tree.contains(doc_id))
    }

    /// Every document listed by at least one sidebar.
    #[must_use]
    pub fn referenced_docs(&self) -> BTreeSet<&str> {
        self.trees
            .values()
            .flat_map(|tree| tree.linear_order().iter())
            .collect()
    }
}
