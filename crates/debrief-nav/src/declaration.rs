//! Declarative sidebar input.
//!
//! A sidebars file is a JSON object mapping sidebar ids to forests:
//!
//! ```json
//! {
//!   "docsSidebar": [
//!     "intro",
//!     { "type": "category", "label": "Features", "items": ["features/rest-api"] }
//!   ]
//! }
//! ```
//!
//! A bare string is shorthand for `{ "type": "doc", "id": ... }`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sidebar id to declared forest. Ordered by id so iteration is deterministic.
pub type SidebarsDeclaration = BTreeMap<String, Vec<NavDeclaration>>;

/// One element of a declared forest.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NavDeclaration {
    /// Bare document id.
    Doc(String),
    /// Explicit item object.
    Item(DeclaredItem),
}

/// Object form of a declared element.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DeclaredItem {
    Doc {
        id: String,
    },
    Category {
        label: String,
        #[serde(default)]
        items: Vec<NavDeclaration>,
    },
}

impl NavDeclaration {
    /// Document shorthand.
    #[must_use]
    pub fn doc(id: impl Into<String>) -> Self {
        Self::Doc(id.into())
    }

    /// Category literal.
    #[must_use]
    pub fn category(label: impl Into<String>, items: Vec<NavDeclaration>) -> Self {
        Self::Item(DeclaredItem::Category {
            label: label.into(),
            items,
        })
    }
}

/// Parse a sidebars declaration from JSON.
///
/// # Errors
///
/// Returns the `serde_json` error if the content is not a valid declaration.
pub fn parse_sidebars(content: &str) -> Result<SidebarsDeclaration, serde_json::Error> {
    serde_json::from_str(content)
}
