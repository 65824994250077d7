//! Sidebar declarations and navigation trees.
//!
//! This crate provides:
//! - [`NavDeclaration`]: the declarative sidebar input, parsed from JSON
//! - [`NavTree`]: a validated tree built eagerly from a declaration
//! - [`LinearOrder`]: the flattened reading order used for prev/next links
//! - [`DocIndex`]: the set of known document ids, optionally scanned from disk
//!
//! # Quick Start
//!
//! ```
//! use debrief_nav::{DocIndex, NavDeclaration, NavTree};
//!
//! let known: DocIndex = ["intro", "discord-commands", "rest-api"].into_iter().collect();
//! let declaration = vec![
//!     NavDeclaration::doc("intro"),
//!     NavDeclaration::category(
//!         "Features",
//!         vec![NavDeclaration::doc("discord-commands"), NavDeclaration::doc("rest-api")],
//!     ),
//! ];
//!
//! let tree = NavTree::build("docsSidebar", &declaration, &known).unwrap();
//! assert_eq!(tree.linear_order().next("intro"), Some("discord-commands"));
//! assert_eq!(tree.linear_order().next("rest-api"), None);
//! ```

mod declaration;
mod docs;
mod linear;
mod sidebars;
mod tree;

pub use declaration::{DeclaredItem, NavDeclaration, SidebarsDeclaration, parse_sidebars};
pub use docs::DocIndex;
pub use linear::{LinearOrder, Neighbors};
pub use sidebars::{SidebarError, Sidebars};
pub use tree::{NavError, NavNode, NavTree};
