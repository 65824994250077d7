//! Per-page navigation data handed to page composition.

use debrief_config::NavbarPosition;
use serde::Serialize;

/// Link to a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocLink {
    /// Document id.
    pub id: String,
    /// Site-relative URL, including the base path.
    pub url: String,
}

/// Navigation context for one document page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageNav {
    /// Document id.
    pub id: String,
    /// Site-relative URL, including the base path.
    pub url: String,
    /// Sidebar shown next to the page. `None` if no sidebar lists the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<String>,
    /// Previous document in the sidebar's reading order.
    pub previous: Option<DocLink>,
    /// Next document in the sidebar's reading order.
    pub next: Option<DocLink>,
    /// Labels of enclosing categories, outermost first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub breadcrumbs: Vec<String>,
    /// "Edit this page" link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<String>,
}

/// Navbar entry with its target resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavbarLink {
    pub label: String,
    /// Site-relative URL for sidebar links, absolute URL for external links.
    pub href: String,
    pub position: NavbarPosition,
}
