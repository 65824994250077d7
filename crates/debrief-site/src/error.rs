//! Site loading errors.

use std::path::PathBuf;

use debrief_config::ConfigError;
use debrief_nav::SidebarError;

/// Error returned when a site definition cannot be loaded.
///
/// All variants are fatal: there is no partially loaded site.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Site configuration did not resolve.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A sidebar declaration is invalid.
    #[error(transparent)]
    Sidebar(#[from] SidebarError),
    /// Sidebars file is missing.
    #[error("Sidebars file not found: {}", .0.display())]
    SidebarsNotFound(PathBuf),
    /// Reading the sidebars file or scanning the docs directory failed.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Sidebars file is not a valid declaration.
    #[error("Invalid sidebars declaration in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A navbar item points at a sidebar that is not declared.
    #[error("Navbar item {label:?} references undeclared sidebar {sidebar_id:?}")]
    UnknownSidebar { label: String, sidebar_id: String },
    /// A navbar item points at a sidebar that lists no documents.
    #[error("Navbar item {label:?} references sidebar {sidebar_id:?} which has no documents")]
    EmptySidebar { label: String, sidebar_id: String },
}
