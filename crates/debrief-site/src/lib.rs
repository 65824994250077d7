//! Resolved site model for the Debrief documentation site.
//!
//! This crate provides:
//! - [`Site`]: the immutable handle owning the resolved configuration,
//!   known documents and built sidebars
//! - [`PageNav`]: per-page navigation (URL, prev/next, breadcrumbs) for
//!   page composition
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use debrief_config::{Config, EnvOverrides};
//! use debrief_site::Site;
//!
//! let config = Config::load(None, &EnvOverrides::from_env())?;
//! let site = Arc::new(Site::load(&config)?);
//!
//! if let Some(page) = site.page_nav("intro") {
//!     println!("{} -> {:?}", page.url, page.next);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod page;
mod site;

pub use error::SiteError;
pub use page::{DocLink, NavbarLink, PageNav};
pub use site::Site;
