//! Resolved documentation site.
//!
//! [`Site`] owns the resolved [`SiteConfig`], the known documents and the
//! built sidebars. It is constructed once, before any page is composed, and
//! then shared read-only (typically as `Arc<Site>`) by every consumer.
//!
//! # Example
//!
//! ```
//! use debrief_config::{EnvOverrides, PartialSiteConfig, SiteConfig};
//! use debrief_nav::{DocIndex, parse_sidebars};
//! use debrief_site::Site;
//!
//! let env: EnvOverrides = [("BASE_URL", "/debrief/")].into_iter().collect();
//! let config = SiteConfig::resolve(PartialSiteConfig::default(), &env).unwrap();
//! let docs: DocIndex = ["intro", "getting-started"].into_iter().collect();
//! let sidebars = parse_sidebars(r#"{ "docsSidebar": ["intro", "getting-started"] }"#).unwrap();
//!
//! let site = Site::new(config, docs, &sidebars).unwrap();
//! let page = site.page_nav("intro").unwrap();
//! assert_eq!(page.url, "/debrief/docs/intro");
//! assert_eq!(page.next.unwrap().id, "getting-started");
//! ```

use std::path::Path;

use debrief_config::{Config, NavbarItem, SiteConfig};
use debrief_nav::{DocIndex, NavTree, Sidebars, SidebarsDeclaration, parse_sidebars};

use crate::error::SiteError;
use crate::page::{DocLink, NavbarLink, PageNav};

/// Immutable site model.
#[derive(Debug)]
pub struct Site {
    config: SiteConfig,
    docs: DocIndex,
    sidebars: Sidebars,
}

impl Site {
    /// Build a site from a resolved config, known documents and sidebar declarations.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Sidebar` if a sidebar is invalid, and
    /// `SiteError::UnknownSidebar` / `SiteError::EmptySidebar` if a navbar
    /// item cannot be linked.
    pub fn new(
        config: SiteConfig,
        docs: DocIndex,
        declarations: &SidebarsDeclaration,
    ) -> Result<Self, SiteError> {
        let sidebars = Sidebars::build(declarations, &docs)?;
        let site = Self {
            config,
            docs,
            sidebars,
        };
        site.validate_navbar()?;
        site.warn_unlisted_docs();

        tracing::info!(
            title = site.config.title(),
            docs = site.docs.len(),
            sidebars = site.sidebars.len(),
            "Site model ready"
        );
        Ok(site)
    }

    /// Load a site from disk: read the sidebars file and scan the docs directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the sidebars file is missing or malformed, the docs
    /// directory cannot be read, or the resulting site is invalid.
    pub fn load(config: &Config) -> Result<Self, SiteError> {
        let sidebar_path = config.sidebar_path();
        let declarations = read_sidebars(&sidebar_path)?;

        let source_dir = config.source_dir();
        let docs = DocIndex::scan(&source_dir).map_err(|source| SiteError::Io {
            path: source_dir,
            source,
        })?;

        Self::new(config.site.clone(), docs, &declarations)
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub fn docs(&self) -> &DocIndex {
        &self.docs
    }

    #[must_use]
    pub fn sidebars(&self) -> &Sidebars {
        &self.sidebars
    }

    /// Get a sidebar by id.
    #[must_use]
    pub fn sidebar(&self, id: &str) -> Option<&NavTree> {
        self.sidebars.get(id)
    }

    /// Site-relative URL of a document (e.g., `/debrief/docs/features/rest-api`).
    #[must_use]
    pub fn doc_url(&self, doc_id: &str) -> String {
        let base_url = self.config.base_url();
        let route = self.config.docs().route_base_path.trim_matches('/');
        if route.is_empty() {
            format!("{base_url}{doc_id}")
        } else {
            format!("{base_url}{route}/{doc_id}")
        }
    }

    /// Absolute URL of a document, including the site origin.
    #[must_use]
    pub fn permalink(&self, doc_id: &str) -> String {
        format!(
            "{}{}",
            self.config.url().trim_end_matches('/'),
            self.doc_url(doc_id)
        )
    }

    /// "Edit this page" link for a document, if an edit URL is configured.
    ///
    /// Assumes the `.md` extension for the source file.
    #[must_use]
    pub fn edit_url(&self, doc_id: &str) -> Option<String> {
        let prefix = self.config.docs().edit_url.as_deref()?;
        let separator = if prefix.ends_with('/') { "" } else { "/" };
        Some(format!("{prefix}{separator}{doc_id}.md"))
    }

    /// Navigation context for a document page.
    ///
    /// Returns `None` for unknown documents. Documents not listed by any
    /// sidebar get a context without sidebar, neighbors or breadcrumbs.
    #[must_use]
    pub fn page_nav(&self, doc_id: &str) -> Option<PageNav> {
        if !self.docs.contains(doc_id) {
            return None;
        }

        let tree = self.sidebars.sidebar_for(doc_id);
        let neighbors = tree.map(|tree| tree.neighbors(doc_id)).unwrap_or_default();
        let breadcrumbs = tree
            .and_then(|tree| tree.breadcrumbs(doc_id))
            .unwrap_or_default()
            .into_iter()
            .map(str::to_owned)
            .collect();

        Some(PageNav {
            id: doc_id.to_owned(),
            url: self.doc_url(doc_id),
            sidebar: tree.map(|tree| tree.id().to_owned()),
            previous: neighbors.previous.map(|id| self.doc_link(id)),
            next: neighbors.next.map(|id| self.doc_link(id)),
            breadcrumbs,
            edit_url: self.edit_url(doc_id),
        })
    }

    /// Navbar items with sidebar links resolved to the sidebar's first document.
    #[must_use]
    pub fn navbar_links(&self) -> Vec<NavbarLink> {
        self.config
            .navbar()
            .items
            .iter()
            .filter_map(|item| match item {
                NavbarItem::DocSidebar {
                    sidebar_id,
                    label,
                    position,
                    ..
                } => {
                    let first = self.sidebars.get(sidebar_id)?.linear_order().first()?;
                    Some(NavbarLink {
                        label: label.clone(),
                        href: self.doc_url(first),
                        position: *position,
                    })
                }
                NavbarItem::Link {
                    href,
                    label,
                    position,
                } => Some(NavbarLink {
                    label: label.clone(),
                    href: href.clone(),
                    position: *position,
                }),
            })
            .collect()
    }

    /// Known documents that no sidebar lists.
    #[must_use]
    pub fn unlisted_docs(&self) -> Vec<&str> {
        let listed = self.sidebars.referenced_docs();
        self.docs.iter().filter(|id| !listed.contains(id)).collect()
    }

    fn doc_link(&self, doc_id: &str) -> DocLink {
        DocLink {
            id: doc_id.to_owned(),
            url: self.doc_url(doc_id),
        }
    }

    fn validate_navbar(&self) -> Result<(), SiteError> {
        for item in &self.config.navbar().items {
            let NavbarItem::DocSidebar {
                sidebar_id, label, ..
            } = item
            else {
                continue;
            };
            let Some(tree) = self.sidebars.get(sidebar_id) else {
                return Err(SiteError::UnknownSidebar {
                    label: label.clone(),
                    sidebar_id: sidebar_id.clone(),
                });
            };
            if tree.linear_order().is_empty() {
                return Err(SiteError::EmptySidebar {
                    label: label.clone(),
                    sidebar_id: sidebar_id.clone(),
                });
            }
        }
        Ok(())
    }

    fn warn_unlisted_docs(&self) {
        for id in self.unlisted_docs() {
            tracing::warn!(id, "Document is not listed in any sidebar");
        }
    }
}

/// Read and parse a sidebars declaration file.
fn read_sidebars(path: &Path) -> Result<SidebarsDeclaration, SiteError> {
    if !path.exists() {
        return Err(SiteError::SidebarsNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_sidebars(&content).map_err(|source| SiteError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use debrief_config::{EnvOverrides, NavbarPosition, PartialSiteConfig};
    use debrief_nav::NavError;
    use pretty_assertions::assert_eq;

    static_assertions::assert_impl_all!(super::Site: Send, Sync);

    const SIDEBARS: &str = r#"{
        "docsSidebar": [
            "intro",
            "getting-started",
            {
                "type": "category",
                "label": "Features",
                "items": ["features/discord-commands", "features/rest-api", "features/ai-analysis"]
            },
            {
                "type": "category",
                "label": "Architecture",
                "items": ["architecture/overview", "architecture/cqrs-pattern"]
            },
            "configuration",
            "schemas"
        ]
    }"#;

    const DOCS: &[&str] = &[
        "intro",
        "getting-started",
        "features/discord-commands",
        "features/rest-api",
        "features/ai-analysis",
        "architecture/overview",
        "architecture/cqrs-pattern",
        "configuration",
        "schemas",
    ];

    fn config_with_base(base_url: &str) -> SiteConfig {
        let env: EnvOverrides = [("BASE_URL", base_url)].into_iter().collect();
        SiteConfig::resolve(PartialSiteConfig::default(), &env).unwrap()
    }

    fn debrief_site() -> Site {
        Site::new(
            config_with_base("/debrief/"),
            DOCS.iter().copied().collect(),
            &parse_sidebars(SIDEBARS).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_doc_url_includes_base_and_route() {
        let site = debrief_site();

        assert_eq!(site.doc_url("features/rest-api"), "/debrief/docs/features/rest-api");
        assert_eq!(
            site.permalink("intro"),
            "https://jordanleeevans.github.io/debrief/docs/intro"
        );
    }

    #[test]
    fn test_doc_url_without_route_base_path() {
        let declared = PartialSiteConfig {
            docs: debrief_config::DocsConfig {
                route_base_path: "/".to_owned(),
                ..Default::default()
            },
            ..Default::default()
        };
        let config = SiteConfig::resolve(declared, &EnvOverrides::default()).unwrap();
        let site = Site::new(
            config,
            ["intro"].into_iter().collect(),
            &parse_sidebars(r#"{ "docsSidebar": ["intro"] }"#).unwrap(),
        )
        .unwrap();

        assert_eq!(site.doc_url("intro"), "/intro");
    }

    #[test]
    fn test_page_nav_inside_category() {
        let site = debrief_site();

        let page = site.page_nav("features/rest-api").unwrap();

        assert_eq!(page.url, "/debrief/docs/features/rest-api");
        assert_eq!(page.sidebar.as_deref(), Some("docsSidebar"));
        assert_eq!(
            page.previous,
            Some(DocLink {
                id: "features/discord-commands".to_owned(),
                url: "/debrief/docs/features/discord-commands".to_owned(),
            })
        );
        assert_eq!(page.next.unwrap().id, "features/ai-analysis");
        assert_eq!(page.breadcrumbs, ["Features"]);
        assert_eq!(
            page.edit_url.as_deref(),
            Some("https://github.com/jordanleeevans/debrief/tree/main/docs/features/rest-api.md")
        );
    }

    #[test]
    fn test_page_nav_crosses_category_boundaries() {
        let site = debrief_site();

        let page = site.page_nav("architecture/overview").unwrap();

        assert_eq!(page.previous.unwrap().id, "features/ai-analysis");
        assert_eq!(page.next.unwrap().id, "architecture/cqrs-pattern");
    }

    #[test]
    fn test_page_nav_at_ends() {
        let site = debrief_site();

        assert!(site.page_nav("intro").unwrap().previous.is_none());
        assert!(site.page_nav("schemas").unwrap().next.is_none());
    }

    #[test]
    fn test_page_nav_unknown_doc() {
        let site = debrief_site();

        assert!(site.page_nav("missing").is_none());
    }

    #[test]
    fn test_page_nav_unlisted_doc() {
        let mut docs: DocIndex = DOCS.iter().copied().collect();
        docs.insert("changelog");
        let site = Site::new(
            config_with_base("/"),
            docs,
            &parse_sidebars(SIDEBARS).unwrap(),
        )
        .unwrap();

        let page = site.page_nav("changelog").unwrap();

        assert_eq!(page.url, "/docs/changelog");
        assert!(page.sidebar.is_none());
        assert!(page.previous.is_none());
        assert!(page.next.is_none());
        assert!(page.breadcrumbs.is_empty());
        assert_eq!(site.unlisted_docs(), ["changelog"]);
    }

    #[test]
    fn test_invalid_sidebar_is_fatal() {
        let docs: DocIndex = ["intro"].into_iter().collect();

        let err = Site::new(config_with_base("/"), docs, &parse_sidebars(SIDEBARS).unwrap())
            .unwrap_err();

        let SiteError::Sidebar(sidebar_err) = &err else {
            panic!("Expected SiteError::Sidebar, got {err:?}");
        };
        assert_eq!(sidebar_err.sidebar, "docsSidebar");
        assert_eq!(
            sidebar_err.source,
            NavError::UnknownDocId("getting-started".to_owned())
        );
    }

    #[test]
    fn test_navbar_unknown_sidebar_fails() {
        let err = Site::new(
            config_with_base("/"),
            ["intro"].into_iter().collect(),
            &parse_sidebars(r#"{ "otherSidebar": ["intro"] }"#).unwrap(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SiteError::UnknownSidebar { sidebar_id, .. } if sidebar_id == "docsSidebar"
        ));
    }

    #[test]
    fn test_navbar_empty_sidebar_fails() {
        let err = Site::new(
            config_with_base("/"),
            DocIndex::new(),
            &parse_sidebars(r#"{ "docsSidebar": [] }"#).unwrap(),
        )
        .unwrap_err();

        assert!(matches!(err, SiteError::EmptySidebar { .. }));
    }

    #[test]
    fn test_navbar_links_resolved() {
        let site = debrief_site();

        let links = site.navbar_links();

        assert_eq!(
            links,
            [
                NavbarLink {
                    label: "Docs".to_owned(),
                    href: "/debrief/docs/intro".to_owned(),
                    position: NavbarPosition::Left,
                },
                NavbarLink {
                    label: "GitHub".to_owned(),
                    href: "https://github.com/jordanleeevans/debrief".to_owned(),
                    position: NavbarPosition::Right,
                },
            ]
        );
    }

    #[test]
    fn test_page_nav_serialization() {
        let site = debrief_site();

        let json = serde_json::to_value(site.page_nav("intro").unwrap()).unwrap();

        assert_eq!(json["id"], "intro");
        assert_eq!(json["sidebar"], "docsSidebar");
        assert!(json["previous"].is_null());
        assert_eq!(json["next"]["url"], "/debrief/docs/getting-started");
        assert!(json.get("breadcrumbs").is_none());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("debrief.toml"), "base_url = \"/debrief/\"\n").unwrap();
        std::fs::write(dir.path().join("sidebars.json"), SIDEBARS).unwrap();
        for id in DOCS {
            let path = dir.path().join("docs").join(format!("{id}.md"));
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, "# Doc\n").unwrap();
        }
        let config_path = dir.path().join("debrief.toml");
        let config = Config::load(Some(config_path.as_path()), &EnvOverrides::default()).unwrap();

        let site = Site::load(&config).unwrap();

        assert_eq!(site.docs().len(), DOCS.len());
        assert_eq!(
            site.sidebar("docsSidebar").unwrap().linear_order().as_slice(),
            DOCS
        );
        assert!(site.unlisted_docs().is_empty());
    }

    #[test]
    fn test_load_missing_sidebars_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_declaration(
            PartialSiteConfig::default(),
            &EnvOverrides::default(),
            dir.path().to_path_buf(),
        )
        .unwrap();

        let err = Site::load(&config).unwrap_err();

        assert!(matches!(err, SiteError::SidebarsNotFound(_)));
    }

    #[test]
    fn test_load_malformed_sidebars_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sidebars.json"), "[\"intro\"]").unwrap();
        let config = Config::from_declaration(
            PartialSiteConfig::default(),
            &EnvOverrides::default(),
            dir.path().to_path_buf(),
        )
        .unwrap();

        let err = Site::load(&config).unwrap_err();

        assert!(matches!(err, SiteError::Parse { .. }));
        assert!(err.to_string().contains("sidebars.json"));
    }
}
