//! Site configuration for Debrief.
//!
//! Parses `debrief.toml` declarations with serde, overlays environment
//! overrides, and validates the result into an immutable [`SiteConfig`].
//! Config files are auto-discovered in the current directory and its parents.
//!
//! ## Environment Overrides
//!
//! Overrides come from an [`EnvOverrides`] table captured once at startup.
//! The only recognized key is `BASE_URL`, which replaces `base_url` verbatim.
//! Structural fields (`i18n`, `navbar`, `footer`) never accept overrides.
//!
//! ## Variable Expansion
//!
//! String values of `url` and `docs.edit_url` support expansion against the
//! same table:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "debrief.toml";

/// Environment key that replaces the declared `base_url`.
pub const BASE_URL_ENV: &str = "BASE_URL";

/// Environment table consulted during resolution.
///
/// Captured once (see [`EnvOverrides::from_env`]) so that resolution is a
/// pure function of the declaration and this table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    vars: BTreeMap<String, String>,
}

impl EnvOverrides {
    /// Snapshot the process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    /// Look up a variable.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Look up a variable, treating an empty value as unset.
    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvOverrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// What to do when a link cannot be resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokenLinkPolicy {
    /// Abort the build.
    Throw,
    /// Log a warning and continue.
    Warn,
    /// Continue silently.
    Ignore,
}

impl BrokenLinkPolicy {
    /// Parse a declared policy value for `field`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPolicyValue` unless `value` is one of
    /// `throw`, `warn` or `ignore`.
    pub fn parse(value: &str, field: &str) -> Result<Self, ConfigError> {
        match value {
            "throw" => Ok(Self::Throw),
            "warn" => Ok(Self::Warn),
            "ignore" => Ok(Self::Ignore),
            _ => Err(ConfigError::InvalidPolicyValue {
                field: field.to_owned(),
                value: value.to_owned(),
            }),
        }
    }

    /// Policy name as written in the declaration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Throw => "throw",
            Self::Warn => "warn",
            Self::Ignore => "ignore",
        }
    }
}

impl fmt::Display for BrokenLinkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared site configuration as parsed from TOML.
///
/// Every field carries a compiled-in default, so an empty file (or no file
/// at all) declares the stock Debrief site.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PartialSiteConfig {
    pub title: String,
    pub tagline: String,
    /// Site origin, without the base path.
    pub url: String,
    pub base_url: String,
    pub favicon: String,
    pub organization_name: String,
    pub project_name: String,
    /// Policy for broken links between pages and navigation entries.
    pub on_broken_links: String,
    /// Policy for broken links inside markdown content.
    pub on_broken_markdown_links: String,
    pub i18n: I18nConfig,
    pub docs: DocsConfig,
    pub navbar: NavbarConfig,
    pub footer: FooterConfig,
}

impl Default for PartialSiteConfig {
    fn default() -> Self {
        Self {
            title: "Debrief".to_owned(),
            tagline: "A Discord bot powered by Gemini AI for Call of Duty game stats analysis"
                .to_owned(),
            url: "https://jordanleeevans.github.io".to_owned(),
            base_url: "/".to_owned(),
            favicon: "img/favicon.ico".to_owned(),
            organization_name: "jordanleeevans".to_owned(),
            project_name: "debrief".to_owned(),
            on_broken_links: "throw".to_owned(),
            on_broken_markdown_links: "warn".to_owned(),
            i18n: I18nConfig::default(),
            docs: DocsConfig::default(),
            navbar: NavbarConfig::default(),
            footer: FooterConfig::default(),
        }
    }
}

impl PartialSiteConfig {
    /// Parse a declaration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed or has wrong types.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Locale configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct I18nConfig {
    pub default_locale: String,
    pub locales: Vec<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_owned(),
            locales: vec!["en".to_owned()],
        }
    }
}

/// Documentation source settings.
///
/// Paths are relative to the directory holding the config file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Directory containing markdown documents.
    pub source_dir: PathBuf,
    /// JSON file declaring the sidebars.
    pub sidebar_path: PathBuf,
    /// URL segment under `base_url` where docs are served.
    pub route_base_path: String,
    /// Prefix for "edit this page" links.
    pub edit_url: Option<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("docs"),
            sidebar_path: PathBuf::from("sidebars.json"),
            route_base_path: "docs".to_owned(),
            edit_url: Some("https://github.com/jordanleeevans/debrief/tree/main/docs/".to_owned()),
        }
    }
}

/// Horizontal placement of a navbar item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavbarPosition {
    #[default]
    Left,
    Right,
}

/// Value of the `type` key on a sidebar navbar item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum NavbarItemKind {
    #[serde(rename = "docSidebar")]
    DocSidebar,
}

/// Navbar item: either a link to a sidebar's first document or an external link.
///
/// Unknown keys are rejected, so an item cannot declare both `sidebar_id`
/// and `href`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum NavbarItem {
    DocSidebar {
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        kind: Option<NavbarItemKind>,
        sidebar_id: String,
        label: String,
        #[serde(default)]
        position: NavbarPosition,
    },
    Link {
        href: String,
        label: String,
        #[serde(default)]
        position: NavbarPosition,
    },
}

impl NavbarItem {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::DocSidebar { label, .. } | Self::Link { label, .. } => label,
        }
    }
}

/// Navbar configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub title: String,
    pub items: Vec<NavbarItem>,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            title: "Debrief".to_owned(),
            items: vec![
                NavbarItem::DocSidebar {
                    kind: Some(NavbarItemKind::DocSidebar),
                    sidebar_id: "docsSidebar".to_owned(),
                    label: "Docs".to_owned(),
                    position: NavbarPosition::Left,
                },
                NavbarItem::Link {
                    href: "https://github.com/jordanleeevans/debrief".to_owned(),
                    label: "GitHub".to_owned(),
                    position: NavbarPosition::Right,
                },
            ],
        }
    }
}

/// Footer color scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    #[default]
    Dark,
    Light,
}

/// Footer link. Exactly one of `to` (site path) and `href` (external URL) is set.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FooterLink {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl FooterLink {
    fn internal(label: &str, to: &str) -> Self {
        Self {
            label: label.to_owned(),
            to: Some(to.to_owned()),
            href: None,
        }
    }

    fn external(label: &str, href: &str) -> Self {
        Self {
            label: label.to_owned(),
            to: None,
            href: Some(href.to_owned()),
        }
    }
}

/// Titled column of footer links.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FooterColumn {
    pub title: String,
    #[serde(default)]
    pub items: Vec<FooterLink>,
}

/// Footer configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FooterConfig {
    pub style: FooterStyle,
    pub links: Vec<FooterColumn>,
    pub copyright: Option<String>,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            style: FooterStyle::Dark,
            links: vec![
                FooterColumn {
                    title: "Documentation".to_owned(),
                    items: vec![
                        FooterLink::internal("Getting Started", "/docs/getting-started"),
                        FooterLink::internal("Architecture", "/docs/architecture/overview"),
                    ],
                },
                FooterColumn {
                    title: "More".to_owned(),
                    items: vec![FooterLink::external(
                        "GitHub",
                        "https://github.com/jordanleeevans/debrief",
                    )],
                },
            ],
            copyright: Some("Copyright © Debrief. Built with Docusaurus.".to_owned()),
        }
    }
}

/// Resolved, validated site configuration.
///
/// Only obtainable through [`SiteConfig::resolve`], so every instance
/// satisfies the checks performed there. Immutable after construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    title: String,
    tagline: String,
    url: String,
    base_url: String,
    favicon: String,
    organization_name: String,
    project_name: String,
    locales: Vec<String>,
    default_locale: String,
    on_broken_links: BrokenLinkPolicy,
    on_broken_markdown_links: BrokenLinkPolicy,
    docs: DocsConfig,
    navbar: NavbarConfig,
    footer: FooterConfig,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.edit_url`").
        field: String,
        /// Error message (e.g., "${`REPO`} not set").
        message: String,
    },
    /// `base_url` is empty or not wrapped in `/`.
    #[error("Invalid base_url {0:?}: must start and end with '/'")]
    InvalidBaseUrl(String),
    /// `i18n.default_locale` is missing from `i18n.locales`.
    #[error("Default locale {default_locale:?} is not declared in i18n.locales {locales:?}")]
    DefaultLocaleNotDeclared {
        default_locale: String,
        locales: Vec<String>,
    },
    /// A locale is listed twice in `i18n.locales`.
    #[error("Duplicate locale {0:?} in i18n.locales")]
    DuplicateLocale(String),
    /// A broken-link policy is not one of `throw`, `warn`, `ignore`.
    #[error("Invalid value {value:?} for {field}: expected one of throw, warn, ignore")]
    InvalidPolicyValue { field: String, value: String },
    /// Other validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    if base_url.is_empty() || !base_url.starts_with('/') || !base_url.ends_with('/') {
        return Err(ConfigError::InvalidBaseUrl(base_url.to_owned()));
    }
    Ok(())
}

fn validate_locales(i18n: &I18nConfig) -> Result<(), ConfigError> {
    if !i18n.locales.contains(&i18n.default_locale) {
        return Err(ConfigError::DefaultLocaleNotDeclared {
            default_locale: i18n.default_locale.clone(),
            locales: i18n.locales.clone(),
        });
    }
    for (idx, locale) in i18n.locales.iter().enumerate() {
        if i18n.locales[..idx].contains(locale) {
            return Err(ConfigError::DuplicateLocale(locale.clone()));
        }
    }
    Ok(())
}

fn validate_navbar(navbar: &NavbarConfig) -> Result<(), ConfigError> {
    for item in &navbar.items {
        require_non_empty(item.label(), "navbar.items.label")?;
        match item {
            NavbarItem::DocSidebar { sidebar_id, .. } => {
                require_non_empty(sidebar_id, "navbar.items.sidebar_id")?;
            }
            NavbarItem::Link { href, .. } => require_http_url(href, "navbar.items.href")?,
        }
    }
    Ok(())
}

fn validate_footer(footer: &FooterConfig) -> Result<(), ConfigError> {
    for link in footer.links.iter().flat_map(|column| &column.items) {
        match (&link.to, &link.href) {
            (Some(to), None) if to.starts_with('/') => {}
            (Some(_), None) => {
                return Err(ConfigError::Validation(format!(
                    "footer link {:?}: `to` must be a site path starting with '/'",
                    link.label
                )));
            }
            (None, Some(href)) => require_http_url(href, "footer.links.items.href")?,
            _ => {
                return Err(ConfigError::Validation(format!(
                    "footer link {:?} must set exactly one of `to` or `href`",
                    link.label
                )));
            }
        }
    }
    Ok(())
}

impl SiteConfig {
    /// Resolve a declaration against an environment table.
    ///
    /// `BASE_URL` (when set and non-empty) replaces the declared `base_url`;
    /// `${VAR}` references in `url` and `docs.edit_url` are expanded. All
    /// validation runs before any value is returned.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure: `InvalidBaseUrl`,
    /// `DuplicateLocale`, `DefaultLocaleNotDeclared`, `InvalidPolicyValue`,
    /// `EnvVar` for unresolvable references, or `Validation` for malformed
    /// navbar/footer entries.
    pub fn resolve(declared: PartialSiteConfig, env: &EnvOverrides) -> Result<Self, ConfigError> {
        let PartialSiteConfig {
            title,
            tagline,
            url,
            mut base_url,
            favicon,
            organization_name,
            project_name,
            on_broken_links,
            on_broken_markdown_links,
            i18n,
            mut docs,
            navbar,
            footer,
        } = declared;

        if let Some(value) = env.non_empty(BASE_URL_ENV) {
            tracing::debug!(base_url = value, "Applying {BASE_URL_ENV} override");
            value.clone_into(&mut base_url);
        }

        let url = expand::expand_env(&url, "url", env)?;
        if let Some(edit_url) = docs.edit_url.take() {
            docs.edit_url = Some(expand::expand_env(&edit_url, "docs.edit_url", env)?);
        }

        require_non_empty(&title, "title")?;
        require_http_url(&url, "url")?;
        validate_base_url(&base_url)?;
        validate_locales(&i18n)?;
        let on_broken_links = BrokenLinkPolicy::parse(&on_broken_links, "on_broken_links")?;
        let on_broken_markdown_links =
            BrokenLinkPolicy::parse(&on_broken_markdown_links, "on_broken_markdown_links")?;
        if let Some(edit_url) = &docs.edit_url {
            require_http_url(edit_url, "docs.edit_url")?;
        }
        validate_navbar(&navbar)?;
        validate_footer(&footer)?;

        Ok(Self {
            title,
            tagline,
            url,
            base_url,
            favicon,
            organization_name,
            project_name,
            locales: i18n.locales,
            default_locale: i18n.default_locale,
            on_broken_links,
            on_broken_markdown_links,
            docs,
            navbar,
            footer,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn tagline(&self) -> &str {
        &self.tagline
    }

    /// Site origin (e.g., `https://jordanleeevans.github.io`).
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Path prefix the site is served under. Always starts and ends with `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn favicon(&self) -> &str {
        &self.favicon
    }

    #[must_use]
    pub fn organization_name(&self) -> &str {
        &self.organization_name
    }

    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Declared locales, in declaration order. Never empty.
    #[must_use]
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// Default locale. Always a member of [`SiteConfig::locales`].
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    #[must_use]
    pub fn on_broken_links(&self) -> BrokenLinkPolicy {
        self.on_broken_links
    }

    #[must_use]
    pub fn on_broken_markdown_links(&self) -> BrokenLinkPolicy {
        self.on_broken_markdown_links
    }

    #[must_use]
    pub fn docs(&self) -> &DocsConfig {
        &self.docs
    }

    #[must_use]
    pub fn navbar(&self) -> &NavbarConfig {
        &self.navbar
    }

    #[must_use]
    pub fn footer(&self) -> &FooterConfig {
        &self.footer
    }
}

/// Loaded configuration: the resolved site plus where it came from.
#[derive(Debug)]
pub struct Config {
    /// Resolved site configuration.
    pub site: SiteConfig,
    /// Path to the config file, `None` when running on defaults.
    pub config_path: Option<PathBuf>,
    /// Directory that relative paths in the declaration are resolved against.
    root_dir: PathBuf,
}

impl Config {
    /// Load and resolve configuration.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `debrief.toml` in current directory and parents,
    /// falling back to the compiled-in defaults rooted at the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the declaration does not resolve.
    pub fn load(config_path: Option<&Path>, env: &EnvOverrides) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path, env)
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered, env)
        } else {
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            let cwd = std::env::current_dir()?;
            Self::from_declaration(PartialSiteConfig::default(), env, cwd)
        }
    }

    /// Resolve a declaration with relative paths rooted at `root_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if the declaration does not resolve.
    pub fn from_declaration(
        declared: PartialSiteConfig,
        env: &EnvOverrides,
        root_dir: PathBuf,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            site: SiteConfig::resolve(declared, env)?,
            config_path: None,
            root_dir,
        })
    }

    /// Absolute documentation source directory.
    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        self.root_dir.join(&self.site.docs().source_dir)
    }

    /// Absolute path of the sidebars declaration.
    #[must_use]
    pub fn sidebar_path(&self) -> PathBuf {
        self.root_dir.join(&self.site.docs().sidebar_path)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path, env: &EnvOverrides) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let declared = PartialSiteConfig::from_toml(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        let mut config = Self::from_declaration(declared, env, config_dir)?;
        config.config_path = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            title = config.site.title(),
            base_url = config.site.base_url(),
            "Loaded site configuration"
        );
        Ok(config)
    }
}
