//! `debrief nav` command implementation.

use std::path::PathBuf;

use clap::Args;
use debrief_site::Site;
use serde_json::json;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Path to configuration file (default: auto-discover debrief.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only print this sidebar.
    #[arg(short, long, conflicts_with = "doc")]
    sidebar: Option<String>,

    /// Print page navigation (URL, previous/next, breadcrumbs) for a document.
    #[arg(short, long)]
    doc: Option<String>,

    /// Print reading order instead of the tree.
    #[arg(long, conflicts_with = "doc")]
    order: bool,

    /// Enable info-level logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site definition is invalid or the requested
    /// sidebar or document does not exist.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = super::load_site(self.config.as_deref())?;
        output.data(&self.render(&site)?);
        Ok(())
    }

    /// Render the requested navigation as pretty-printed JSON.
    fn render(&self, site: &Site) -> Result<String, CliError> {
        let value = if let Some(doc) = &self.doc {
            let page = site
                .page_nav(doc)
                .ok_or_else(|| CliError::Validation(format!("Unknown document: {doc}")))?;
            serde_json::to_value(page)?
        } else {
            let trees = match &self.sidebar {
                Some(id) => vec![
                    site.sidebar(id)
                        .ok_or_else(|| CliError::Validation(format!("Unknown sidebar: {id}")))?,
                ],
                None => site.sidebars().iter().collect(),
            };
            if self.order {
                let orders: serde_json::Map<_, _> = trees
                    .into_iter()
                    .map(|tree| (tree.id().to_owned(), json!(tree.linear_order())))
                    .collect();
                serde_json::Value::Object(orders)
            } else {
                json!({
                    "site": site.config(),
                    "navbar": site.navbar_links(),
                    "sidebars": trees,
                })
            }
        };
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
