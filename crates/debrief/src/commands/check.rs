//! `debrief check` command implementation.

use std::path::PathBuf;

use clap::Args;
use debrief_site::Site;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover debrief.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail if a document is not listed in any sidebar.
    #[arg(long)]
    strict: bool,

    /// Enable info-level logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site definition is invalid, or under
    /// `--strict` if any document is missing from every sidebar.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = super::load_site(self.config.as_deref())?;

        print_summary(&site, &output);

        let unlisted = site.unlisted_docs();
        for id in &unlisted {
            output.warning(&format!("Not in any sidebar: {id}"));
        }
        ensure_listed(&unlisted, self.strict)?;

        output.success("Site definition is valid");
        Ok(())
    }
}

/// Reject unlisted documents when `strict` is set.
fn ensure_listed(unlisted: &[&str], strict: bool) -> Result<(), CliError> {
    if strict && !unlisted.is_empty() {
        return Err(CliError::Validation(format!(
            "{} document(s) not listed in any sidebar",
            unlisted.len()
        )));
    }
    Ok(())
}

fn print_summary(site: &Site, output: &Output) {
    let config = site.config();
    output.heading(config.title());
    output.field("URL", &format!("{}{}", config.url(), config.base_url()));
    output.field(
        "Locales",
        &format!(
            "{} (default: {})",
            config.locales().join(", "),
            config.default_locale()
        ),
    );
    output.field(
        "Broken links",
        &format!(
            "{} (markdown: {})",
            config.on_broken_links(),
            config.on_broken_markdown_links()
        ),
    );
    output.field("Documents", &site.docs().len().to_string());
    for tree in site.sidebars().iter() {
        output.field(
            &format!("Sidebar {}", tree.id()),
            &format!("{} document(s)", tree.linear_order().len()),
        );
    }
}
