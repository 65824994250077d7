//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod nav;

use std::path::Path;

use debrief_config::{Config, EnvOverrides};
use debrief_site::Site;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use nav::NavArgs;

/// Load configuration and build the site model.
///
/// The process environment is captured once here and used for every override.
fn load_site(config_path: Option<&Path>) -> Result<Site, CliError> {
    let env = EnvOverrides::from_env();
    let config = Config::load(config_path, &env)?;
    Ok(Site::load(&config)?)
}
