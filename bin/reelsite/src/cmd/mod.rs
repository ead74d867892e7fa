//! CLI command implementations.

pub mod build;
pub mod check;
pub mod new;

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use reelsite_core::Config;

/// Load the configuration file, falling back to defaults when it is absent.
///
/// `REELSITE__SECTION__KEY` environment variables override file values.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!(?path, "no configuration file, using defaults");
    }
    Config::load_with_env(path)
        .wrap_err_with(|| format!("Failed to load configuration from {}", path.display()))
}
