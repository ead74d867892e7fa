//! reelsite Core Library
//!
//! Site input model, configuration, and error handling for the reelsite
//! website generator.

pub mod config;
pub mod error;
pub mod site;

pub use config::Config;
pub use error::{CoreError, Result};
pub use site::{
    Content, DeploymentType, DesignSystem, Game, Images, SiteInput, is_valid_slug,
    slugify,
};
