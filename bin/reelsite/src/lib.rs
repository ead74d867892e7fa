//! reelsite CLI Library
//!
//! Command implementations for the reelsite binary, exposed as a library so
//! they can be driven from integration tests.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check, new)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use reelsite::cmd;
//!
//! # async fn demo() -> color_eyre::eyre::Result<()> {
//! cmd::build::run(
//!     Path::new("reelsite.toml"),
//!     Path::new("site.json"),
//!     None,
//!     None,
//!     None,
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

pub mod cmd;

pub use reelsite_core::{Config, SiteInput};
pub use reelsite_generator::{BuildStats, WebsiteBuilder};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
