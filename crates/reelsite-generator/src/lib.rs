//! reelsite Generator Library
//!
//! Static site generation engine for social casino websites.
//!
//! # Modules
//!
//! - [`template`] - HTML template registry with variable interpolation
//! - [`layout`] - Route to output path and href mapping per deployment type
//! - [`pages`] - Typed page records and game selection
//! - [`html`] - HTML generation from page records
//! - [`css`] - Structured stylesheet seeded from the design system
//! - [`script`] - Client-side script
//! - [`download`] - Remote image downloads
//! - [`xml`] - XML element tree
//! - [`sitemap`] - XML sitemap generation
//! - [`robots`] - robots.txt generation
//! - [`manifest`] - Web app manifest
//! - [`build`] - Build orchestration

pub mod build;
pub mod css;
pub mod download;
pub mod html;
pub mod layout;
pub mod manifest;
pub mod pages;
pub mod robots;
pub mod script;
pub mod sitemap;
pub mod template;
pub mod xml;

pub use build::{BuildError, BuildStats, SkippedDownload, WebsiteBuilder};
pub use download::Downloader;
pub use html::HtmlGenerator;
pub use layout::{Layout, Route};
pub use pages::LegalKind;
pub use robots::RobotsGenerator;
pub use sitemap::SitemapGenerator;
pub use template::{Template, TemplateContext, TemplateRegistry};
