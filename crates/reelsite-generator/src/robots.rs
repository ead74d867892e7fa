//! Robots.txt generation.
//!
//! Generates the robots.txt file for search engine crawlers.

use std::fmt::Write as _;

use reelsite_core::Config;

/// Robots.txt generator.
#[derive(Debug)]
pub struct RobotsGenerator<'a> {
    config: &'a Config,
}

impl<'a> RobotsGenerator<'a> {
    /// Create a new robots generator.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Generate robots.txt content.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut out = String::from("User-agent: *\n");

        for path in &self.config.robots.disallow {
            let _ = writeln!(out, "Disallow: {path}");
        }

        for path in &self.config.robots.allow {
            let _ = writeln!(out, "Allow: {path}");
        }

        let _ = writeln!(out, "\nSitemap: {}", self.config.url_for("/sitemap.xml"));
        out
    }
}
