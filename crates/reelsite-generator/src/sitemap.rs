//! Sitemap generation.
//!
//! Generates `sitemap.xml` with the fixed site pages plus one entry per game.

use chrono::NaiveDate;
use reelsite_core::{Config, Game};
use tracing::debug;

use crate::{
    layout::{Layout, Route},
    xml::XmlElement,
};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Change frequency for sitemap entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

/// A sitemap URL entry.
#[derive(Debug, Clone)]
pub struct SitemapUrl {
    /// URL location.
    pub loc: String,

    /// Last modification date.
    pub lastmod: Option<NaiveDate>,

    /// Change frequency.
    pub changefreq: ChangeFreq,

    /// Priority (0.0 to 1.0).
    pub priority: f32,
}

impl SitemapUrl {
    fn to_element(&self) -> XmlElement {
        let mut url = XmlElement::new("url").child(XmlElement::leaf("loc", &self.loc));
        if let Some(lastmod) = self.lastmod {
            url.push(XmlElement::leaf(
                "lastmod",
                lastmod.format("%Y-%m-%d").to_string(),
            ));
        }
        url.child(XmlElement::leaf("changefreq", self.changefreq.as_str()))
            .child(XmlElement::leaf("priority", format!("{:.1}", self.priority)))
    }
}

/// Sitemap generator.
#[derive(Debug)]
pub struct SitemapGenerator<'a> {
    config: &'a Config,
    layout: Layout,
}

impl<'a> SitemapGenerator<'a> {
    /// Create a new sitemap generator.
    #[must_use]
    pub fn new(config: &'a Config, layout: Layout) -> Self {
        Self { config, layout }
    }

    /// Sitemap entries: home, games and about, then one per game.
    #[must_use]
    pub fn urls(&self, games: &[Game], lastmod: Option<NaiveDate>) -> Vec<SitemapUrl> {
        let entry = |route: Route, changefreq, priority| SitemapUrl {
            loc: self.config.url_for(&self.layout.href(&route)),
            lastmod,
            changefreq,
            priority,
        };

        let mut urls = vec![
            entry(Route::Home, ChangeFreq::Daily, 1.0),
            entry(Route::Games, ChangeFreq::Weekly, 0.8),
            entry(Route::About, ChangeFreq::Monthly, 0.6),
        ];
        urls.extend(
            games
                .iter()
                .map(|game| entry(Route::Game(game.slug.clone()), ChangeFreq::Monthly, 0.7)),
        );
        urls
    }

    /// Generate sitemap XML.
    #[must_use]
    pub fn generate(&self, games: &[Game], lastmod: Option<NaiveDate>) -> String {
        let urls = self.urls(games, lastmod);
        debug!(count = urls.len(), "generating sitemap");

        urls.iter()
            .fold(XmlElement::new("urlset").attr("xmlns", SITEMAP_NS), |set, url| {
                set.child(url.to_element())
            })
            .to_document()
    }
}

#[cfg(test)]
mod tests {
    use reelsite_core::DeploymentType;

    use super::*;
    use crate::pages::tests::games;

    #[test]
    fn test_one_entry_per_game_plus_fixed_pages() {
        let config = Config::default();
        let generator = SitemapGenerator::new(&config, Layout::new(DeploymentType::Standard));

        for n in [0, 1, 7] {
            let xml = generator.generate(&games(n), None);
            assert_eq!(xml.matches("<url>").count(), n + 3, "n = {n}");
        }
    }

    #[test]
    fn test_standard_locations() {
        let mut config = Config::default();
        config.site.base_url = "https://lucky.example".to_string();
        let generator = SitemapGenerator::new(&config, Layout::new(DeploymentType::Standard));

        let xml = generator.generate(&games(1), NaiveDate::from_ymd_opt(2026, 10, 19));

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#));
        assert!(xml.contains("<loc>https://lucky.example/</loc>"));
        assert!(xml.contains("<loc>https://lucky.example/games.html</loc>"));
        assert!(xml.contains("<loc>https://lucky.example/about.html</loc>"));
        assert!(xml.contains("<loc>https://lucky.example/games/game-0.html</loc>"));
        assert!(xml.contains("<lastmod>2026-10-19</lastmod>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
    }

    #[test]
    fn test_traffic_armor_locations() {
        let config = Config::default();
        let generator = SitemapGenerator::new(&config, Layout::new(DeploymentType::TrafficArmor));

        let urls = generator.urls(&games(1), None);
        let locs: Vec<_> = urls.iter().map(|u| u.loc.as_str()).collect();
        assert_eq!(locs, ["/", "/games.php", "/about.php", "/games/game-0/"]);
        assert!(urls.iter().all(|u| u.lastmod.is_none()));
    }

    #[test]
    fn test_locations_are_escaped() {
        let config = Config::default();
        let generator = SitemapGenerator::new(&config, Layout::new(DeploymentType::Standard));
        let mut list = games(1);
        list[0].slug = "cash&carry".to_string();

        let xml = generator.generate(&list, None);
        assert!(xml.contains("<loc>/games/cash&amp;carry.html</loc>"));
    }
}
