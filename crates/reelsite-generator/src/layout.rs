//! Output layout.
//!
//! Maps each page route to the file it is written to and the root-relative
//! href other pages link to, according to the deployment type.

use std::path::{Path, PathBuf};

use reelsite_core::DeploymentType;

use crate::pages::LegalKind;

/// A page of the generated site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Games,
    /// Game detail page, keyed by slug.
    Game(String),
    About,
    Legal(LegalKind),
}

impl Route {
    /// File stem of a page living at the site root.
    fn root_stem(&self) -> Option<&'static str> {
        match self {
            Self::Home => Some("index"),
            Self::Games => Some("games"),
            Self::Game(_) => None,
            Self::About => Some("about"),
            Self::Legal(kind) => Some(kind.slug()),
        }
    }
}

/// Resolves routes for a deployment type.
///
/// Standard output is flat `.html` files. Traffic Armor output uses `.php`
/// files at the root and gives each game its own `games/<slug>/index.php`.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    deployment: DeploymentType,
}

impl Layout {
    #[must_use]
    pub fn new(deployment: DeploymentType) -> Self {
        Self { deployment }
    }

    fn extension(&self) -> &'static str {
        match self.deployment {
            DeploymentType::Standard => "html",
            DeploymentType::TrafficArmor => "php",
        }
    }

    /// File path relative to the output directory.
    #[must_use]
    pub fn output_path(&self, route: &Route) -> PathBuf {
        let ext = self.extension();
        match (route.root_stem(), route) {
            (Some(stem), _) => PathBuf::from(format!("{stem}.{ext}")),
            (None, Route::Game(slug)) if self.deployment == DeploymentType::TrafficArmor => {
                Path::new("games").join(slug).join(format!("index.{ext}"))
            }
            (None, Route::Game(slug)) => Path::new("games").join(format!("{slug}.{ext}")),
            (None, _) => PathBuf::from(format!("index.{ext}")),
        }
    }

    /// Root-relative URL of the page.
    #[must_use]
    pub fn href(&self, route: &Route) -> String {
        let ext = self.extension();
        match route {
            Route::Home => "/".to_string(),
            Route::Game(slug) if self.deployment == DeploymentType::TrafficArmor => {
                format!("/games/{slug}/")
            }
            Route::Game(slug) => format!("/games/{slug}.{ext}"),
            page => format!("/{}.{ext}", page.root_stem().unwrap_or("index")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_paths() {
        let layout = Layout::new(DeploymentType::Standard);

        assert_eq!(layout.output_path(&Route::Home), Path::new("index.html"));
        assert_eq!(layout.output_path(&Route::Games), Path::new("games.html"));
        assert_eq!(
            layout.output_path(&Route::Game("golden-fortune".into())),
            Path::new("games/golden-fortune.html")
        );
        assert_eq!(
            layout.output_path(&Route::Legal(LegalKind::Terms)),
            Path::new("terms.html")
        );
    }

    #[test]
    fn test_traffic_armor_paths() {
        let layout = Layout::new(DeploymentType::TrafficArmor);

        assert_eq!(layout.output_path(&Route::Home), Path::new("index.php"));
        assert_eq!(layout.output_path(&Route::Games), Path::new("games.php"));
        assert_eq!(
            layout.output_path(&Route::Game("golden-fortune".into())),
            Path::new("games/golden-fortune/index.php")
        );
        assert_eq!(layout.output_path(&Route::About), Path::new("about.php"));
        assert_eq!(
            layout.output_path(&Route::Legal(LegalKind::Contact)),
            Path::new("contact.php")
        );
    }

    #[test]
    fn test_game_pages_never_collide_with_listing() {
        for deployment in [DeploymentType::Standard, DeploymentType::TrafficArmor] {
            let layout = Layout::new(deployment);
            let listing = layout.output_path(&Route::Games);
            let game = layout.output_path(&Route::Game("games".into()));
            assert_ne!(listing, game, "{deployment}");
            assert!(game.starts_with("games"), "{deployment}");
        }
    }

    #[test]
    fn test_hrefs() {
        let standard = Layout::new(DeploymentType::Standard);
        let armor = Layout::new(DeploymentType::TrafficArmor);
        let game = Route::Game("neon-nights".into());

        assert_eq!(standard.href(&Route::Home), "/");
        assert_eq!(armor.href(&Route::Home), "/");
        assert_eq!(standard.href(&game), "/games/neon-nights.html");
        assert_eq!(armor.href(&game), "/games/neon-nights/");
        assert_eq!(armor.href(&Route::Games), "/games.php");
        assert_eq!(
            armor.href(&Route::Legal(LegalKind::Responsible)),
            "/responsible.php"
        );
        assert_eq!(standard.href(&Route::About), "/about.html");
    }
}
