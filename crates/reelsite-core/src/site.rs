//! Site input model.
//!
//! These records are produced upstream (content generation, game catalog)
//! and handed to the generator unchanged. They are read-only once loaded.

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Output layout for generated pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentType {
    /// Flat `.html` files.
    #[default]
    #[serde(alias = "noip")]
    Standard,
    /// `.php` files, with one directory per game holding an `index.php`.
    TrafficArmor,
}

impl DeploymentType {
    /// Configuration name of the deployment type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::TrafficArmor => "traffic_armor",
        }
    }
}

impl fmt::Display for DeploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "standard" | "noip" => Ok(Self::Standard),
            "traffic_armor" => Ok(Self::TrafficArmor),
            other => Err(CoreError::config(format!(
                "unknown deployment type: {other}"
            ))),
        }
    }
}

/// Everything the generator needs to build one website.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInput {
    pub content: Content,
    #[serde(default)]
    pub design_system: DesignSystem,
    #[serde(default)]
    pub images: Images,
    #[serde(default)]
    pub games: Vec<Game>,
}

impl SiteInput {
    /// Load a site input from a `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::input(path, "file not found"));
        }

        let raw = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let mut input: SiteInput = match ext.as_deref() {
            Some("json") => serde_json::from_str(&raw)?,
            Some("yaml" | "yml") => serde_yaml::from_str(&raw)?,
            _ => {
                return Err(CoreError::input(
                    path,
                    "unsupported extension, expected .json, .yaml or .yml",
                ));
            }
        };

        input.normalize();
        tracing::debug!(games = input.games.len(), path = %path.display(), "loaded site input");
        Ok(input)
    }

    /// Fill derived fields, currently game slugs.
    ///
    /// A slug that is missing or not a single path segment of word
    /// characters and hyphens is rebuilt from the slug itself, then the
    /// name, then the id. When all three slugify to nothing the game gets
    /// `game-<position>`.
    pub fn normalize(&mut self) {
        for (index, game) in self.games.iter_mut().enumerate() {
            if is_valid_slug(&game.slug) {
                continue;
            }

            let slug = [&game.slug, &game.name, &game.id]
                .into_iter()
                .map(|text| slugify(text))
                .find(|s| !s.is_empty())
                .unwrap_or_else(|| format!("game-{}", index + 1));

            if !game.slug.trim().is_empty() {
                tracing::warn!(
                    id = %game.id,
                    from = %game.slug,
                    to = %slug,
                    "replaced unsafe game slug"
                );
            }
            game.slug = slug;
        }
    }
}

/// Site copy, keyed by page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub site_name: String,
    #[serde(default)]
    pub site_tagline: Option<String>,
    pub pages: Pages,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pages {
    pub homepage: HomepageCopy,
    pub about: AboutCopy,
    #[serde(default)]
    pub legal: LegalCopy,
    #[serde(default)]
    pub contact: ContactCopy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomepageCopy {
    pub hero: Hero,
    pub about: Section,
    #[serde(default)]
    pub features: Vec<Feature>,
    pub cta: CallToAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub headline: String,
    pub subheadline: String,
}

/// A titled block of prose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToAction {
    pub text: String,
    pub button: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutCopy {
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Optional copy for the legal pages. Missing entries get generic text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegalCopy {
    #[serde(default)]
    pub terms: Option<Section>,
    #[serde(default)]
    pub privacy: Option<Section>,
    #[serde(default)]
    pub responsible: Option<Section>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactCopy {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Color, typography and gradient palette applied through CSS variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignSystem {
    #[serde(default)]
    pub colors: Palette,
    #[serde(default)]
    pub typography: Typography,
    #[serde(default = "default_gradients")]
    pub gradients: Vec<String>,
}

impl Default for DesignSystem {
    fn default() -> Self {
        Self {
            colors: Palette::default(),
            typography: Typography::default(),
            gradients: default_gradients(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text_primary: String,
    pub text_secondary: String,
    pub success: String,
    pub warning: String,
    pub error: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: "#1a1a2e".to_string(),
            secondary: "#16213e".to_string(),
            accent: "#ffd700".to_string(),
            background: "#0f0f23".to_string(),
            surface: "#1e1e3f".to_string(),
            text_primary: "#ffffff".to_string(),
            text_secondary: "#b0b0b0".to_string(),
            success: "#2ed573".to_string(),
            warning: "#ffa726".to_string(),
            error: "#e94560".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Typography {
    pub heading_font: String,
    pub body_font: String,
    #[serde(default = "default_heading_weight")]
    pub heading_weight: String,
    #[serde(default = "default_body_weight")]
    pub body_weight: String,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            heading_font: "Montserrat".to_string(),
            body_font: "Open Sans".to_string(),
            heading_weight: default_heading_weight(),
            body_weight: default_body_weight(),
        }
    }
}

fn default_heading_weight() -> String {
    "600".to_string()
}

fn default_body_weight() -> String {
    "400".to_string()
}

fn default_gradients() -> Vec<String> {
    vec![
        "linear-gradient(135deg, #1a1a2e, #16213e)".to_string(),
        "linear-gradient(45deg, #ffd700, #ffed4a)".to_string(),
    ]
}

/// A catalog game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    /// Path of a thumbnail already stored under the output directory.
    #[serde(default)]
    pub local_thumbnail: Option<String>,
    #[serde(default)]
    pub demo_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rtp: Option<String>,
    #[serde(default)]
    pub volatility: Option<String>,
}

fn default_provider() -> String {
    "Unknown".to_string()
}

fn default_category() -> String {
    "slots".to_string()
}

impl Game {
    /// Thumbnail source, preferring the local copy.
    #[must_use]
    pub fn thumbnail_src(&self) -> &str {
        self.local_thumbnail.as_deref().unwrap_or(&self.thumbnail)
    }
}

/// Remote images fetched once into the output directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Images {
    #[serde(default)]
    pub hero_url: Option<String>,
    #[serde(default)]
    pub favicon_url: Option<String>,
}

/// Convert text to a URL-friendly slug.
///
/// Lowercases, drops anything that is not a word character, whitespace or
/// hyphen, then collapses whitespace/hyphen runs into a single hyphen.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_dash = true;
        }
    }

    slug
}

/// Whether `slug` is usable as a single output path segment.
///
/// Non-empty, and only alphanumerics, `-` and `_`.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JSON: &str = r#"{
        "content": {
            "site_name": "Lucky Reels",
            "pages": {
                "homepage": {
                    "hero": {"headline": "Spin", "subheadline": "For fun"},
                    "about": {"title": "About", "content": "Social casino"},
                    "cta": {"text": "Ready?", "button": "Play Now"}
                },
                "about": {"title": "About Us"}
            }
        },
        "games": [
            {"id": "1", "name": "Golden Fortune!"},
            {"id": "2", "name": "Neon Nights", "slug": "neon", "category": "Table"}
        ]
    }"#;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Golden Fortune"), "golden-fortune");
        assert_eq!(slugify("  Book of Ra: Deluxe! "), "book-of-ra-deluxe");
        assert_eq!(slugify("7s -- Wild"), "7s-wild");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("golden-fortune"));
        assert!(is_valid_slug("7s_wild"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug(".."));
        assert!(!is_valid_slug("../escaped"));
        assert!(!is_valid_slug("a/b"));
        assert!(!is_valid_slug("with space"));
    }

    #[test]
    fn test_normalize_never_leaves_empty_slug() {
        let mut input: SiteInput = serde_json::from_str(SAMPLE_JSON).unwrap();
        input.games[0].name = "!!!".to_string();
        input.games[0].id = "Lucky 7".to_string();
        input.games[1].name = "???".to_string();
        input.games[1].id = "#".to_string();
        input.games[1].slug.clear();
        input.normalize();

        assert_eq!(input.games[0].slug, "lucky-7");
        assert_eq!(input.games[1].slug, "game-2");
    }

    #[test]
    fn test_normalize_rewrites_path_like_slugs() {
        let mut input: SiteInput = serde_json::from_str(SAMPLE_JSON).unwrap();
        input.games[0].slug = "../../escaped".to_string();
        input.games[1].slug = "..".to_string();
        input.normalize();

        assert_eq!(input.games[0].slug, "escaped");
        assert_eq!(input.games[1].slug, "neon-nights");
        assert!(input.games.iter().all(|g| is_valid_slug(&g.slug)));
    }

    #[test]
    fn test_deployment_type_parse() {
        assert_eq!(
            "traffic-armor".parse::<DeploymentType>().unwrap(),
            DeploymentType::TrafficArmor
        );
        assert_eq!(
            "noip".parse::<DeploymentType>().unwrap(),
            DeploymentType::Standard
        );
        assert!("ftp".parse::<DeploymentType>().is_err());
    }

    #[test]
    fn test_deployment_type_serde_alias() {
        let dt: DeploymentType = serde_json::from_str("\"noip\"").unwrap();
        assert_eq!(dt, DeploymentType::Standard);
        assert_eq!(
            serde_json::to_string(&DeploymentType::TrafficArmor).unwrap(),
            "\"traffic_armor\""
        );
    }

    #[test]
    fn test_load_json_fills_defaults_and_slugs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, SAMPLE_JSON).unwrap();

        let input = SiteInput::load(&path).unwrap();

        assert_eq!(input.content.site_name, "Lucky Reels");
        assert_eq!(input.games[0].slug, "golden-fortune");
        assert_eq!(input.games[0].provider, "Unknown");
        assert_eq!(input.games[0].category, "slots");
        assert_eq!(input.games[1].slug, "neon");
        assert_eq!(input.design_system.colors.primary, "#1a1a2e");
        assert_eq!(input.design_system.gradients.len(), 2);
        assert!(input.images.hero_url.is_none());
        assert!(input.content.pages.legal.terms.is_none());
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.yaml");
        let value: serde_json::Value = serde_json::from_str(SAMPLE_JSON).unwrap();
        std::fs::write(&path, serde_yaml::to_string(&value).unwrap()).unwrap();

        let input = SiteInput::load(&path).unwrap();
        assert_eq!(input.games.len(), 2);
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.txt");
        std::fs::write(&path, SAMPLE_JSON).unwrap();

        let err = SiteInput::load(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported extension"));
    }

    #[test]
    fn test_load_missing_required_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, r#"{"content": {"site_name": "X"}}"#).unwrap();

        assert!(matches!(
            SiteInput::load(&path),
            Err(CoreError::Json(_))
        ));
    }

    #[test]
    fn test_thumbnail_prefers_local() {
        let mut game: Game =
            serde_json::from_str(r#"{"id": "1", "name": "A", "thumbnail": "https://cdn/a.jpg"}"#)
                .unwrap();
        assert_eq!(game.thumbnail_src(), "https://cdn/a.jpg");

        game.local_thumbnail = Some("images/games/a.jpg".to_string());
        assert_eq!(game.thumbnail_src(), "images/games/a.jpg");
    }
}
