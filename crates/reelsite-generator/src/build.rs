//! Build orchestration.
//!
//! Coordinates the full site build: directory setup, image downloads,
//! stylesheet and script, pages, then robots.txt, sitemap and manifest.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use chrono::{Local, NaiveDate};
use reelsite_core::{Config, DeploymentType, Game, Images, SiteInput, is_valid_slug};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    css::site_stylesheet,
    download::{DownloadError, Downloader},
    html::{HtmlError, HtmlGenerator, PageView},
    layout::Layout,
    manifest::WebManifest,
    pages::{AboutPage, GameDetailPage, GamesPage, HomePage, LegalKind, LegalPage},
    robots::RobotsGenerator,
    script::MAIN_JS,
    sitemap::SitemapGenerator,
    template::{TemplateError, TemplateRegistry},
};

/// Directories created under the output root before anything is written.
pub const OUTPUT_DIRS: [&str; 5] = ["css", "js", "images", "images/games", "games"];

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Game slug cannot be used as a path segment.
    #[error("game {id} has unusable slug {slug:?}")]
    InvalidSlug { id: String, slug: String },

    /// Two games would be written to the same page.
    #[error("games {first} and {second} share slug {slug:?}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },

    /// Page rendering failed.
    #[error(transparent)]
    Template(#[from] HtmlError),

    /// Template overrides could not be loaded.
    #[error("template error: {0}")]
    Templates(#[from] TemplateError),

    /// Downloader could not be set up.
    #[error("download error: {0}")]
    Download(#[from] DownloadError),

    /// Manifest serialization failed.
    #[error("manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// An image that was not fetched.
#[derive(Debug, Clone)]
pub struct SkippedDownload {
    pub url: String,
    pub path: PathBuf,
    pub reason: String,
}

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of HTML/PHP pages written.
    pub pages: usize,

    /// Number of game detail pages among them.
    pub games: usize,

    /// Number of images downloaded.
    pub downloaded: usize,

    /// Images skipped after a failed download.
    pub skipped_downloads: Vec<SkippedDownload>,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct WebsiteBuilder {
    config: Config,
    output_dir: PathBuf,
    deployment: DeploymentType,
    templates: TemplateRegistry,
    downloader: Downloader,
    build_date: Option<NaiveDate>,
}

impl WebsiteBuilder {
    /// Create a builder writing into `output_dir`.
    ///
    /// Template overrides from `build.templates_dir` are loaded here, once.
    pub fn new(config: Config, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut templates = TemplateRegistry::new();
        if let Some(dir) = &config.build.templates_dir {
            let loaded = templates.load_dir(dir)?;
            info!(dir = %dir.display(), loaded, "loaded template overrides");
        }

        let downloader = Downloader::new(&config.download)?;

        Ok(Self {
            deployment: config.build.deployment_type,
            output_dir: output_dir.into(),
            templates,
            downloader,
            build_date: None,
            config,
        })
    }

    /// Override the deployment type from the configuration.
    #[must_use]
    pub fn with_deployment_type(mut self, deployment: DeploymentType) -> Self {
        self.deployment = deployment;
        self
    }

    /// Pin the date used for the footer year, legal pages and sitemap.
    #[must_use]
    pub fn with_build_date(mut self, date: NaiveDate) -> Self {
        self.build_date = Some(date);
        self
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::new(self.deployment)
    }

    /// Execute the full build process.
    pub async fn build(&self, input: &SiteInput) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();
        let today = self
            .build_date
            .unwrap_or_else(|| Local::now().date_naive());

        info!(
            site = %input.content.site_name,
            output = %self.output_dir.display(),
            deployment = %self.deployment,
            games = input.games.len(),
            "starting build"
        );

        check_slugs(&input.games)?;
        self.create_dirs()?;
        self.download_images(&input.images, &mut stats).await;
        self.generate_assets(input)?;
        self.generate_pages(input, today, &mut stats)?;
        self.generate_auxiliary(input, today)?;

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            pages = stats.pages,
            games = stats.games,
            downloaded = stats.downloaded,
            skipped = stats.skipped_downloads.len(),
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    fn create_dirs(&self) -> Result<()> {
        for dir in std::iter::once(self.output_dir.clone())
            .chain(OUTPUT_DIRS.iter().map(|d| self.output_dir.join(d)))
        {
            fs::create_dir_all(&dir).map_err(|source| BuildError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        debug!(dir = %self.output_dir.display(), "created output directories");
        Ok(())
    }

    /// Fetch the hero and favicon. Failures are logged and recorded, never fatal.
    async fn download_images(&self, images: &Images, stats: &mut BuildStats) {
        let targets = [
            (images.hero_url.as_deref(), "images/hero.jpg"),
            (images.favicon_url.as_deref(), "images/favicon.ico"),
        ];

        for (url, rel) in targets {
            let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
                continue;
            };
            let dest = self.output_dir.join(rel);

            match self.downloader.fetch_to(url, &dest).await {
                Ok(_) => stats.downloaded += 1,
                Err(err) => {
                    warn!(url, path = %dest.display(), error = %err, "skipping image download");
                    stats.skipped_downloads.push(SkippedDownload {
                        url: url.to_string(),
                        path: dest,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    fn generate_assets(&self, input: &SiteInput) -> Result<()> {
        let stylesheet = site_stylesheet(&input.design_system);
        debug!(rules = stylesheet.len(), "generated stylesheet");
        self.write_file(Path::new("css/style.css"), stylesheet.render())?;
        self.write_file(Path::new("js/main.js"), MAIN_JS)
    }

    fn generate_pages(
        &self,
        input: &SiteInput,
        today: NaiveDate,
        stats: &mut BuildStats,
    ) -> Result<()> {
        let html = HtmlGenerator::new(
            &self.templates,
            &self.config,
            self.layout(),
            &input.content,
            &input.design_system,
            today,
        );

        info!(count = input.games.len() + 3 + LegalKind::ALL.len(), "generating pages");

        self.write_page(&html, &HomePage::new(&input.content, &input.games))?;
        self.write_page(&html, &GamesPage::new(&input.games))?;
        stats.pages += 2;

        for game in &input.games {
            self.write_page(&html, &GameDetailPage::new(game, &input.games))?;
            stats.games += 1;
        }
        stats.pages += stats.games;

        self.write_page(&html, &AboutPage::new(&input.content))?;
        stats.pages += 1;

        for kind in LegalKind::ALL {
            self.write_page(&html, &LegalPage::new(kind, &input.content))?;
            stats.pages += 1;
        }

        Ok(())
    }

    fn write_page<P: PageView>(&self, html: &HtmlGenerator<'_>, page: &P) -> Result<()> {
        let rendered = html.render(page)?;
        self.write_file(&html.layout().output_path(&page.route()), rendered)
    }

    fn generate_auxiliary(&self, input: &SiteInput, today: NaiveDate) -> Result<()> {
        let robots = RobotsGenerator::new(&self.config).generate();
        self.write_file(Path::new("robots.txt"), robots)?;

        let sitemap = SitemapGenerator::new(&self.config, self.layout())
            .generate(&input.games, Some(today));
        self.write_file(Path::new("sitemap.xml"), sitemap)?;

        let manifest = WebManifest::new(&input.content, &input.design_system).to_json()?;
        self.write_file(Path::new("manifest.json"), manifest)
    }

    /// Write `contents` to `rel` under the output directory, creating parents.
    fn write_file(&self, rel: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
        let path = self.output_dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| BuildError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&path, contents).map_err(|source| BuildError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), "wrote file");
        Ok(())
    }
}

/// Reject games whose pages would land outside `games/` or on each other.
fn check_slugs(games: &[Game]) -> Result<()> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for game in games {
        if !is_valid_slug(&game.slug) {
            return Err(BuildError::InvalidSlug {
                id: game.id.clone(),
                slug: game.slug.clone(),
            });
        }
        if let Some(first) = seen.insert(&game.slug, &game.id) {
            return Err(BuildError::DuplicateSlug {
                slug: game.slug.clone(),
                first: first.to_string(),
                second: game.id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use reelsite_core::DesignSystem;

    use super::*;
    use crate::pages::tests::{content, games};

    fn input(n: usize) -> SiteInput {
        SiteInput {
            content: content(),
            design_system: DesignSystem::default(),
            images: Images::default(),
            games: games(n),
        }
    }

    fn builder(dir: &Path, deployment: DeploymentType) -> WebsiteBuilder {
        WebsiteBuilder::new(Config::default(), dir)
            .unwrap()
            .with_deployment_type(deployment)
            .with_build_date(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    #[tokio::test]
    async fn test_standard_build_layout() {
        let dir = tempfile::tempdir().unwrap();
        let stats = builder(dir.path(), DeploymentType::Standard)
            .build(&input(4))
            .await
            .unwrap();

        assert_eq!(stats.games, 4);
        assert_eq!(stats.pages, 4 + 3 + 4);
        assert_eq!(stats.downloaded, 0);
        assert!(stats.skipped_downloads.is_empty());

        for rel in [
            "index.html",
            "games.html",
            "games/game-0.html",
            "games/game-3.html",
            "about.html",
            "css/style.css",
            "js/main.js",
            "robots.txt",
            "sitemap.xml",
            "manifest.json",
        ] {
            assert!(dir.path().join(rel).is_file(), "missing {rel}");
        }
        for rel in OUTPUT_DIRS {
            assert!(dir.path().join(rel).is_dir(), "missing dir {rel}");
        }
    }

    #[tokio::test]
    async fn test_traffic_armor_build_layout() {
        let dir = tempfile::tempdir().unwrap();
        builder(dir.path(), DeploymentType::TrafficArmor)
            .build(&input(2))
            .await
            .unwrap();

        for rel in [
            "index.php",
            "games.php",
            "games/game-0/index.php",
            "games/game-1/index.php",
            "about.php",
            "terms.php",
            "contact.php",
        ] {
            assert!(dir.path().join(rel).is_file(), "missing {rel}");
        }
        assert!(!dir.path().join("games/game-0.html").exists());
        assert!(!dir.path().join("games/index.php").exists());
    }

    #[tokio::test]
    async fn test_empty_slug_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut site = input(2);
        site.games[1].slug.clear();

        let err = builder(dir.path(), DeploymentType::TrafficArmor)
            .build(&site)
            .await
            .unwrap_err();

        assert!(matches!(&err, BuildError::InvalidSlug { id, .. } if id == "1"));
        assert!(!dir.path().join("games").exists());
        assert!(!dir.path().join("games.php").exists());
    }

    #[tokio::test]
    async fn test_path_like_slug_cannot_escape_output_dir() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("public");
        let mut site = input(1);
        site.games[0].slug = "../escaped".to_string();

        let err = builder(&out, DeploymentType::Standard)
            .build(&site)
            .await
            .unwrap_err();

        assert!(matches!(err, BuildError::InvalidSlug { .. }));
        assert!(!root.path().join("escaped.html").exists());
        assert!(!out.exists());

        site.normalize();
        builder(&out, DeploymentType::Standard)
            .build(&site)
            .await
            .unwrap();
        assert!(out.join("games/escaped.html").is_file());
        assert!(!root.path().join("escaped.html").exists());
    }

    #[tokio::test]
    async fn test_duplicate_slug_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut site = input(2);
        site.games[1].slug = site.games[0].slug.clone();

        let err = builder(dir.path(), DeploymentType::Standard)
            .build(&site)
            .await
            .unwrap_err();

        assert!(matches!(err, BuildError::DuplicateSlug { ref slug, .. } if slug == "game-0"));
    }

    #[tokio::test]
    async fn test_legal_pages_are_distinct_and_titled() {
        let dir = tempfile::tempdir().unwrap();
        builder(dir.path(), DeploymentType::Standard)
            .build(&input(1))
            .await
            .unwrap();

        let expected = [
            ("terms.html", "<h1>Terms &amp; Conditions</h1>"),
            ("privacy.html", "<h1>Privacy Policy</h1>"),
            ("responsible.html", "<h1>Responsible Gaming</h1>"),
            ("contact.html", "<h1>Contact Us</h1>"),
        ];
        for (file, heading) in expected {
            let html = fs::read_to_string(dir.path().join(file)).unwrap();
            assert!(html.contains(heading), "{file} lacks {heading}");
        }
    }

    #[tokio::test]
    async fn test_stylesheet_uses_design_colors() {
        let dir = tempfile::tempdir().unwrap();
        let mut site = input(0);
        site.design_system.colors.primary = "#112233".to_string();

        builder(dir.path(), DeploymentType::Standard)
            .build(&site)
            .await
            .unwrap();

        let css = fs::read_to_string(dir.path().join("css/style.css")).unwrap();
        assert!(css.contains("--primary-color: #112233;"));
        let manifest = fs::read_to_string(dir.path().join("manifest.json")).unwrap();
        assert!(manifest.contains("\"theme_color\": \"#112233\""));
    }

    #[tokio::test]
    async fn test_unreachable_image_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut site = input(1);
        site.images.hero_url = Some("http://127.0.0.1:9/hero.jpg".to_string());

        let stats = builder(dir.path(), DeploymentType::Standard)
            .build(&site)
            .await
            .unwrap();

        assert_eq!(stats.downloaded, 0);
        assert_eq!(stats.skipped_downloads.len(), 1);
        assert!(stats.skipped_downloads[0].path.ends_with("images/hero.jpg"));
        assert!(!dir.path().join("images/hero.jpg").exists());
        assert!(dir.path().join("index.html").is_file());
    }

    #[tokio::test]
    async fn test_output_dir_conflict_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("site");
        fs::write(&blocker, "not a directory").unwrap();

        let err = builder(&blocker, DeploymentType::Standard)
            .build(&input(1))
            .await
            .unwrap_err();

        assert!(matches!(err, BuildError::CreateDir { .. }));
        assert!(err.to_string().contains("site"));
    }

    #[test]
    fn test_missing_templates_dir_fails_early() {
        let mut config = Config::default();
        config.build.templates_dir = Some(PathBuf::from("/nonexistent/templates"));

        let err = WebsiteBuilder::new(config, "out").unwrap_err();
        assert!(matches!(err, BuildError::Templates(TemplateError::Load { .. })));
    }
}
