//! Generator configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    site::DeploymentType,
};

/// Main configuration structure for reelsite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Remote image download settings.
    #[serde(default)]
    pub download: DownloadConfig,

    /// robots.txt rules.
    #[serde(default)]
    pub robots: RobotsConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Public base URL (e.g., "https://example.com"). Empty means root-relative URLs.
    #[serde(default)]
    pub base_url: String,

    /// Document language code.
    #[serde(default = "default_lang")]
    pub lang: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory for the generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Output layout.
    #[serde(default)]
    pub deployment_type: DeploymentType,

    /// Directory with `<name>.html` files overriding built-in templates.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
}

/// Image download configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with image requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// robots.txt configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotsConfig {
    /// Paths crawlers should skip.
    #[serde(default = "default_disallow")]
    pub disallow: Vec<String>,

    /// Paths crawlers may visit.
    #[serde(default = "default_allow")]
    pub allow: Vec<String>,
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("reelsite/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_disallow() -> Vec<String> {
    vec!["/admin/".to_string(), "/private/".to_string()]
}

fn default_allow() -> Vec<String> {
    vec!["/".to_string()]
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            lang: default_lang(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            deployment_type: DeploymentType::default(),
            templates_dir: None,
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            disallow: default_disallow(),
            allow: default_allow(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `REELSITE__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        Self::load_with_env_prefix(path, "REELSITE")
    }

    /// Load configuration with `<PREFIX>__SECTION__KEY` environment overrides.
    pub fn load_with_env_prefix(path: &Path, prefix: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(prefix).separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.build.output_dir.trim().is_empty() {
            return Err(CoreError::config("build.output_dir cannot be empty"));
        }

        if self.download.timeout_secs == 0 {
            return Err(CoreError::config("download.timeout_secs must be positive"));
        }

        let base = &self.site.base_url;
        if !base.is_empty() && !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(CoreError::config(format!(
                "site.base_url must start with http:// or https://, got {base}"
            )));
        }

        if base.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Get the public URL for a root-relative path.
    ///
    /// Without a base URL the path itself is returned, rooted at `/`.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
