//! Web app manifest (`manifest.json`).

use reelsite_core::{Content, DesignSystem};
use serde::Serialize;

/// PWA metadata for the generated site.
#[derive(Debug, Clone, Serialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
    pub icons: Vec<ManifestIcon>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

impl WebManifest {
    /// Build the manifest from site copy and the design palette.
    #[must_use]
    pub fn new(content: &Content, design: &DesignSystem) -> Self {
        Self {
            name: content.site_name.clone(),
            short_name: content.site_name.clone(),
            description: format!("{} - Social Casino Games", content.site_name),
            start_url: "/".to_string(),
            display: "standalone".to_string(),
            background_color: design.colors.background.clone(),
            theme_color: design.colors.primary.clone(),
            icons: vec![ManifestIcon {
                src: "images/favicon.ico".to_string(),
                sizes: "32x32".to_string(),
                mime_type: "image/x-icon".to_string(),
            }],
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
