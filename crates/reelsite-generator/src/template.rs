//! HTML template system for page generation.
//!
//! Templates use `{{ variable }}` interpolation; `{{ variable? }}` renders
//! nothing when the variable is absent. Values inserted with
//! [`TemplateContext::insert`] are HTML-escaped, values inserted with
//! [`TemplateContext::insert_html`] are trusted fragments and go in verbatim.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable `{variable}` in template `{template}`")]
    MissingVariable { template: String, variable: String },

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax in `{template}`: {message}")]
    InvalidSyntax { template: String, message: String },

    /// Template file could not be read.
    #[error("failed to load template {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a text variable, escaping HTML special characters.
    pub fn insert(&mut self, key: impl Into<String>, value: impl AsRef<str>) {
        self.variables
            .insert(key.into(), escape_html(value.as_ref()));
    }

    /// Insert a pre-rendered HTML fragment verbatim.
    pub fn insert_html(&mut self, key: impl Into<String>, html: impl Into<String>) {
        self.variables.insert(key.into(), html.into());
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder form of [`insert_html`](Self::insert_html).
    #[must_use]
    pub fn with_html(mut self, key: impl Into<String>, html: impl Into<String>) -> Self {
        self.insert_html(key, html);
        self
    }

    /// Get a variable value as it will be substituted.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Check if a variable exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }
}

/// A named template supporting variable interpolation.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    /// Create a new template with the given name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Render the template with the given context.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut result = self.content.clone();
        let mut pos = 0;

        while let Some(start) = result[pos..].find("{{") {
            let start = pos + start;
            let end = result[start..]
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax {
                    template: self.name.clone(),
                    message: "unclosed {{ delimiter".to_string(),
                })?;
            let end = start + end + 2;

            let var_name = result[start + 2..end - 2].trim();

            let (var_name, optional) = match var_name.strip_suffix('?') {
                Some(stripped) => (stripped.trim_end(), true),
                None => (var_name, false),
            };

            if var_name.is_empty() {
                return Err(TemplateError::InvalidSyntax {
                    template: self.name.clone(),
                    message: "empty variable name".to_string(),
                });
            }

            let value = match context.get(var_name) {
                Some(v) => v.to_string(),
                None if optional => String::new(),
                None => {
                    return Err(TemplateError::MissingVariable {
                        template: self.name.clone(),
                        variable: var_name.to_string(),
                    });
                }
            };

            result.replace_range(start..end, &value);
            pos = start + value.len();
        }

        Ok(result)
    }
}

/// Registry of named templates, built once per build.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with the built-in templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        self.register(Template::new("base", DEFAULT_BASE_TEMPLATE));
        self.register(Template::new("home", DEFAULT_HOME_TEMPLATE));
        self.register(Template::new("games", DEFAULT_GAMES_TEMPLATE));
        self.register(Template::new("game", DEFAULT_GAME_TEMPLATE));
        self.register(Template::new("about", DEFAULT_ABOUT_TEMPLATE));
        self.register(Template::new("legal", DEFAULT_LEGAL_TEMPLATE));
        self.register(Template::new("game_card", DEFAULT_GAME_CARD_TEMPLATE));
        self.register(Template::new("game_slider", DEFAULT_GAME_SLIDER_TEMPLATE));
    }

    /// Register a template, replacing any template with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Override templates with every `<name>.html` file found in `dir`.
    ///
    /// Returns the number of templates loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let load_err = |source| TemplateError::Load {
            path: dir.to_path_buf(),
            source,
        };

        let mut count = 0;
        for entry in fs::read_dir(dir).map_err(load_err)? {
            let path = entry.map_err(load_err)?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "html") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let content = fs::read_to_string(&path).map_err(|source| TemplateError::Load {
                path: path.clone(),
                source,
            })?;
            debug!(name, path = %path.display(), "loaded template override");
            self.register(Template::new(name, content));
            count += 1;
        }

        Ok(count)
    }

    /// Get a template by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Escape text for HTML element content and quoted attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Page shell shared by every page.
pub const DEFAULT_BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <meta name="description" content="{{ description }}">
    <link rel="canonical" href="{{ canonical_url }}">
    <link rel="icon" href="/images/favicon.ico" type="image/x-icon">
    <link rel="manifest" href="/manifest.json">
    <link rel="preconnect" href="https://fonts.googleapis.com">
    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
    <link href="{{ fonts_url }}" rel="stylesheet">
    <link rel="stylesheet" href="/css/style.css">
</head>
<body class="page-{{ page_class }}">
    <header class="site-header">
        <button class="sidebar-toggle" type="button" aria-label="Open menu" aria-controls="sidebar" aria-expanded="false">
            <span></span><span></span><span></span>
        </button>
        <a href="{{ home_url }}" class="site-logo">{{ site_name }}</a>
        <nav class="top-nav">
            {{ nav_links }}
        </nav>
    </header>
    <aside class="sidebar" id="sidebar">
        <a href="{{ home_url }}" class="sidebar-logo">{{ site_name }}</a>
        <nav class="sidebar-nav">
            {{ nav_links }}
        </nav>
    </aside>
    <div class="sidebar-overlay"></div>
    <main>
        {{ content }}
    </main>
    <footer class="site-footer">
        <div class="footer-container">
            <div class="footer-section">
                <h3>{{ site_name }}</h3>
                <p>{{ tagline }}</p>
            </div>
            <div class="footer-section">
                <h4>Legal</h4>
                {{ legal_links }}
            </div>
            <div class="footer-section">
                <h4>Support</h4>
                {{ support_links }}
            </div>
        </div>
        <div class="footer-bottom">
            <p>&copy; {{ year }} {{ site_name }}. Entertainment only. No real money gambling.</p>
        </div>
    </footer>
    <script src="/js/main.js"></script>
</body>
</html>"##;

/// Home page body.
pub const DEFAULT_HOME_TEMPLATE: &str = r#"<section class="hero">
    <div class="hero-content">
        <h1 class="hero-title">{{ headline }}</h1>
        <p class="hero-subtitle">{{ subheadline }}</p>
        <a href="{{ games_url }}" class="cta-button">{{ cta_button }}</a>
    </div>
    <div class="hero-image">
        <img src="/images/hero.jpg" alt="{{ site_name }}" loading="lazy" data-fallback>
    </div>
</section>
<section class="games-section popular-games">
    <div class="container">
        <h2>Popular Games</h2>
        <div class="games-grid">
            {{ popular_games }}
        </div>
    </div>
</section>
{{ new_games? }}
<section class="about-section">
    <div class="container">
        <h2>{{ about_title }}</h2>
        <p>{{ about_content }}</p>
    </div>
</section>
{{ features? }}
<section class="cta-section">
    <div class="container">
        <h2>{{ cta_text }}</h2>
        <a href="{{ games_url }}" class="cta-button">{{ cta_button }}</a>
    </div>
</section>"#;

/// Games listing body.
pub const DEFAULT_GAMES_TEMPLATE: &str = r#"<section class="page-header">
    <div class="container">
        <h1>{{ title }}</h1>
        <p>{{ intro }}</p>
    </div>
</section>
<section class="games-section">
    <div class="container">
        <ul class="category-list">
            {{ categories }}
        </ul>
        <div class="games-grid">
            {{ games }}
        </div>
    </div>
</section>"#;

/// Single game body.
pub const DEFAULT_GAME_TEMPLATE: &str = r#"<nav class="breadcrumb container" aria-label="Breadcrumb">
    <a href="{{ home_url }}">Home</a> <span>/</span>
    <a href="{{ games_url }}">Games</a> <span>/</span>
    <span>{{ name }}</span>
</nav>
<section class="game-detail">
    <div class="container">
        <h1 class="game-title">{{ name }}</h1>
        <div class="game-frame" id="game-frame">
            {{ player }}
            <button class="fullscreen-toggle" type="button" data-fullscreen-target="game-frame">Fullscreen</button>
        </div>
        <div class="game-info">
            <div class="game-description">
                <h2>About {{ name }}</h2>
                <p>{{ description }}</p>
            </div>
            <table class="game-stats">
                {{ stats }}
            </table>
        </div>
    </div>
</section>
{{ similar_games? }}"#;

/// About page body.
pub const DEFAULT_ABOUT_TEMPLATE: &str = r#"<section class="page-header">
    <div class="container">
        <h1>{{ title }}</h1>
    </div>
</section>
<section class="content-section">
    <div class="container">
        {{ sections }}
    </div>
</section>"#;

/// Legal and contact page body.
pub const DEFAULT_LEGAL_TEMPLATE: &str = r#"<section class="page-header legal-header">
    <div class="container">
        <h1>{{ title }}</h1>
    </div>
</section>
<section class="legal-content legal-{{ kind }}">
    <div class="container">
        {{ body }}
        <p class="legal-updated">Last updated: {{ updated }}</p>
    </div>
</section>"#;

/// One game tile.
pub const DEFAULT_GAME_CARD_TEMPLATE: &str = r#"<div class="game-card" data-category="{{ category }}">
    <a href="{{ url }}" class="game-card-link">
        <img src="{{ thumbnail }}" alt="{{ name }}" loading="lazy" data-fallback>
        <h3>{{ name }}</h3>
        <p class="game-provider">{{ provider }}</p>
    </a>
    <a href="{{ url }}" class="play-button">Play Now</a>
</div>"#;

/// Horizontal slider of game tiles.
pub const DEFAULT_GAME_SLIDER_TEMPLATE: &str = r#"<section class="games-section {{ class }}">
    <div class="container">
        <h2>{{ heading }}</h2>
        <div class="slider" data-slider>
            <button class="slider-prev" type="button" aria-label="Previous">&#10094;</button>
            <div class="slider-track">
                {{ items }}
            </div>
            <button class="slider-next" type="button" aria-label="Next">&#10095;</button>
        </div>
    </div>
</section>"#;
