//! HTML generation from typed page records.
//!
//! Every page renders its own template and is then wrapped in the `base`
//! template, which carries the shared head, navigation and footer.

use chrono::{Datelike, NaiveDate};
use reelsite_core::{Config, Content, DesignSystem, Game};
use thiserror::Error;
use tracing::debug;

use crate::{
    css::google_fonts_url,
    layout::{Layout, Route},
    pages::{AboutPage, GameDetailPage, GamesPage, HomePage, LegalKind, LegalPage},
    template::{TemplateContext, TemplateError, TemplateRegistry, escape_html},
};

/// HTML generation errors.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// Template error while rendering a page.
    #[error("failed to render {page}: {source}")]
    Template {
        page: String,
        #[source]
        source: TemplateError,
    },
}

/// Result type for HTML generation.
pub type Result<T> = std::result::Result<T, HtmlError>;

/// Result of building a page-body context.
pub type ContextResult = std::result::Result<TemplateContext, TemplateError>;

/// A page that can be rendered through the template registry.
pub trait PageView {
    /// Name of the page-body template.
    fn template(&self) -> &'static str;

    /// Where the page lives.
    fn route(&self) -> Route;

    /// Title shown before the site name in `<title>`.
    fn title(&self, content: &Content) -> String;

    /// Meta description.
    fn description(&self, content: &Content) -> String;

    /// Variables for the page-body template.
    fn context(&self, html: &HtmlGenerator<'_>) -> ContextResult;
}

/// Renders pages for one site.
#[derive(Debug)]
pub struct HtmlGenerator<'a> {
    templates: &'a TemplateRegistry,
    config: &'a Config,
    layout: Layout,
    content: &'a Content,
    fonts_url: String,
    today: NaiveDate,
}

impl<'a> HtmlGenerator<'a> {
    #[must_use]
    pub fn new(
        templates: &'a TemplateRegistry,
        config: &'a Config,
        layout: Layout,
        content: &'a Content,
        design: &DesignSystem,
        today: NaiveDate,
    ) -> Self {
        Self {
            templates,
            config,
            layout,
            content,
            fonts_url: google_fonts_url(&design.typography),
            today,
        }
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[must_use]
    pub fn href(&self, route: &Route) -> String {
        self.layout.href(route)
    }

    /// Render a page into a complete HTML document.
    pub fn render<P: PageView>(&self, page: &P) -> Result<String> {
        let route = page.route();
        let wrap = |source| HtmlError::Template {
            page: self.layout.href(&route),
            source,
        };

        debug!(route = ?route, template = page.template(), "rendering page");

        let inner_ctx = page.context(self).map_err(wrap)?;
        let inner_html = self
            .templates
            .render(page.template(), &inner_ctx)
            .map_err(wrap)?;

        let base_ctx = self.base_context(page, &route, inner_html);
        self.templates.render("base", &base_ctx).map_err(wrap)
    }

    fn base_context<P: PageView>(
        &self,
        page: &P,
        route: &Route,
        inner_html: String,
    ) -> TemplateContext {
        let site_name = &self.content.site_name;
        let title = match route {
            Route::Home => match &self.content.site_tagline {
                Some(tagline) => format!("{site_name} - {tagline}"),
                None => format!("{site_name} - Social Casino Games"),
            },
            _ => format!("{} - {site_name}", page.title(self.content)),
        };
        let tagline = self
            .content
            .site_tagline
            .clone()
            .unwrap_or_else(|| "The best social casino experience".to_string());

        TemplateContext::new()
            .with_var("lang", &self.config.site.lang)
            .with_var("title", title)
            .with_var("description", page.description(self.content))
            .with_var("canonical_url", self.config.url_for(&self.layout.href(route)))
            .with_var("fonts_url", &self.fonts_url)
            .with_var("page_class", page.template())
            .with_var("site_name", site_name)
            .with_var("tagline", tagline)
            .with_var("home_url", self.href(&Route::Home))
            .with_var("year", self.today.year().to_string())
            .with_html("nav_links", self.nav_links(route))
            .with_html("legal_links", self.legal_links())
            .with_html("support_links", self.support_links())
            .with_html("content", inner_html)
    }

    fn link(&self, route: &Route, label: &str, class: &str) -> String {
        format!(
            r#"<a href="{}" class="{class}">{}</a>"#,
            escape_html(&self.href(route)),
            escape_html(label)
        )
    }

    fn nav_links(&self, current: &Route) -> String {
        [
            (Route::Home, "Home"),
            (Route::Games, "Games"),
            (Route::About, "About"),
            (Route::Legal(LegalKind::Contact), "Contact"),
        ]
        .iter()
        .map(|(route, label)| {
            let active = match (route, current) {
                (Route::Games, Route::Game(_)) => true,
                _ => route == current,
            };
            self.link(route, label, if active { "nav-link active" } else { "nav-link" })
        })
        .collect::<Vec<_>>()
        .join("\n            ")
    }

    fn legal_links(&self) -> String {
        [LegalKind::Terms, LegalKind::Privacy, LegalKind::Responsible]
            .iter()
            .map(|kind| self.link(&Route::Legal(*kind), kind.title(), "footer-link"))
            .collect::<Vec<_>>()
            .join("\n                ")
    }

    fn support_links(&self) -> String {
        [
            self.link(&Route::Legal(LegalKind::Contact), "Contact Us", "footer-link"),
            self.link(&Route::About, "About Us", "footer-link"),
        ]
        .join("\n                ")
    }

    /// Render one game tile.
    pub fn game_card(&self, game: &Game) -> std::result::Result<String, TemplateError> {
        let ctx = TemplateContext::new()
            .with_var("name", &game.name)
            .with_var("provider", &game.provider)
            .with_var("category", &game.category)
            .with_var("thumbnail", asset_href(game.thumbnail_src()))
            .with_var("url", self.href(&Route::Game(game.slug.clone())));
        self.templates.render("game_card", &ctx)
    }

    /// Render a list of game tiles.
    pub fn game_cards(&self, games: &[&Game]) -> std::result::Result<String, TemplateError> {
        let cards = games
            .iter()
            .map(|game| self.game_card(game))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(cards.join("\n"))
    }

    /// Render a slider section, or nothing for an empty list.
    pub fn game_slider(
        &self,
        heading: &str,
        class: &str,
        games: &[&Game],
    ) -> std::result::Result<String, TemplateError> {
        if games.is_empty() {
            return Ok(String::new());
        }
        let ctx = TemplateContext::new()
            .with_var("heading", heading)
            .with_var("class", class)
            .with_html("items", self.game_cards(games)?);
        self.templates.render("game_slider", &ctx)
    }
}

/// Root-relative href for a site asset; absolute URLs pass through.
fn asset_href(src: &str) -> String {
    if src.is_empty() {
        "/images/placeholder-game.jpg".to_string()
    } else if src.contains("://") || src.starts_with('/') || src.starts_with("data:") {
        src.to_string()
    } else {
        format!("/{src}")
    }
}

fn paragraphs_html(paragraphs: &[String]) -> String {
    paragraphs
        .iter()
        .map(|p| format!("<p>{}</p>", escape_html(p)))
        .collect::<Vec<_>>()
        .join("\n        ")
}

impl PageView for HomePage<'_> {
    fn template(&self) -> &'static str {
        "home"
    }

    fn route(&self) -> Route {
        Route::Home
    }

    fn title(&self, content: &Content) -> String {
        content.site_name.clone()
    }

    fn description(&self, content: &Content) -> String {
        format!("{} - {}", content.site_name, self.copy.hero.subheadline)
    }

    fn context(&self, html: &HtmlGenerator<'_>) -> ContextResult {
        let mut ctx = TemplateContext::new()
            .with_var("headline", &self.copy.hero.headline)
            .with_var("subheadline", &self.copy.hero.subheadline)
            .with_var("site_name", &html.content.site_name)
            .with_var("games_url", html.href(&Route::Games))
            .with_var("cta_text", &self.copy.cta.text)
            .with_var("cta_button", &self.copy.cta.button)
            .with_var("about_title", &self.copy.about.title)
            .with_var("about_content", &self.copy.about.content)
            .with_html("popular_games", html.game_cards(&self.popular)?);

        let new_games = html.game_slider("New Games", "new-games", &self.new)?;
        if !new_games.is_empty() {
            ctx.insert_html("new_games", new_games);
        }

        if !self.copy.features.is_empty() {
            let cards = self
                .copy
                .features
                .iter()
                .map(|f| {
                    format!(
                        "<div class=\"feature-card\">\n                <h3>{}</h3>\n                <p>{}</p>\n            </div>",
                        escape_html(&f.title),
                        escape_html(&f.description)
                    )
                })
                .collect::<Vec<_>>()
                .join("\n            ");
            ctx.insert_html(
                "features",
                format!(
                    "<section class=\"features-section\">\n    <div class=\"container features-grid\">\n            {cards}\n    </div>\n</section>"
                ),
            );
        }

        Ok(ctx)
    }
}

impl PageView for GamesPage<'_> {
    fn template(&self) -> &'static str {
        "games"
    }

    fn route(&self) -> Route {
        Route::Games
    }

    fn title(&self, _content: &Content) -> String {
        "Games".to_string()
    }

    fn description(&self, content: &Content) -> String {
        format!(
            "Browse {} free social casino games at {}",
            self.games.len(),
            content.site_name
        )
    }

    fn context(&self, html: &HtmlGenerator<'_>) -> ContextResult {
        let categories = self
            .categories
            .iter()
            .map(|(name, count)| {
                format!(
                    r#"<li data-category="{0}">{0} <span>({count})</span></li>"#,
                    escape_html(name)
                )
            })
            .collect::<Vec<_>>()
            .join("\n            ");
        let all: Vec<&Game> = self.games.iter().collect();

        Ok(TemplateContext::new()
            .with_var("title", "All Games")
            .with_var(
                "intro",
                format!("{} games to play for free, just for fun.", self.games.len()),
            )
            .with_html("categories", categories)
            .with_html("games", html.game_cards(&all)?))
    }
}

impl PageView for GameDetailPage<'_> {
    fn template(&self) -> &'static str {
        "game"
    }

    fn route(&self) -> Route {
        GameDetailPage::route(self)
    }

    fn title(&self, _content: &Content) -> String {
        self.game.name.clone()
    }

    fn description(&self, content: &Content) -> String {
        if self.game.description.is_empty() {
            format!(
                "Play {} by {} for free at {}",
                self.game.name, self.game.provider, content.site_name
            )
        } else {
            self.game.description.clone()
        }
    }

    fn context(&self, html: &HtmlGenerator<'_>) -> ContextResult {
        let game = self.game;
        let player = if game.demo_url.is_empty() {
            r#"<div class="game-unavailable"><p>Game not available for demo</p></div>"#.to_string()
        } else {
            format!(
                r#"<iframe src="{}" title="{}" loading="lazy" allow="autoplay; fullscreen" allowfullscreen></iframe>"#,
                escape_html(&game.demo_url),
                escape_html(&game.name)
            )
        };

        let mut stats = vec![
            ("Provider", game.provider.as_str()),
            ("Category", game.category.as_str()),
        ];
        if let Some(rtp) = &game.rtp {
            stats.push(("RTP", rtp.as_str()));
        }
        if let Some(volatility) = &game.volatility {
            stats.push(("Volatility", volatility.as_str()));
        }
        let stats = stats
            .iter()
            .map(|(label, value)| {
                format!("<tr><th>{label}</th><td>{}</td></tr>", escape_html(value))
            })
            .collect::<Vec<_>>()
            .join("\n                ");

        let mut ctx = TemplateContext::new()
            .with_var("name", &game.name)
            .with_var("description", self.description(html.content))
            .with_var("home_url", html.href(&Route::Home))
            .with_var("games_url", html.href(&Route::Games))
            .with_html("player", player)
            .with_html("stats", stats);

        let similar = html.game_slider("Similar Games", "similar-games", &self.similar)?;
        if !similar.is_empty() {
            ctx.insert_html("similar_games", similar);
        }

        Ok(ctx)
    }
}

impl PageView for AboutPage<'_> {
    fn template(&self) -> &'static str {
        "about"
    }

    fn route(&self) -> Route {
        Route::About
    }

    fn title(&self, _content: &Content) -> String {
        self.copy.title.clone()
    }

    fn description(&self, content: &Content) -> String {
        format!("{} - {}", self.copy.title, content.site_name)
    }

    fn context(&self, _html: &HtmlGenerator<'_>) -> ContextResult {
        let sections = self
            .copy
            .sections
            .iter()
            .map(|s| {
                format!(
                    "<h2>{}</h2>\n        <p>{}</p>",
                    escape_html(&s.title),
                    escape_html(&s.content)
                )
            })
            .collect::<Vec<_>>()
            .join("\n        ");

        Ok(TemplateContext::new()
            .with_var("title", &self.copy.title)
            .with_html("sections", sections))
    }
}

impl PageView for LegalPage {
    fn template(&self) -> &'static str {
        "legal"
    }

    fn route(&self) -> Route {
        LegalPage::route(self)
    }

    fn title(&self, _content: &Content) -> String {
        self.kind.title().to_string()
    }

    fn description(&self, content: &Content) -> String {
        format!("{} - {}", self.kind.title(), content.site_name)
    }

    fn context(&self, html: &HtmlGenerator<'_>) -> ContextResult {
        let mut body = paragraphs_html(&self.paragraphs);
        if let Some(email) = &self.email {
            let email = escape_html(email);
            body.push_str(&format!(
                "\n        <p class=\"contact-email\">Email: <a href=\"mailto:{email}\">{email}</a></p>"
            ));
        }

        Ok(TemplateContext::new()
            .with_var("title", self.kind.title())
            .with_var("kind", self.kind.slug())
            .with_var("updated", html.today.format("%B %d, %Y").to_string())
            .with_html("body", body))
    }
}
