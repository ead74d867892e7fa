//! Stylesheet generation.
//!
//! The site stylesheet is assembled as a list of rules rather than by string
//! interpolation, so design-system values are sanitized once at the
//! declaration boundary.

use std::fmt::Write as _;

use reelsite_core::{DesignSystem, site::Typography};

/// One `property: value;` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    property: String,
    value: String,
}

impl Declaration {
    /// Create a declaration, stripping characters that could end it early.
    #[must_use]
    pub fn new(property: &str, value: &str) -> Self {
        Self {
            property: property
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect(),
            value: sanitize_value(value),
        }
    }
}

/// A selector with its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    selector: String,
    declarations: Vec<Declaration>,
}

impl Rule {
    #[must_use]
    pub fn new<'a>(
        selector: &str,
        declarations: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self {
            selector: selector.replace(['{', '}', ';'], ""),
            declarations: declarations
                .into_iter()
                .map(|(p, v)| Declaration::new(p, v))
                .collect(),
        }
    }

    fn write_to(&self, out: &mut String, indent: &str) {
        let _ = writeln!(out, "{indent}{} {{", self.selector);
        for decl in &self.declarations {
            let _ = writeln!(out, "{indent}  {}: {};", decl.property, decl.value);
        }
        let _ = writeln!(out, "{indent}}}");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    Rule(Rule),
    Media { query: String, rules: Vec<Rule> },
}

/// An ordered list of rules and `@media` blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    blocks: Vec<Block>,
}

impl Stylesheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    #[must_use]
    pub fn rule<'a>(
        mut self,
        selector: &str,
        declarations: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        self.blocks.push(Block::Rule(Rule::new(selector, declarations)));
        self
    }

    /// Append an `@media` block.
    #[must_use]
    pub fn media(mut self, query: &str, rules: Vec<Rule>) -> Self {
        self.blocks.push(Block::Media {
            query: sanitize_value(query),
            rules,
        });
        self
    }

    /// Number of top-level blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render to CSS text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            match block {
                Block::Rule(rule) => rule.write_to(&mut out, ""),
                Block::Media { query, rules } => {
                    let _ = writeln!(out, "@media {query} {{");
                    for rule in rules {
                        rule.write_to(&mut out, "  ");
                    }
                    out.push_str("}\n");
                }
            }
        }
        out
    }
}

/// Remove characters that would let a value escape its declaration.
#[must_use]
pub fn sanitize_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | ';' | '<' | '>' | '\\') && !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Font family names keep letters, digits, spaces and hyphens only.
fn sanitize_font(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-')
        .collect::<String>()
        .trim()
        .to_string()
}

fn sanitize_weight(weight: &str, fallback: &str) -> String {
    let digits: String = weight.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        fallback.to_string()
    } else {
        digits
    }
}

/// Google Fonts stylesheet URL for the heading and body fonts.
#[must_use]
pub fn google_fonts_url(typography: &Typography) -> String {
    let family = |name: &str, weights: &[&str]| {
        let mut weights = weights.to_vec();
        weights.sort_unstable_by_key(|w| w.parse::<u32>().unwrap_or(0));
        weights.dedup();
        format!(
            "family={}:wght@{}",
            sanitize_font(name).replace(' ', "+"),
            weights.join(";")
        )
    };

    let heading_weight = sanitize_weight(&typography.heading_weight, "600");
    let body_weight = sanitize_weight(&typography.body_weight, "400");

    // One family request must carry every weight either role uses.
    if sanitize_font(&typography.heading_font) == sanitize_font(&typography.body_font) {
        let both = family(
            &typography.heading_font,
            &[heading_weight.as_str(), body_weight.as_str(), "700"],
        );
        format!("https://fonts.googleapis.com/css2?{both}&display=swap")
    } else {
        let heading = family(&typography.heading_font, &[heading_weight.as_str(), "700"]);
        let body = family(&typography.body_font, &[body_weight.as_str(), "700"]);
        format!("https://fonts.googleapis.com/css2?{heading}&{body}&display=swap")
    }
}

/// Build the site stylesheet for a design system.
#[must_use]
pub fn site_stylesheet(design: &DesignSystem) -> Stylesheet {
    let c = &design.colors;
    let t = &design.typography;

    let heading_font = format!("'{}', sans-serif", sanitize_font(&t.heading_font));
    let body_font = format!("'{}', sans-serif", sanitize_font(&t.body_font));
    let heading_weight = sanitize_weight(&t.heading_weight, "600");
    let body_weight = sanitize_weight(&t.body_weight, "400");
    let fallback_gradient = format!("linear-gradient(135deg, {}, {})", c.primary, c.secondary);
    let gradient_1 = design
        .gradients
        .first()
        .cloned()
        .unwrap_or(fallback_gradient);
    let gradient_2 = design
        .gradients
        .get(1)
        .cloned()
        .unwrap_or_else(|| gradient_1.clone());

    Stylesheet::new()
        .rule(
            ":root",
            [
                ("--primary-color", c.primary.as_str()),
                ("--secondary-color", c.secondary.as_str()),
                ("--accent-color", c.accent.as_str()),
                ("--background-color", c.background.as_str()),
                ("--surface-color", c.surface.as_str()),
                ("--text-primary", c.text_primary.as_str()),
                ("--text-secondary", c.text_secondary.as_str()),
                ("--success-color", c.success.as_str()),
                ("--warning-color", c.warning.as_str()),
                ("--error-color", c.error.as_str()),
                ("--heading-font", heading_font.as_str()),
                ("--body-font", body_font.as_str()),
                ("--heading-weight", heading_weight.as_str()),
                ("--body-weight", body_weight.as_str()),
                ("--gradient-1", gradient_1.as_str()),
                ("--gradient-2", gradient_2.as_str()),
                ("--radius", "12px"),
                ("--sidebar-width", "280px"),
            ],
        )
        .rule(
            "*, *::before, *::after",
            [("box-sizing", "border-box"), ("margin", "0"), ("padding", "0")],
        )
        .rule("html", [("scroll-behavior", "smooth")])
        .rule(
            "body",
            [
                ("font-family", "var(--body-font)"),
                ("font-weight", "var(--body-weight)"),
                ("line-height", "1.6"),
                ("color", "var(--text-primary)"),
                ("background", "var(--background-color)"),
                ("min-height", "100vh"),
            ],
        )
        .rule("body.sidebar-open", [("overflow", "hidden")])
        .rule(
            "h1, h2, h3, h4",
            [
                ("font-family", "var(--heading-font)"),
                ("font-weight", "var(--heading-weight)"),
                ("line-height", "1.25"),
            ],
        )
        .rule("a", [("color", "var(--accent-color)"), ("text-decoration", "none")])
        .rule("img", [("max-width", "100%"), ("display", "block")])
        .rule(
            ".container",
            [
                ("width", "100%"),
                ("max-width", "1200px"),
                ("margin", "0 auto"),
                ("padding", "0 1.5rem"),
            ],
        )
        .rule(
            ".site-header",
            [
                ("position", "sticky"),
                ("top", "0"),
                ("z-index", "50"),
                ("display", "flex"),
                ("align-items", "center"),
                ("gap", "1rem"),
                ("padding", "1rem 1.5rem"),
                ("background", "var(--primary-color)"),
                ("box-shadow", "0 2px 12px rgba(0, 0, 0, 0.3)"),
            ],
        )
        .rule(
            ".site-logo, .sidebar-logo",
            [
                ("font-family", "var(--heading-font)"),
                ("font-size", "1.5rem"),
                ("font-weight", "700"),
                ("color", "var(--accent-color)"),
            ],
        )
        .rule(".top-nav", [("display", "flex"), ("gap", "1.5rem"), ("margin-left", "auto")])
        .rule(
            ".top-nav a, .sidebar-nav a",
            [("color", "var(--text-primary)"), ("font-weight", "500")],
        )
        .rule(".top-nav a:hover, .sidebar-nav a:hover", [("color", "var(--accent-color)")])
        .rule(
            ".sidebar-toggle",
            [
                ("display", "none"),
                ("flex-direction", "column"),
                ("gap", "4px"),
                ("background", "none"),
                ("border", "none"),
                ("cursor", "pointer"),
            ],
        )
        .rule(
            ".sidebar-toggle span",
            [
                ("width", "24px"),
                ("height", "3px"),
                ("background", "var(--text-primary)"),
                ("border-radius", "2px"),
            ],
        )
        .rule(
            ".sidebar",
            [
                ("position", "fixed"),
                ("top", "0"),
                ("left", "0"),
                ("bottom", "0"),
                ("width", "var(--sidebar-width)"),
                ("padding", "2rem 1.5rem"),
                ("background", "var(--surface-color)"),
                ("transform", "translateX(-100%)"),
                ("transition", "transform 0.3s ease"),
                ("z-index", "100"),
            ],
        )
        .rule(".sidebar.open", [("transform", "translateX(0)")])
        .rule(
            ".sidebar-nav",
            [
                ("display", "flex"),
                ("flex-direction", "column"),
                ("gap", "1rem"),
                ("margin-top", "2rem"),
            ],
        )
        .rule(
            ".sidebar-overlay",
            [
                ("position", "fixed"),
                ("inset", "0"),
                ("background", "rgba(0, 0, 0, 0.5)"),
                ("opacity", "0"),
                ("pointer-events", "none"),
                ("transition", "opacity 0.3s ease"),
                ("z-index", "90"),
            ],
        )
        .rule(".sidebar-overlay.visible", [("opacity", "1"), ("pointer-events", "auto")])
        .rule(
            ".hero",
            [
                ("display", "grid"),
                ("grid-template-columns", "1fr 1fr"),
                ("align-items", "center"),
                ("gap", "2rem"),
                ("padding", "5rem 1.5rem"),
                ("background", "var(--gradient-1)"),
            ],
        )
        .rule(
            ".hero-title",
            [("font-size", "3rem"), ("color", "var(--accent-color)"), ("margin-bottom", "1rem")],
        )
        .rule(
            ".hero-subtitle",
            [
                ("font-size", "1.25rem"),
                ("color", "var(--text-secondary)"),
                ("margin-bottom", "2rem"),
            ],
        )
        .rule(
            ".hero-image img",
            [("border-radius", "var(--radius)"), ("box-shadow", "0 10px 40px rgba(0, 0, 0, 0.4)")],
        )
        .rule(
            ".cta-button, .play-button",
            [
                ("display", "inline-block"),
                ("padding", "0.875rem 2rem"),
                ("border-radius", "999px"),
                ("background", "var(--gradient-2)"),
                ("color", "var(--primary-color)"),
                ("font-weight", "700"),
                ("transition", "transform 0.2s ease, box-shadow 0.2s ease"),
            ],
        )
        .rule(
            ".cta-button:hover, .play-button:hover",
            [("transform", "translateY(-2px)"), ("box-shadow", "0 6px 20px rgba(0, 0, 0, 0.35)")],
        )
        .rule(
            ".games-section, .about-section, .content-section, .cta-section",
            [("padding", "4rem 0")],
        )
        .rule(
            ".games-section h2, .about-section h2, .cta-section h2",
            [("color", "var(--accent-color)"), ("margin-bottom", "2rem")],
        )
        .rule(".about-section, .cta-section", [("text-align", "center")])
        .rule(
            ".about-section p",
            [("max-width", "720px"), ("margin", "0 auto"), ("color", "var(--text-secondary)")],
        )
        .rule(
            ".games-grid",
            [
                ("display", "grid"),
                ("grid-template-columns", "repeat(auto-fill, minmax(220px, 1fr))"),
                ("gap", "1.5rem"),
            ],
        )
        .rule(
            ".game-card",
            [
                ("background", "var(--surface-color)"),
                ("border-radius", "var(--radius)"),
                ("overflow", "hidden"),
                ("text-align", "center"),
                ("padding-bottom", "1.25rem"),
                ("transition", "transform 0.2s ease"),
            ],
        )
        .rule(".game-card:hover", [("transform", "translateY(-4px)")])
        .rule(
            ".game-card img",
            [("width", "100%"), ("aspect-ratio", "3 / 2"), ("object-fit", "cover")],
        )
        .rule(
            ".game-card h3",
            [
                ("margin", "1rem 0.75rem 0.25rem"),
                ("font-size", "1.1rem"),
                ("color", "var(--text-primary)"),
            ],
        )
        .rule(
            ".game-provider",
            [
                ("color", "var(--text-secondary)"),
                ("font-size", "0.875rem"),
                ("margin-bottom", "1rem"),
            ],
        )
        .rule(
            ".features-grid",
            [
                ("display", "grid"),
                ("grid-template-columns", "repeat(auto-fit, minmax(220px, 1fr))"),
                ("gap", "1.5rem"),
            ],
        )
        .rule(
            ".feature-card",
            [
                ("background", "var(--surface-color)"),
                ("border-radius", "var(--radius)"),
                ("padding", "1.5rem"),
            ],
        )
        .rule(".feature-card h3", [("color", "var(--accent-color)"), ("margin-bottom", "0.5rem")])
        .rule(
            ".slider",
            [
                ("position", "relative"),
                ("display", "flex"),
                ("align-items", "center"),
                ("gap", "0.75rem"),
            ],
        )
        .rule(
            ".slider-track",
            [
                ("display", "flex"),
                ("gap", "1.5rem"),
                ("overflow-x", "auto"),
                ("scroll-snap-type", "x mandatory"),
                ("scroll-behavior", "smooth"),
                ("scrollbar-width", "none"),
            ],
        )
        .rule(".slider-track .game-card", [("flex", "0 0 240px"), ("scroll-snap-align", "start")])
        .rule(
            ".slider-prev, .slider-next",
            [
                ("flex", "0 0 auto"),
                ("width", "40px"),
                ("height", "40px"),
                ("border", "none"),
                ("border-radius", "50%"),
                ("background", "var(--secondary-color)"),
                ("color", "var(--text-primary)"),
                ("cursor", "pointer"),
            ],
        )
        .rule(
            ".page-header",
            [
                ("padding", "4rem 0 2rem"),
                ("background", "var(--gradient-1)"),
                ("text-align", "center"),
            ],
        )
        .rule(".page-header h1", [("font-size", "2.5rem"), ("color", "var(--accent-color)")])
        .rule(".page-header p", [("color", "var(--text-secondary)"), ("margin-top", "0.5rem")])
        .rule(
            ".category-list",
            [
                ("display", "flex"),
                ("flex-wrap", "wrap"),
                ("gap", "0.75rem"),
                ("list-style", "none"),
                ("margin-bottom", "2rem"),
            ],
        )
        .rule(
            ".category-list li",
            [
                ("padding", "0.375rem 1rem"),
                ("border-radius", "999px"),
                ("background", "var(--secondary-color)"),
                ("text-transform", "capitalize"),
            ],
        )
        .rule(
            ".breadcrumb",
            [
                ("padding-top", "1.5rem"),
                ("color", "var(--text-secondary)"),
                ("font-size", "0.875rem"),
            ],
        )
        .rule(".game-detail", [("padding", "2rem 0 4rem")])
        .rule(
            ".game-title",
            [
                ("font-size", "2.25rem"),
                ("color", "var(--accent-color)"),
                ("margin-bottom", "1.5rem"),
            ],
        )
        .rule(
            ".game-frame",
            [
                ("position", "relative"),
                ("aspect-ratio", "16 / 9"),
                ("background", "#000"),
                ("border-radius", "var(--radius)"),
                ("overflow", "hidden"),
            ],
        )
        .rule(".game-frame iframe", [("width", "100%"), ("height", "100%"), ("border", "0")])
        .rule(".game-frame:fullscreen", [("border-radius", "0")])
        .rule(
            ".game-unavailable",
            [
                ("display", "flex"),
                ("height", "100%"),
                ("align-items", "center"),
                ("justify-content", "center"),
                ("color", "var(--text-secondary)"),
            ],
        )
        .rule(
            ".fullscreen-toggle",
            [
                ("position", "absolute"),
                ("right", "1rem"),
                ("bottom", "1rem"),
                ("padding", "0.5rem 1rem"),
                ("border", "none"),
                ("border-radius", "6px"),
                ("background", "var(--accent-color)"),
                ("color", "var(--primary-color)"),
                ("font-weight", "600"),
                ("cursor", "pointer"),
            ],
        )
        .rule(
            ".game-info",
            [
                ("display", "grid"),
                ("grid-template-columns", "2fr 1fr"),
                ("gap", "2rem"),
                ("margin-top", "2rem"),
            ],
        )
        .rule(
            ".game-description h2",
            [("color", "var(--accent-color)"), ("margin-bottom", "0.75rem")],
        )
        .rule(".game-description p", [("color", "var(--text-secondary)")])
        .rule(
            ".game-stats",
            [
                ("width", "100%"),
                ("border-collapse", "collapse"),
                ("background", "var(--surface-color)"),
                ("border-radius", "var(--radius)"),
            ],
        )
        .rule(
            ".game-stats th, .game-stats td",
            [
                ("padding", "0.75rem 1rem"),
                ("text-align", "left"),
                ("border-bottom", "1px solid var(--secondary-color)"),
            ],
        )
        .rule(".game-stats th", [("color", "var(--text-secondary)"), ("font-weight", "500")])
        .rule(
            ".content-section h2, .legal-content h2",
            [("color", "var(--accent-color)"), ("margin", "2rem 0 0.75rem")],
        )
        .rule(
            ".content-section p, .legal-content p",
            [("color", "var(--text-secondary)"), ("margin-bottom", "1rem"), ("max-width", "800px")],
        )
        .rule(".legal-content", [("padding", "3rem 0 4rem")])
        .rule(".legal-updated", [("font-size", "0.875rem"), ("font-style", "italic")])
        .rule(
            ".site-footer",
            [
                ("background", "var(--primary-color)"),
                ("padding", "3rem 1.5rem 1.5rem"),
                ("margin-top", "2rem"),
            ],
        )
        .rule(
            ".footer-container",
            [
                ("max-width", "1200px"),
                ("margin", "0 auto"),
                ("display", "grid"),
                ("grid-template-columns", "repeat(auto-fit, minmax(200px, 1fr))"),
                ("gap", "2rem"),
            ],
        )
        .rule(
            ".footer-section h3, .footer-section h4",
            [("color", "var(--accent-color)"), ("margin-bottom", "0.75rem")],
        )
        .rule(
            ".footer-section a",
            [("display", "block"), ("color", "var(--text-secondary)"), ("margin-bottom", "0.5rem")],
        )
        .rule(".footer-section a:hover", [("color", "var(--accent-color)")])
        .rule(
            ".footer-bottom",
            [
                ("max-width", "1200px"),
                ("margin", "2rem auto 0"),
                ("padding-top", "1.5rem"),
                ("border-top", "1px solid var(--secondary-color)"),
                ("text-align", "center"),
                ("color", "var(--text-secondary)"),
                ("font-size", "0.875rem"),
            ],
        )
        .rule(".img-fallback", [("background", "var(--gradient-1)"), ("min-height", "140px")])
        .media(
            "(max-width: 900px)",
            vec![
                Rule::new(
                    ".hero",
                    [
                        ("grid-template-columns", "1fr"),
                        ("padding", "3rem 1.5rem"),
                        ("text-align", "center"),
                    ],
                ),
                Rule::new(".hero-title", [("font-size", "2.25rem")]),
                Rule::new(".game-info", [("grid-template-columns", "1fr")]),
            ],
        )
        .media(
            "(max-width: 768px)",
            vec![
                Rule::new(".top-nav", [("display", "none")]),
                Rule::new(".sidebar-toggle", [("display", "flex")]),
                Rule::new(".page-header h1", [("font-size", "2rem")]),
                Rule::new(".slider-prev, .slider-next", [("display", "none")]),
            ],
        )
        .media(
            "(prefers-reduced-motion: reduce)",
            vec![Rule::new(
                "*, *::before, *::after",
                [
                    ("transition-duration", "0.01ms !important"),
                    ("scroll-behavior", "auto !important"),
                ],
            )],
        )
}
