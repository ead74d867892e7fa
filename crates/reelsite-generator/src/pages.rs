//! Typed page records.
//!
//! Each page type gets its own record holding exactly the data its template
//! needs. Game selection is positional: no ranking is applied.

use reelsite_core::{
    Content, Game,
    site::{AboutCopy, HomepageCopy, Section},
};

use crate::layout::Route;

/// Maximum number of games in the home page "popular" grid.
pub const POPULAR_GAMES: usize = 6;

/// Number of games in the home page "new" slider.
pub const NEW_GAMES: usize = 3;

/// Maximum number of games in a detail page "similar" slider.
pub const SIMILAR_GAMES: usize = 3;

/// Pages rendered through the legal template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegalKind {
    Terms,
    Privacy,
    Responsible,
    Contact,
}

impl LegalKind {
    /// Every legal page, in generation order.
    pub const ALL: [LegalKind; 4] = [
        LegalKind::Terms,
        LegalKind::Privacy,
        LegalKind::Responsible,
        LegalKind::Contact,
    ];

    /// URL segment and output file stem.
    #[must_use]
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Terms => "terms",
            Self::Privacy => "privacy",
            Self::Responsible => "responsible",
            Self::Contact => "contact",
        }
    }

    /// Fixed page title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Terms => "Terms & Conditions",
            Self::Privacy => "Privacy Policy",
            Self::Responsible => "Responsible Gaming",
            Self::Contact => "Contact Us",
        }
    }
}

/// First `min(6, n)` games.
#[must_use]
pub fn popular_games(games: &[Game]) -> Vec<&Game> {
    games.iter().take(POPULAR_GAMES).collect()
}

/// First three games, only when there are more than three in total.
#[must_use]
pub fn new_games(games: &[Game]) -> Vec<&Game> {
    if games.len() > NEW_GAMES {
        games.iter().take(NEW_GAMES).collect()
    } else {
        Vec::new()
    }
}

/// First three other games sharing the category of `game`.
#[must_use]
pub fn similar_games<'a>(game: &Game, all: &'a [Game]) -> Vec<&'a Game> {
    all.iter()
        .filter(|g| g.category == game.category && g.id != game.id)
        .take(SIMILAR_GAMES)
        .collect()
}

/// Distinct categories with their game counts, in order of first appearance.
#[must_use]
pub fn category_counts(games: &[Game]) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for game in games {
        match counts.iter_mut().find(|(c, _)| *c == game.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((game.category.as_str(), 1)),
        }
    }
    counts
}

#[derive(Debug, Clone)]
pub struct HomePage<'a> {
    pub copy: &'a HomepageCopy,
    pub popular: Vec<&'a Game>,
    pub new: Vec<&'a Game>,
}

impl<'a> HomePage<'a> {
    #[must_use]
    pub fn new(content: &'a Content, games: &'a [Game]) -> Self {
        Self {
            copy: &content.pages.homepage,
            popular: popular_games(games),
            new: new_games(games),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GamesPage<'a> {
    pub games: &'a [Game],
    pub categories: Vec<(&'a str, usize)>,
}

impl<'a> GamesPage<'a> {
    #[must_use]
    pub fn new(games: &'a [Game]) -> Self {
        Self {
            games,
            categories: category_counts(games),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameDetailPage<'a> {
    pub game: &'a Game,
    pub similar: Vec<&'a Game>,
}

impl<'a> GameDetailPage<'a> {
    #[must_use]
    pub fn new(game: &'a Game, all: &'a [Game]) -> Self {
        Self {
            game,
            similar: similar_games(game, all),
        }
    }

    #[must_use]
    pub fn route(&self) -> Route {
        Route::Game(self.game.slug.clone())
    }
}

#[derive(Debug, Clone)]
pub struct AboutPage<'a> {
    pub copy: &'a AboutCopy,
}

impl<'a> AboutPage<'a> {
    #[must_use]
    pub fn new(content: &'a Content) -> Self {
        Self {
            copy: &content.pages.about,
        }
    }
}

/// A legal or contact page. The title always comes from [`LegalKind::title`].
#[derive(Debug, Clone)]
pub struct LegalPage {
    pub kind: LegalKind,
    pub paragraphs: Vec<String>,
    pub email: Option<String>,
}

impl LegalPage {
    #[must_use]
    pub fn new(kind: LegalKind, content: &Content) -> Self {
        let site = &content.site_name;
        let legal = &content.pages.legal;
        let provided = |section: &Option<Section>| section.as_ref().map(|s| s.content.clone());

        let text = match kind {
            LegalKind::Terms => provided(&legal.terms).unwrap_or_else(|| {
                format!(
                    "These terms govern your use of {site}. By using our services, you agree to these terms. \
                     {site} is a social casino for entertainment purposes only and offers no real money gambling or prizes."
                )
            }),
            LegalKind::Privacy => provided(&legal.privacy).unwrap_or_else(|| {
                format!(
                    "{site} is committed to protecting your privacy. This policy explains how we collect and use your information \
                     and the choices you have about it."
                )
            }),
            LegalKind::Responsible => provided(&legal.responsible).unwrap_or_else(|| {
                "We promote responsible gaming practices. Our games are for entertainment only and do not offer real money gambling. \
                 Take regular breaks and set limits on the time you spend playing."
                    .to_string()
            }),
            LegalKind::Contact => content.pages.contact.content.clone().unwrap_or_else(|| {
                format!("Questions or feedback about {site}? Our support team is happy to help.")
            }),
        };

        let email = match kind {
            LegalKind::Contact => Some(
                content
                    .pages
                    .contact
                    .email
                    .clone()
                    .unwrap_or_else(|| default_support_email(site)),
            ),
            _ => None,
        };

        Self {
            kind,
            paragraphs: split_paragraphs(&text),
            email,
        }
    }

    #[must_use]
    pub fn route(&self) -> Route {
        Route::Legal(self.kind)
    }
}

fn default_support_email(site_name: &str) -> String {
    let local: String = site_name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    format!("support@{local}.com")
}

/// Split prose on blank lines into trimmed, non-empty paragraphs.
fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use reelsite_core::site::{CallToAction, ContactCopy, Hero, LegalCopy, Pages};

    use super::*;

    pub(crate) fn game(id: &str, category: &str) -> Game {
        Game {
            id: id.to_string(),
            name: format!("Game {id}"),
            slug: format!("game-{id}"),
            provider: "Demo Provider".to_string(),
            category: category.to_string(),
            thumbnail: format!("https://cdn.example/{id}.jpg"),
            local_thumbnail: None,
            demo_url: format!("https://demo.example/{id}"),
            description: format!("Play game {id}"),
            rtp: Some("96%".to_string()),
            volatility: None,
        }
    }

    pub(crate) fn games(n: usize) -> Vec<Game> {
        (0..n).map(|i| game(&i.to_string(), "slots")).collect()
    }

    pub(crate) fn content() -> Content {
        Content {
            site_name: "Lucky Reels".to_string(),
            site_tagline: None,
            pages: Pages {
                homepage: HomepageCopy {
                    hero: Hero {
                        headline: "Spin to win".to_string(),
                        subheadline: "Free social slots".to_string(),
                    },
                    about: Section {
                        title: "About Our Casino".to_string(),
                        content: "Entertainment first.".to_string(),
                    },
                    features: Vec::new(),
                    cta: CallToAction {
                        text: "Ready to start playing?".to_string(),
                        button: "Play Now".to_string(),
                    },
                },
                about: AboutCopy {
                    title: "About Us".to_string(),
                    sections: vec![Section {
                        title: "Our Story".to_string(),
                        content: "Built for fun.".to_string(),
                    }],
                },
                legal: LegalCopy::default(),
                contact: ContactCopy::default(),
            },
        }
    }

    #[test]
    fn test_popular_games_length() {
        for (n, expected) in [(0, 0), (2, 2), (6, 6), (10, 6)] {
            assert_eq!(popular_games(&games(n)).len(), expected, "n = {n}");
        }
    }

    #[test]
    fn test_new_games_length() {
        for (n, expected) in [(0, 0), (1, 0), (3, 0), (4, 3), (10, 3)] {
            assert_eq!(new_games(&games(n)).len(), expected, "n = {n}");
        }
    }

    #[test]
    fn test_new_games_are_first_positions() {
        let all = games(5);
        let ids: Vec<_> = new_games(&all).iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, ["0", "1", "2"]);
    }

    #[test]
    fn test_similar_games_excludes_current_and_other_categories() {
        let all = vec![
            game("a", "slots"),
            game("b", "table"),
            game("c", "slots"),
            game("d", "slots"),
            game("e", "slots"),
            game("f", "slots"),
        ];

        let similar = similar_games(&all[0], &all);
        let ids: Vec<_> = similar.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, ["c", "d", "e"]);

        assert!(similar_games(&all[1], &all).is_empty());
    }

    #[test]
    fn test_category_counts_keep_first_appearance_order() {
        let all = vec![game("a", "table"), game("b", "slots"), game("c", "table")];
        assert_eq!(category_counts(&all), vec![("table", 2), ("slots", 1)]);
    }

    #[test]
    fn test_legal_titles() {
        let titles: Vec<_> = LegalKind::ALL.iter().map(LegalKind::title).collect();
        assert_eq!(
            titles,
            [
                "Terms & Conditions",
                "Privacy Policy",
                "Responsible Gaming",
                "Contact Us"
            ]
        );
    }

    #[test]
    fn test_legal_page_uses_provided_copy() {
        let mut content = content();
        content.pages.legal.privacy = Some(Section {
            title: "Ignored".to_string(),
            content: "First.\n\nSecond.".to_string(),
        });

        let page = LegalPage::new(LegalKind::Privacy, &content);
        assert_eq!(page.paragraphs, ["First.", "Second."]);
        assert!(page.email.is_none());
    }

    #[test]
    fn test_contact_page_default_email() {
        let page = LegalPage::new(LegalKind::Contact, &content());
        assert_eq!(page.email.as_deref(), Some("support@luckyreels.com"));
        assert_eq!(page.paragraphs.len(), 1);
    }
}
