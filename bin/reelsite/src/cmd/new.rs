//! New command - scaffold a project directory

use std::{fs, path::Path};

use color_eyre::eyre::{Result, WrapErr, bail};
use reelsite_core::{
    Content, DesignSystem, Game, Images, SiteInput, slugify,
    site::{
        AboutCopy, CallToAction, ContactCopy, Feature, Hero, HomepageCopy, LegalCopy, Pages,
        Section,
    },
};

const CONFIG_FILE: &str = "reelsite.toml";
const INPUT_FILE: &str = "site.json";

const CONFIG_TEMPLATE: &str = r#"# reelsite configuration
# Every key is optional. Environment variables override values, e.g.
# REELSITE__SITE__BASE_URL=https://example.com

[site]
# Public URL used for canonical links, sitemap and robots.txt.
base_url = ""
lang = "en"

[build]
output_dir = "output"
# "standard" writes flat .html files, "traffic_armor" writes <page>.php
# with each game under games/<slug>/index.php.
deployment_type = "standard"
# templates_dir = "templates"

[download]
timeout_secs = 30

[robots]
disallow = ["/admin/", "/private/"]
allow = ["/"]
"#;

/// Run the new command.
///
/// Creates `dir` with a commented config file and a sample site input.
pub fn run(dir: &Path) -> Result<()> {
    tracing::info!(?dir, "Creating new project");

    let config_path = dir.join(CONFIG_FILE);
    let input_path = dir.join(INPUT_FILE);
    for path in [&config_path, &input_path] {
        if path.exists() {
            bail!("{} already exists", path.display());
        }
    }

    fs::create_dir_all(dir).wrap_err("Failed to create project directory")?;
    fs::write(&config_path, CONFIG_TEMPLATE).wrap_err("Failed to write config file")?;

    let json = serde_json::to_string_pretty(&sample_input())
        .wrap_err("Failed to serialize sample site input")?;
    fs::write(&input_path, json).wrap_err("Failed to write sample site input")?;

    tracing::info!(?config_path, ?input_path, "Created new project");
    println!("Created: {}", config_path.display());
    println!("Created: {}", input_path.display());
    println!();
    println!(
        "Next: reelsite --config {} build --input {}",
        config_path.display(),
        input_path.display()
    );

    Ok(())
}

/// A small but complete site input using the default design system.
pub fn sample_input() -> SiteInput {
    let section = |title: &str, content: &str| Section {
        title: title.to_string(),
        content: content.to_string(),
    };

    let content = Content {
        site_name: "Lucky Reels".to_string(),
        site_tagline: Some("Free social slots, just for fun".to_string()),
        pages: Pages {
            homepage: HomepageCopy {
                hero: Hero {
                    headline: "Spin the reels for free".to_string(),
                    subheadline: "Hundreds of social casino games, no deposit required.".to_string(),
                },
                about: section(
                    "About Lucky Reels",
                    "Lucky Reels is a social casino built for entertainment. No real money is ever wagered.",
                ),
                features: vec![
                    Feature {
                        title: "Free to play".to_string(),
                        description: "Every game runs in demo mode.".to_string(),
                    },
                    Feature {
                        title: "Top providers".to_string(),
                        description: "Titles from the studios players love.".to_string(),
                    },
                ],
                cta: CallToAction {
                    text: "Ready to start playing?".to_string(),
                    button: "Browse Games".to_string(),
                },
            },
            about: AboutCopy {
                title: "About Us".to_string(),
                sections: vec![
                    section("Our Mission", "Bring the fun of the casino floor to everyone, for free."),
                    section("Play Responsibly", "Our games are for entertainment only."),
                ],
            },
            legal: LegalCopy::default(),
            contact: ContactCopy::default(),
        },
    };

    let games = [
        ("1", "Golden Pharaoh", "Demo Studio", "slots", Some("96.2%"), Some("High")),
        ("2", "Fruit Frenzy", "Demo Studio", "slots", Some("95.8%"), Some("Low")),
        ("3", "Neon Nights", "Arcade Labs", "slots", None, Some("Medium")),
        ("4", "Royal Blackjack", "Table Works", "table", Some("99.5%"), None),
        ("5", "Diamond Roulette", "Table Works", "table", Some("97.3%"), None),
    ]
    .into_iter()
    .map(|(id, name, provider, category, rtp, volatility)| {
        let slug = slugify(name);
        Game {
            id: id.to_string(),
            name: name.to_string(),
            provider: provider.to_string(),
            category: category.to_string(),
            thumbnail: format!("images/games/{slug}.jpg"),
            local_thumbnail: None,
            demo_url: format!("https://demo.example.com/{slug}"),
            description: format!("{name} by {provider}. Play the free demo."),
            rtp: rtp.map(str::to_string),
            volatility: volatility.map(str::to_string),
            slug,
        }
    })
    .collect();

    SiteInput {
        content,
        design_system: DesignSystem::default(),
        images: Images::default(),
        games,
    }
}

#[cfg(test)]
mod tests {
    use reelsite_core::Config;

    use super::*;

    #[test]
    fn test_scaffold_files_load() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("site");
        run(&project).unwrap();

        let config = Config::load(&project.join(CONFIG_FILE)).unwrap();
        assert_eq!(config.build.output_dir, "output");
        assert!(config.build.templates_dir.is_none());

        let input = SiteInput::load(&project.join(INPUT_FILE)).unwrap();
        assert_eq!(input.content.site_name, "Lucky Reels");
        assert_eq!(input.games.len(), 5);
        assert_eq!(input.games[0].slug, "golden-pharaoh");
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path()).unwrap();
        assert!(run(dir.path()).is_err());
    }
}
