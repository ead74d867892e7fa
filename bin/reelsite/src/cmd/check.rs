//! Check command - validate configuration and site input

use std::{collections::HashMap, path::Path};

use color_eyre::eyre::{Result, bail};
use reelsite_core::{Config, SiteInput, is_valid_slug};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration and the site input file.
pub fn run(config_path: &Path, input_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, ?input_path, strict, "Checking configuration and site input");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    match Config::load_with_env(config_path) {
        Ok(_) if !config_path.exists() => {
            println!("  ✓ No configuration file, defaults apply");
        }
        Ok(_) => println!("  ✓ Configuration valid"),
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
        }
    }

    println!("\nChecking site input...");
    match SiteInput::load(input_path) {
        Ok(input) => {
            println!(
                "  ✓ Loaded \"{}\" with {} game(s)",
                input.content.site_name,
                input.games.len()
            );
            validate_input(&input, &mut result);
        }
        Err(e) => {
            result.add_error(format!("Site input error: {e}"));
            println!("  ✗ Site input invalid: {e}");
        }
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Quick validation for the build command.
///
/// Fails on any error and returns the warnings otherwise.
pub fn quick_validate(input: &SiteInput) -> Result<Vec<String>> {
    let mut result = ValidationResult::default();
    validate_input(input, &mut result);

    if result.has_errors() {
        for err in &result.errors {
            println!("  ✗ {err}");
        }
        bail!("Site input has {} error(s)", result.errors.len());
    }

    Ok(result.warnings)
}

fn validate_input(input: &SiteInput, result: &mut ValidationResult) {
    if input.content.site_name.trim().is_empty() {
        result.add_error("content.site_name is empty");
    }

    if input.games.is_empty() {
        result.add_warning("No games: the games page and sliders will be empty");
    }

    let mut slugs: HashMap<&str, &str> = HashMap::new();
    let mut ids: HashMap<&str, usize> = HashMap::new();
    for game in &input.games {
        if !is_valid_slug(&game.slug) {
            result.add_error(format!(
                "Game {} ({}) has no usable slug: {:?}",
                game.id, game.name, game.slug
            ));
        } else if let Some(other) = slugs.insert(game.slug.as_str(), game.name.as_str()) {
            result.add_error(format!(
                "Duplicate slug \"{}\" for \"{}\" and \"{}\": pages would overwrite each other",
                game.slug, other, game.name
            ));
        }

        *ids.entry(game.id.as_str()).or_default() += 1;

        if game.demo_url.trim().is_empty() {
            result.add_warning(format!("Game \"{}\" has no demo URL", game.name));
        }
        if game.thumbnail_src().trim().is_empty() {
            result.add_warning(format!("Game \"{}\" has no thumbnail", game.name));
        }
    }

    let mut duplicated: Vec<_> = ids.into_iter().filter(|(_, n)| *n > 1).collect();
    duplicated.sort_unstable();
    for (id, n) in duplicated {
        result.add_warning(format!(
            "Game id \"{id}\" appears {n} times; similar-game matching uses ids"
        ));
    }

    for (label, url) in [
        ("images.hero_url", &input.images.hero_url),
        ("images.favicon_url", &input.images.favicon_url),
    ] {
        match url.as_deref() {
            None | Some("") => result.add_warning(format!("{label} not set")),
            Some(u) if !(u.starts_with("http://") || u.starts_with("https://")) => {
                result.add_warning(format!("{label} is not an http(s) URL: {u}"));
            }
            Some(_) => {}
        }
    }
}
