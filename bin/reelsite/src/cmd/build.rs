//! Build command - generates the website

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use color_eyre::eyre::{Result, WrapErr};
use reelsite_core::{DeploymentType, SiteInput};
use reelsite_generator::WebsiteBuilder;

use super::{check::quick_validate, load_config};

/// Run the build command.
///
/// Loads the site input and writes the generated website to the output
/// directory (`--output`, else `build.output_dir`).
pub async fn run(
    config_path: &Path,
    input_path: &Path,
    output: Option<&Path>,
    deployment: Option<DeploymentType>,
    base_url: Option<&str>,
) -> Result<()> {
    let start = Instant::now();
    tracing::info!(
        ?config_path,
        ?input_path,
        ?output,
        ?deployment,
        ?base_url,
        "Starting build"
    );

    let mut config = load_config(config_path)?;

    if let Some(url) = base_url {
        tracing::info!(base_url = url, "Overriding site base_url from CLI");
        config.site.base_url = url.trim_end_matches('/').to_string();
        config.validate().wrap_err("Invalid --base-url")?;
    }

    if let Some(deployment) = deployment {
        config.build.deployment_type = deployment;
    }

    let output: PathBuf = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.build.output_dir));

    let input = SiteInput::load(input_path)
        .wrap_err_with(|| format!("Failed to load site input {}", input_path.display()))?;

    let warnings = quick_validate(&input).wrap_err("Site input failed validation")?;
    if !warnings.is_empty() {
        println!();
        println!("  Warnings:");
        for warn in &warnings {
            println!("  ⚠ {warn}");
        }
        println!();
    }

    tracing::debug!(?config, "Loaded configuration");
    let deployment = config.build.deployment_type;

    let builder = WebsiteBuilder::new(config, &output).wrap_err("Failed to set up build")?;
    let stats = builder.build(&input).await.wrap_err("Build failed")?;

    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Site:       {}", input.content.site_name);
    println!("  Deployment: {deployment}");
    println!("  Pages:      {}", stats.pages);
    println!("  Games:      {}", stats.games);
    println!("  Images:     {}", stats.downloaded);
    if !stats.skipped_downloads.is_empty() {
        println!("  Skipped:    {}", stats.skipped_downloads.len());
        for skipped in &stats.skipped_downloads {
            println!("    ⚠ {} ({})", skipped.url, skipped.reason);
        }
    }
    println!();
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", output.display());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::cmd::new;

    #[tokio::test]
    async fn test_build_scaffolded_site() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("casino");
        new::run(&project).unwrap();

        let output = dir.path().join("out");
        run(
            &project.join("reelsite.toml"),
            &project.join("site.json"),
            Some(&output),
            Some(DeploymentType::TrafficArmor),
            Some("https://casino.example/"),
        )
        .await
        .unwrap();

        assert!(output.join("index.php").is_file());
        assert!(output.join("css/style.css").is_file());
        let robots = fs::read_to_string(output.join("robots.txt")).unwrap();
        assert!(robots.contains("Sitemap: https://casino.example/sitemap.xml"));
    }

    #[tokio::test]
    async fn test_build_rejects_bad_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("casino");
        new::run(&project).unwrap();

        let result = run(
            &project.join("reelsite.toml"),
            &project.join("site.json"),
            Some(&dir.path().join("out")),
            None,
            Some("casino.example"),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_build_stops_on_validation_errors() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("casino");
        new::run(&project).unwrap();

        let input_path = project.join("site.json");
        let mut input = SiteInput::load(&input_path).unwrap();
        input.games[1].slug = input.games[0].slug.clone();
        fs::write(&input_path, serde_json::to_string(&input).unwrap()).unwrap();

        let output = dir.path().join("out");
        let result = run(
            &project.join("reelsite.toml"),
            &input_path,
            Some(&output),
            Some(DeploymentType::TrafficArmor),
            None,
        )
        .await;

        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_build_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            &dir.path().join("reelsite.toml"),
            &dir.path().join("missing.json"),
            Some(&dir.path().join("out")),
            None,
            None,
        )
        .await;
        assert!(result.is_err());
    }
}
