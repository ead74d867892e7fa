//! reelsite CLI
//!
//! Generates social casino websites from a site input file.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use reelsite_core::DeploymentType;

/// Command-line interface for reelsite.
#[derive(Parser)]
#[command(
    name = "reelsite",
    version,
    about = "Generate social casino websites from content, design and game data"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "reelsite.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build a website from a site input file
    Build {
        /// Site input (JSON or YAML)
        #[arg(short, long)]
        input: PathBuf,
        /// Output directory (overrides build.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output layout (standard, traffic-armor)
        #[arg(short, long)]
        deployment: Option<DeploymentType>,
        /// Override site base URL (e.g., https://example.com)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Validate a site input file
    Check {
        /// Site input (JSON or YAML)
        #[arg(short, long)]
        input: PathBuf,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Scaffold a config file and a sample site input
    New {
        /// Directory to create
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    reelsite::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            input,
            output,
            deployment,
            base_url,
        } => {
            reelsite::cmd::build::run(
                &cli.config,
                &input,
                output.as_deref(),
                deployment,
                base_url.as_deref(),
            )
            .await?;
        }
        Commands::Check { input, strict } => {
            reelsite::cmd::check::run(&cli.config, &input, strict)?;
        }
        Commands::New { dir } => {
            reelsite::cmd::new::run(&dir)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_build_command_parsing() {
        let args = ["reelsite", "build", "--input", "site.json"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, PathBuf::from("reelsite.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Build {
                input,
                output,
                deployment,
                base_url,
            } => {
                assert_eq!(input, PathBuf::from("site.json"));
                assert!(output.is_none());
                assert!(deployment.is_none());
                assert!(base_url.is_none());
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_with_overrides() {
        let args = [
            "reelsite",
            "build",
            "-i",
            "site.yaml",
            "--output",
            "dist",
            "--deployment",
            "traffic-armor",
            "--base-url",
            "https://example.com",
        ];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Build {
                output,
                deployment,
                base_url,
                ..
            } => {
                assert_eq!(output, Some(PathBuf::from("dist")));
                assert_eq!(deployment, Some(DeploymentType::TrafficArmor));
                assert_eq!(base_url.as_deref(), Some("https://example.com"));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_noip_alias() {
        let args = ["reelsite", "build", "-i", "site.json", "-d", "noip"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Build { deployment, .. } => {
                assert_eq!(deployment, Some(DeploymentType::Standard));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_rejects_unknown_deployment() {
        let args = ["reelsite", "build", "-i", "site.json", "-d", "ftp"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_build_requires_input() {
        assert!(Cli::try_parse_from(["reelsite", "build"]).is_err());
    }

    #[test]
    fn test_cli_check_command_parsing() {
        let args = ["reelsite", "check", "--input", "site.json", "--strict"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Check { input, strict } => {
                assert_eq!(input, PathBuf::from("site.json"));
                assert!(strict);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_new_command_parsing() {
        let args = ["reelsite", "new", "my-casino"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::New { dir } => assert_eq!(dir, PathBuf::from("my-casino")),
            _ => panic!("Expected New command"),
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let args = ["reelsite", "-vvv", "check", "-i", "site.json"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_config_path() {
        let args = ["reelsite", "--config", "prod.toml", "new", "x"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.config, PathBuf::from("prod.toml"));
    }
}
