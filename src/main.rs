//! CLI entry point for site-builder

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use site_builder::commands::build::ReportFormat;
use site_builder::Site;

#[derive(Parser)]
#[command(name = "site-builder")]
#[command(version)]
#[command(about = "Render markdown posts and a content tree into a static site", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site into the output directory
    #[command(alias = "b")]
    Build {
        /// Base URL exposed to templates (overrides `url` in _config.yml)
        site_url: Option<String>,

        /// Exit with an error when any item failed
        #[arg(long)]
        strict: bool,

        /// Print the build report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new post dated today
    New {
        /// Title of the new post
        title: String,

        /// One-line summary
        #[arg(short, long)]
        summary: Option<String>,
    },

    /// List posts in build order
    List,

    /// Delete the output directory
    Clean,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "site_builder=debug,info"
    } else {
        "site_builder=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let site = Site::new(&base_dir)?;

    match cli.command {
        Commands::Build {
            site_url,
            strict,
            json,
        } => {
            let format = if json {
                ReportFormat::Json
            } else {
                ReportFormat::Text
            };
            let report = site_builder::commands::build::run(&site, site_url.as_deref(), format)?;
            if strict && !report.is_clean() {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::New { title, summary } => {
            let path = site.new_post(&title, summary.as_deref())?;
            println!("Created: {}", path.display());
        }

        Commands::List => {
            site_builder::commands::list::run(&site)?;
        }

        Commands::Clean => {
            tracing::info!("Cleaning output folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }
    }

    Ok(ExitCode::SUCCESS)
}
