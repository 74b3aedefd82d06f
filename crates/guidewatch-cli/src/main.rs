mod detect;
mod snapshots;
mod status;
mod store;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "guidewatch")]
#[command(about = "Detect meaningful changes in scraped build-guide sources")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare current snapshots against stored hashes and write changes.json
    Detect {
        /// Override the configured significance threshold (strictly between 0 and 1)
        #[arg(long)]
        threshold: Option<f64>,

        /// Print the summary without persisting state, changes.json, or the flag file
        #[arg(long)]
        dry_run: bool,
    },
    /// Show snapshot and stored-hash presence for every configured source
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = guidewatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::debug!(env = %config.env, sources = %config.sources_path.display(), "loaded config");
    let sources = guidewatch_core::load_sources(&config.sources_path)?.sources;

    match cli.command {
        Commands::Detect { threshold, dry_run } => {
            detect::run_detect(&config, &sources, threshold, dry_run).await?;
        }
        Commands::Status => status::run_status(&config, &sources).await?,
    }

    Ok(())
}
