use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod reddit;
mod twitter;


#[derive(Debug, Parser)]
#[command(name = "leadscout")]
#[command(about = "Find sales outreach leads on Reddit and Twitter/X")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search fitness subreddits for posts asking about workout apps
    Reddit {
        /// How many days back to keep posts
        #[arg(long, default_value_t = 7)]
        days: i64,

        /// Write all leads to this CSV file instead of the console
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Search recent tweets for people asking about workout apps
    Twitter {
        /// Write all leads to this CSV file instead of the console
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print manual search URLs instead of calling the API
        #[arg(long)]
        urls_only: bool,

        /// Open the search URLs in the default browser (implies --urls-only)
        #[arg(long)]
        open: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Reddit { days, output } => reddit::run(days, output).await,
        Commands::Twitter {
            output,
            urls_only,
            open,
        } => twitter::run(output, urls_only, open).await,
    }
}
