use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod analyze;
mod chat;
mod display;
mod sources;
mod trends;
mod updates;


#[derive(Debug, Parser)]
#[command(name = "regwatch")]
#[command(about = "Regulatory filing aggregation and analysis")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the configured regulatory sources
    Categories,
    /// Show the latest document published for one source
    Updates {
        /// Source category (e.g., CFTC)
        #[arg(long)]
        category: String,
        /// Maximum number of records to show (defaults to REGWATCH_PREVIEW_LIMIT)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Aggregate every source and show category, date and keyword trends
    Trends {
        /// Number of keywords to show
        #[arg(long, default_value = "20")]
        top: usize,
        /// Print the full summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sentiment, entities and language structure for one document text
    Analyze {
        /// Source category (e.g., FCA)
        #[arg(long)]
        category: String,
        /// Which of the latest document's content texts to analyze
        #[arg(long, default_value = "0")]
        index: usize,
    },
    /// Ask the conversational bot a question
    Chat {
        /// Free-form question
        question: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = regwatch_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Categories) => sources::run_categories(&config)?,
        Some(Commands::Updates { category, limit }) => {
            updates::run_updates(&config, &category, limit.unwrap_or(config.preview_limit)).await?;
        }
        Some(Commands::Trends { top, json }) => trends::run_trends(&config, top, json).await?,
        Some(Commands::Analyze { category, index }) => {
            analyze::run_analyze(&config, &category, index).await?;
        }
        Some(Commands::Chat { question }) => chat::run_chat(&config, &question).await?,
        None => println!("regwatch ready; run `regwatch --help` for commands"),
    }

    Ok(())
}
