mod commands;
mod services;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "newsgauge")]
#[command(about = "Collect news about a company and report on its coverage sentiment")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find, extract and summarize recent articles about a subject
    Articles {
        /// Company or entity to research
        subject: String,

        /// Number of articles to collect (defaults to NEWSGAUGE_ARTICLE_COUNT)
        #[arg(long, value_parser = parse_count)]
        count: Option<usize>,
    },
    /// Analyze a JSON article list and print the comparative report (no search credentials needed)
    Analyze {
        /// Company or entity the articles are about
        subject: String,

        /// JSON file with an array of articles (Title, Content, optional Summary)
        #[arg(long)]
        input: PathBuf,
    },
    /// Run the full pipeline: acquire, enrich, aggregate and report
    Report {
        /// Company or entity to research
        subject: String,

        /// Number of articles to collect (defaults to NEWSGAUGE_ARTICLE_COUNT)
        #[arg(long, value_parser = parse_count)]
        count: Option<usize>,

        /// Fail instead of reporting on fewer articles than requested
        #[arg(long)]
        require_full: bool,

        /// Write the report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn parse_count(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("count must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid count '{raw}': {e}")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = newsgauge_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, model = %config.llm_model, "configuration loaded");

    let services = services::Services::from_config(&config)?;

    match cli.command {
        Commands::Articles { subject, count } => {
            let pipeline = services::build_pipeline(&config)?;
            commands::run_articles(
                &pipeline,
                &services,
                &subject,
                count.unwrap_or(config.article_count),
            )
            .await?;
        }
        Commands::Analyze { subject, input } => {
            commands::run_analyze(&services, &subject, &input).await?;
        }
        Commands::Report {
            subject,
            count,
            require_full,
            output,
        } => {
            let pipeline = services::build_pipeline(&config)?;
            commands::run_report(
                &pipeline,
                &services,
                &subject,
                count.unwrap_or(config.article_count),
                require_full,
                output.as_deref(),
            )
            .await?;
        }
    }

    Ok(())
}
