//! CRA job listing harvester CLI.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ::harvest::{harvest, ChromeFetcher, CsvStore, HarvestConfig, OpenAi};

#[derive(Parser)]
#[command(name = "cra-harvest", version, about = "Harvest academic job listings from cra.org/ads")]
struct Cli {
    /// Path to the CSV file for output and duplicate checking
    #[arg(long, default_value = "cra_job_listings.csv")]
    csv: PathBuf,

    /// OpenAI API key (falls back to OPENAI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// OpenAI model to use
    #[arg(long, value_enum, default_value = "gpt-3.5-turbo")]
    model: Model,

    /// Path to the Chrome/Chromium binary
    #[arg(long)]
    browser_path: PathBuf,

    /// Number of additional links per listing to fetch for context
    #[arg(long, default_value_t = 0)]
    additional_links: usize,

    /// Maximum structuring attempts per listing
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    max_attempts: u32,

    /// Log verbosity
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum Model {
    #[value(name = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[value(name = "gpt-4")]
    Gpt4,
    #[value(name = "gpt-4o")]
    Gpt4o,
}

impl Model {
    fn as_str(&self) -> &'static str {
        match self {
            Model::Gpt35Turbo => "gpt-3.5-turbo",
            Model::Gpt4 => "gpt-4",
            Model::Gpt4o => "gpt-4o",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    fn directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            // tracing has no level above error
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

fn init_tracing(level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.directive())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let ai = match &cli.api_key {
        Some(key) => OpenAi::new(key),
        None => OpenAi::from_env().context("no API key given and OPENAI_API_KEY not set")?,
    }
    .with_model(cli.model.as_str());

    // Browser launch failure is the one fetch error that aborts the run.
    let fetcher =
        ChromeFetcher::launch(&cli.browser_path).context("failed to start browser session")?;
    let store = CsvStore::new(&cli.csv);

    let config = HarvestConfig::new()
        .with_additional_links(cli.additional_links)
        .with_max_attempts(cli.max_attempts);

    let report = harvest(&config, &fetcher, &ai, &store)
        .await
        .context("harvest run failed")?;

    info!(
        "Saved {} new listings to {} ({} known in total)",
        report.harvested,
        cli.csv.display(),
        report.known_links
    );

    Ok(())
}
