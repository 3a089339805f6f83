//! Main entry point for the VTV News Translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vtv_news_translator::cli::commands::{self, Commands};
use vtv_news_translator::TranslatorConfig;

/// VTV News Translator - Vietnamese news from foreign sources
#[derive(Parser, Debug)]
#[command(name = "vtv-news", version, about, long_about = None)]
struct Args {
    /// Configuration file (JSON or TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Maximum concurrent provider requests
    #[arg(long)]
    max_concurrent: Option<usize>,

    /// Minimum spacing between provider requests in milliseconds
    #[arg(long)]
    min_interval_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    let default_filter = format!(
        "{}={},vtv_news_translator={}",
        env!("CARGO_CRATE_NAME"),
        log_level,
        log_level
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match &args.config {
        Some(path) => TranslatorConfig::from_file(path)?,
        None => TranslatorConfig::load()?,
    };

    // Override config with CLI args if provided
    if let Some(max_concurrent) = args.max_concurrent {
        config.max_concurrent = max_concurrent;
    }
    if let Some(min_interval_ms) = args.min_interval_ms {
        config.min_request_interval_ms = min_interval_ms;
    }
    config.validate()?;

    // Execute command
    match args.command {
        Some(Commands::News {
            category,
            query,
            from,
            sort_by,
            json,
        }) => {
            commands::handle_news(config, category, query, from, sort_by, json).await?;
        }
        Some(Commands::Translate { text }) => {
            commands::handle_translate(config, text).await?;
        }
        Some(Commands::Categories) => {
            commands::handle_categories();
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
