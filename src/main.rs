//! coin-scraper - numismatic listing scraper CLI
//!
//! Scrapes a reference catalog site and an auction marketplace, writes the
//! combined dataset to CSV, and downloads listing images.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coin_scraper::commands::{AuctionCommand, CatalogCommand, ImagesCommand, ScrapeCommand};
use coin_scraper::config::Config;
use coin_scraper::dataset;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "coin-scraper",
    version,
    about = "Numismatic listing scraper for catalog and auction coin sites"
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "COIN_PROXY")]
    proxy: Option<String>,

    /// Base delay between page requests in milliseconds
    #[arg(long, global = true, env = "COIN_DELAY")]
    delay: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape both sources, write the dataset, and download images
    #[command(alias = "run")]
    Scrape {
        /// Auction search term
        #[arg(default_value = "Morgan Dollar")]
        query: String,

        /// Number of auction result pages to fetch
        #[arg(short, long)]
        pages: Option<u32>,

        /// Catalog category URLs (defaults to the built-in category)
        #[arg(long, value_delimiter = ',')]
        categories: Option<Vec<String>>,

        /// Skip the image download pass
        #[arg(long)]
        skip_images: bool,
    },

    /// Walk catalog categories only
    Catalog {
        /// Category URLs (defaults to the built-in category)
        categories: Vec<String>,
    },

    /// Search the auction site only
    Auction {
        /// Search term
        query: String,

        /// Number of result pages to fetch
        #[arg(short, long)]
        pages: Option<u32>,
    },

    /// Download images referenced by an existing dataset CSV
    Images {
        /// Dataset CSV to read
        input: PathBuf,

        /// Directory to write images under
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

/// Routes all tracing output to the run's append-only log file.
fn init_logging(config: &Config, verbose: bool) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("Failed to open log file: {}", config.log_file.display()))?;

    let filter = if verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }

    init_logging(&config, cli.verbose)?;

    match cli.command {
        Commands::Scrape { query, pages, categories, skip_images } => {
            if let Some(pages) = pages {
                config.num_pages = pages;
            }
            if let Some(categories) = categories {
                config.category_urls = categories;
            }

            let path = config.dataset_path();
            let cmd = ScrapeCommand::new(config);
            let dataset = cmd.execute(&query, !skip_images).await?;

            println!("Scraped {} listings -> {}", dataset.len(), path.display());
        }

        Commands::Catalog { categories } => {
            if !categories.is_empty() {
                config.category_urls = categories;
            }

            let path = config.dataset_path();
            let cmd = CatalogCommand::new(config);
            let result = cmd.execute().await?;
            dataset::write_csv(&result, &path)?;

            println!("Scraped {} catalog listings -> {}", result.len(), path.display());
        }

        Commands::Auction { query, pages } => {
            if let Some(pages) = pages {
                config.num_pages = pages;
            }

            let path = config.dataset_path();
            let cmd = AuctionCommand::new(config);
            let result = cmd.execute(&query).await?;
            dataset::write_csv(&result, &path)?;

            println!("Scraped {} auction listings -> {}", result.len(), path.display());
        }

        Commands::Images { input, dir } => {
            if let Some(dir) = dir {
                config.image_dir = dir;
            }

            let image_dir = config.image_dir.clone();
            let cmd = ImagesCommand::new(config);
            let count = cmd.execute(&input).await?;

            println!("Processed {} listings -> {}", count, image_dir.display());
        }
    }

    Ok(())
}
