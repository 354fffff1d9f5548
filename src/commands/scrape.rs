//! Full-run command: both sources, dataset write, image download.

use crate::commands::{AuctionCommand, CatalogCommand};
use crate::config::Config;
use crate::dataset;
use crate::images::ImageFetcher;
use crate::models::Dataset;
use anyhow::Result;
use tracing::info;

/// Runs the complete pipeline: catalog walk, auction search, one dataset
/// write, then image downloads.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the full run. Catalog listings precede auction listings in
    /// the combined dataset; the dataset is written exactly once, after all
    /// walking completes.
    pub async fn execute(&self, term: &str, download_images: bool) -> Result<Dataset> {
        let mut combined = CatalogCommand::new(self.config.clone()).execute().await?;
        let auction = AuctionCommand::new(self.config.clone()).execute(term).await?;
        combined.extend(auction);

        dataset::write_csv(&combined, &self.config.dataset_path())?;

        if download_images {
            let fetcher = ImageFetcher::new(&self.config)?;
            fetcher.download(&combined, &self.config.image_dir).await?;
        } else {
            info!("Skipping image downloads");
        }

        Ok(combined)
    }
}
