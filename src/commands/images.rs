//! Image download command: re-reads a dataset CSV and fetches its images.

use crate::config::Config;
use crate::dataset;
use crate::images::ImageFetcher;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Downloads the images referenced by a previously written dataset.
pub struct ImagesCommand {
    config: Config,
}

impl ImagesCommand {
    /// Creates a new images command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Reads the dataset at `input` and downloads every referenced image
    /// into the configured image directory. Returns the number of listings
    /// processed.
    pub async fn execute(&self, input: &Path) -> Result<usize> {
        let dataset = dataset::read_csv(input)
            .with_context(|| format!("Failed to load dataset: {}", input.display()))?;

        info!("Loaded {} listings from {}", dataset.len(), input.display());

        let fetcher = ImageFetcher::new(&self.config)?;
        fetcher.download(&dataset, &self.config.image_dir).await?;

        Ok(dataset.len())
    }
}
