//! Image downloader for scraped listings.

use crate::catalog::client::delay;
use crate::config::Config;
use crate::models::{Dataset, Listing};
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Downloads listing images to disk, one file per image.
pub struct ImageFetcher {
    client: Client,
    delay_ms: u64,
    delay_jitter_ms: u64,
}

impl ImageFetcher {
    /// Creates a new image fetcher with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            delay_ms: config.image_delay_ms,
            delay_jitter_ms: config.image_delay_jitter_ms,
        })
    }

    /// Downloads every image of every listing into `output_dir`, creating
    /// the directory if absent.
    ///
    /// Each image is handled independently: a failed download or write is
    /// logged as a warning and the remaining images still run. No retries.
    pub async fn download(&self, dataset: &Dataset, output_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create image directory: {}", output_dir.display())
        })?;

        let mut saved = 0usize;
        for (idx, listing) in dataset.iter().enumerate() {
            for (img_idx, url) in listing.image_urls.iter().enumerate() {
                delay(self.delay_ms, self.delay_jitter_ms).await;

                let filename = image_filename(listing, idx, img_idx);
                let path = output_dir.join(&filename);

                match self.fetch_to_file(url, &path).await {
                    Ok(()) => {
                        info!("Successfully downloaded: {}", filename);
                        saved += 1;
                    }
                    Err(e) => warn!("Failed to download image {}: {}", url, e),
                }
            }
        }

        info!("Downloaded {} images to {}", saved, output_dir.display());
        Ok(())
    }

    async fn fetch_to_file(&self, url: &str, path: &Path) -> Result<()> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Status {}", status);
        }

        let bytes = response.bytes().await.context("Failed to read image body")?;
        std::fs::write(path, &bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }
}

/// Derives the image filename from the listing's year and grade plus the
/// record and image positions, matching `coin_{year}_{grade}_{idx}_{img}.jpg`.
fn image_filename(listing: &Listing, record_idx: usize, image_idx: usize) -> String {
    let year = listing.year.map(|y| y.to_string()).unwrap_or_else(|| "unknown_year".to_string());
    let grade = listing.grade.clone().unwrap_or_else(|| "unknown_grade".to_string());
    format!("coin_{}_{}_{}_{}.jpg", year, grade, record_idx, image_idx)
}
