//! HTTP client for catalog requests using wreq for TLS fingerprint emulation.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::RngExt;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;
use wreq_util::Emulation;

/// Trait for catalog page fetching - enables mocking for tests.
#[async_trait]
pub trait CatalogFetch: Send + Sync {
    /// Fetches a category page and returns the HTML response.
    async fn category(&self, url: &str) -> Result<String>;

    /// Fetches a coin detail page.
    async fn detail(&self, url: &str) -> Result<String>;
}

/// Catalog HTTP client with browser impersonation and throttling delays.
pub struct CatalogClient {
    client: Client,
    delay_ms: u64,
    delay_jitter_ms: u64,
    detail_delay_ms: u64,
    detail_delay_jitter_ms: u64,
}

impl CatalogClient {
    /// Creates a new catalog client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        // Configure proxy if specified
        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
            detail_delay_ms: config.detail_delay_ms,
            detail_delay_jitter_ms: config.detail_delay_jitter_ms,
        })
    }

    /// Performs a GET request after a randomized throttling delay.
    async fn get(&self, url: &str, base_delay_ms: u64, jitter_ms: u64) -> Result<String> {
        delay(base_delay_ms, jitter_ms).await;

        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.5")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }
}

/// Sleeps for a base delay plus random jitter. Zero base and jitter skip
/// the sleep entirely (used by tests).
pub(crate) async fn delay(base_ms: u64, jitter_ms: u64) {
    if base_ms == 0 && jitter_ms == 0 {
        return;
    }

    let jitter = if jitter_ms > 0 { rand::rng().random_range(0..=jitter_ms) } else { 0 };

    let total = base_ms + jitter;
    debug!("Delaying {}ms", total);
    tokio::time::sleep(Duration::from_millis(total)).await;
}

#[async_trait]
impl CatalogFetch for CatalogClient {
    async fn category(&self, url: &str) -> Result<String> {
        info!("Fetching category: {}", url);
        self.get(url, self.delay_ms, self.delay_jitter_ms).await
    }

    async fn detail(&self, url: &str) -> Result<String> {
        info!("Fetching coin detail: {}", url);
        self.get(url, self.detail_delay_ms, self.detail_delay_jitter_ms).await
    }
}
