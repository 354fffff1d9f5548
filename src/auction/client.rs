//! HTTP client for auction search requests.

use crate::auction::selectors::{SEARCH_BASE_URL, SEARCH_PARAMS};
use crate::catalog::client::delay;
use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;
use wreq_util::Emulation;

/// Trait for auction search fetching - enables mocking for tests.
#[async_trait]
pub trait AuctionSearch: Send + Sync {
    /// Fetches one page of search results and returns the HTML response.
    async fn search(&self, term: &str, page: u32) -> Result<String>;

    /// Returns the URL a given search page is fetched from. Recorded as
    /// the source URL of listings extracted from that page.
    fn search_url(&self, term: &str, page: u32) -> String;
}

/// Auction HTTP client with browser impersonation and throttling delays.
pub struct AuctionClient {
    client: Client,
    delay_ms: u64,
    delay_jitter_ms: u64,
    base_url: Option<String>,
}

impl AuctionClient {
    /// Creates a new auction client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, None)
    }

    /// Creates a new auction client with an optional custom base URL
    /// (for testing).
    pub fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self> {
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
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
            base_url,
        })
    }

    /// Returns the base URL (custom for testing, or production endpoint).
    fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(SEARCH_BASE_URL)
    }
}

#[async_trait]
impl AuctionSearch for AuctionClient {
    async fn search(&self, term: &str, page: u32) -> Result<String> {
        delay(self.delay_ms, self.delay_jitter_ms).await;

        let url = self.search_url(term, page);
        info!("Searching auctions: {} (page {})", term, page);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
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

    fn search_url(&self, term: &str, page: u32) -> String {
        let encoded = urlencoding::encode(term);
        let mut url = format!("{}?", self.base_url());

        for (key, value) in SEARCH_PARAMS {
            url.push_str(&format!("{}={}&", key, value));
        }

        // Term appears both as the search text and the nav text parameter
        url.push_str(&format!("search={}&Ntt={}&page={}", encoded, encoded, page));
        url
    }
}
