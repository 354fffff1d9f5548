//! Auction search command implementation.

use crate::auction::{AuctionClient, AuctionSearch, Parser};
use crate::config::Config;
use crate::models::Dataset;
use anyhow::{Context, Result};
use tracing::{debug, error, info};

/// Searches the auction site and extracts one listing per result card.
pub struct AuctionCommand {
    config: Config,
}

impl AuctionCommand {
    /// Creates a new auction command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches the configured number of result pages for `term`.
    pub async fn execute(&self, term: &str) -> Result<Dataset> {
        let client = AuctionClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, term).await
    }

    /// Searches with a provided client (for testing).
    ///
    /// A page that fails to fetch contributes zero listings; the error is
    /// logged and remaining pages still run.
    pub async fn execute_with_client(
        &self,
        client: &impl AuctionSearch,
        term: &str,
    ) -> Result<Dataset> {
        info!("Searching auctions for: {}", term);

        let parser = Parser::new();
        let mut dataset = Dataset::new();

        for page in 1..=self.config.num_pages {
            match client.search(term, page).await {
                Ok(html) => {
                    let page_url = client.search_url(term, page);
                    let listings = parser.parse_search(&html, &page_url);
                    debug!("Page {} yielded {} lots", page, listings.len());
                    for listing in listings {
                        dataset.push(listing);
                    }
                }
                Err(e) => error!("Error scraping auction page {}: {}", page, e),
            }
        }

        info!("Auction search collected {} listings", dataset.len());
        Ok(dataset)
    }
}
