//! Catalog walk command implementation.

use crate::catalog::{CatalogClient, CatalogFetch, Parser};
use crate::config::Config;
use crate::models::Dataset;
use anyhow::{Context, Result};
use tracing::{debug, error, info};

/// Walks catalog categories and extracts one listing per coin page.
pub struct CatalogCommand {
    config: Config,
}

impl CatalogCommand {
    /// Creates a new catalog command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Walks every configured category and returns the collected dataset.
    pub async fn execute(&self) -> Result<Dataset> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client).await
    }

    /// Walks categories with a provided client (for testing).
    ///
    /// Failures are isolated: a category whose page cannot be fetched or
    /// whose grid never appears contributes zero listings; a coin page that
    /// fails contributes no record. Both are logged and the walk continues.
    pub async fn execute_with_client(&self, client: &impl CatalogFetch) -> Result<Dataset> {
        let parser = Parser::new();
        let mut dataset = Dataset::new();

        for category_url in &self.config.category_urls {
            info!("Walking category: {}", category_url);

            let coin_urls = match client.category(category_url).await {
                Ok(html) => match parser.parse_category(&html, category_url) {
                    Ok(urls) => urls,
                    Err(e) => {
                        error!("Error scraping category {}: {}", category_url, e);
                        continue;
                    }
                },
                Err(e) => {
                    error!("Error scraping category {}: {}", category_url, e);
                    continue;
                }
            };

            debug!("Category {} has {} coins", category_url, coin_urls.len());

            for coin_url in coin_urls {
                match client.detail(&coin_url).await {
                    Ok(html) => match parser.parse_detail(&html, &coin_url) {
                        Ok(listing) => dataset.push(listing),
                        Err(e) => error!("Error scraping coin detail {}: {}", coin_url, e),
                    },
                    Err(e) => error!("Error scraping coin detail {}: {}", coin_url, e),
                }
            }
        }

        info!("Catalog walk collected {} listings", dataset.len());
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Mock catalog client serving canned HTML per URL.
    struct MockCatalogClient {
        pages: HashMap<String, String>,
    }

    impl MockCatalogClient {
        fn new(pages: Vec<(&str, &str)>) -> Self {
            Self {
                pages: pages.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            }
        }
    }

    #[async_trait]
    impl CatalogFetch for MockCatalogClient {
        async fn category(&self, url: &str) -> Result<String> {
            self.pages.get(url).cloned().context("connection refused")
        }

        async fn detail(&self, url: &str) -> Result<String> {
            self.pages.get(url).cloned().context("connection refused")
        }
    }

    fn make_config(category_urls: Vec<String>) -> Config {
        Config {
            category_urls,
            delay_ms: 0,
            delay_jitter_ms: 0,
            detail_delay_ms: 0,
            detail_delay_jitter_ms: 0,
            ..Config::default()
        }
    }

    const CATEGORY_URL: &str = "https://www.pcgs.com/category/morgan-dollars/744";

    fn category_html(hrefs: &[&str]) -> String {
        let links: String =
            hrefs.iter().map(|h| format!(r#"<a href="{}">coin</a>"#, h)).collect();
        format!(r#"<html><body><div class="coin-grid">{}</div></body></html>"#, links)
    }

    fn detail_html(title: &str) -> String {
        format!(
            r#"<html><body>
                <h1>{}</h1>
                <table class="price-guide"><tbody>
                    <tr><td>MS-63</td><td>$150.00</td></tr>
                </tbody></table>
            </body></html>"#,
            title
        )
    }

    #[tokio::test]
    async fn test_catalog_walk_collects_listings() {
        let client = MockCatalogClient::new(vec![
            (CATEGORY_URL, &category_html(&["/coin/7130", "/coin/7132"])),
            ("https://www.pcgs.com/coin/7130", &detail_html("1881 Morgan Dollar")),
            ("https://www.pcgs.com/coin/7132", &detail_html("1882 Morgan Dollar")),
        ]);

        let cmd = CatalogCommand::new(make_config(vec![CATEGORY_URL.to_string()]));
        let dataset = cmd.execute_with_client(&client).await.unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.listings[0].title, "1881 Morgan Dollar");
        assert_eq!(dataset.listings[0].year, Some(1881));
        assert_eq!(dataset.listings[1].title, "1882 Morgan Dollar");
    }

    #[tokio::test]
    async fn test_missing_grid_contributes_zero_records() {
        let client = MockCatalogClient::new(vec![(
            CATEGORY_URL,
            "<html><body><p>down for maintenance</p></body></html>",
        )]);

        let cmd = CatalogCommand::new(make_config(vec![CATEGORY_URL.to_string()]));
        let dataset = cmd.execute_with_client(&client).await.unwrap();

        assert!(dataset.is_empty());
    }

    #[tokio::test]
    async fn test_failed_category_does_not_abort_others() {
        let good_category = "https://www.pcgs.com/category/peace-dollars/745";
        let client = MockCatalogClient::new(vec![
            // First category URL unknown to the mock: fetch fails
            (good_category, &category_html(&["/coin/7360"])),
            ("https://www.pcgs.com/coin/7360", &detail_html("1922 Peace Dollar")),
        ]);

        let cmd = CatalogCommand::new(make_config(vec![
            CATEGORY_URL.to_string(),
            good_category.to_string(),
        ]));
        let dataset = cmd.execute_with_client(&client).await.unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.listings[0].title, "1922 Peace Dollar");
    }

    #[tokio::test]
    async fn test_failed_detail_is_skipped() {
        let client = MockCatalogClient::new(vec![
            (CATEGORY_URL, &category_html(&["/coin/7130", "/coin/7131", "/coin/7132"])),
            ("https://www.pcgs.com/coin/7130", &detail_html("1881 Morgan Dollar")),
            // 7131 has no price guide: structural failure, no partial record
            ("https://www.pcgs.com/coin/7131", "<html><body><h1>1881-S</h1></body></html>"),
            ("https://www.pcgs.com/coin/7132", &detail_html("1882 Morgan Dollar")),
        ]);

        let cmd = CatalogCommand::new(make_config(vec![CATEGORY_URL.to_string()]));
        let dataset = cmd.execute_with_client(&client).await.unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.listings[0].title, "1881 Morgan Dollar");
        assert_eq!(dataset.listings[1].title, "1882 Morgan Dollar");
    }
}
