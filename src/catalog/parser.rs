//! HTML parser for catalog category and coin detail pages.

use crate::catalog::selectors::{category, detail};
use crate::models::{Listing, PriceEntry, Source};
use crate::text;
use anyhow::{Context, Result};
use scraper::Html;
use tracing::{debug, trace};
use url::Url;

/// Parser for catalog HTML pages.
pub struct Parser;

impl Parser {
    /// Creates a new catalog parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses a category page into the list of absolute coin detail URLs.
    ///
    /// Fails when the coin grid is absent, which marks the category as
    /// unavailable; the caller logs and moves on.
    pub fn parse_category(&self, html: &str, page_url: &str) -> Result<Vec<String>> {
        let document = Html::parse_document(html);

        if document.select(&category::GRID).next().is_none() {
            anyhow::bail!("Coin grid did not appear on category page");
        }

        let base = Url::parse(page_url)
            .with_context(|| format!("Invalid category URL: {}", page_url))?;

        let mut urls = Vec::new();
        for link in document.select(&category::COIN_LINK) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            match base.join(href) {
                Ok(resolved) => urls.push(resolved.to_string()),
                Err(e) => trace!("Skipping unresolvable link {}: {}", href, e),
            }
        }

        debug!("Category page yielded {} coin links", urls.len());
        Ok(urls)
    }

    /// Parses a coin detail page into a listing.
    ///
    /// Fails when the price guide is absent (page treated as unavailable,
    /// no partial record) or the title heading is missing.
    pub fn parse_detail(&self, html: &str, page_url: &str) -> Result<Listing> {
        let document = Html::parse_document(html);

        if document.select(&detail::PRICE_GUIDE).next().is_none() {
            anyhow::bail!("Price guide did not appear on detail page");
        }

        let title = document
            .select(&detail::TITLE)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .context("Could not find coin title heading")?;

        let denomination = document
            .select(&detail::DENOMINATION)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string());

        // Grade/price rows: keep a row only when both cells yield data
        let mut price_entries = Vec::new();
        for row in document.select(&detail::PRICE_ROW) {
            let cells: Vec<_> = row.select(&detail::CELL).collect();
            if cells.len() < 2 {
                continue;
            }

            let grade = cells[0].text().collect::<String>().trim().to_string();
            let price = text::parse_price(&cells[1].text().collect::<String>());

            match (grade.is_empty(), price) {
                (false, Some(price)) => price_entries.push(PriceEntry { grade, price }),
                _ => trace!("Dropping incomplete price row on {}", page_url),
            }
        }

        let base = Url::parse(page_url)
            .with_context(|| format!("Invalid detail URL: {}", page_url))?;

        let mut image_urls = Vec::new();
        for img in document.select(&detail::IMAGE) {
            let Some(src) = img.value().attr("src") else {
                continue;
            };
            match base.join(src) {
                Ok(resolved) => image_urls.push(resolved.to_string()),
                Err(e) => trace!("Skipping unresolvable image {}: {}", src, e),
            }
        }

        debug!(
            "Parsed detail {}: {} price rows, {} images",
            page_url,
            price_entries.len(),
            image_urls.len()
        );

        Ok(Listing {
            source_url: page_url.to_string(),
            year: text::parse_year(&title),
            title,
            denomination,
            grade: None,
            price: None,
            price_entries,
            image_urls,
            source: Source::Catalog,
        })
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
