//! HTML parser for auction search-result pages.

use crate::auction::selectors;
use crate::models::{Listing, Source};
use crate::text;
use scraper::{ElementRef, Html};
use tracing::{debug, trace, warn};
use url::Url;

/// Parser for auction search-result HTML.
pub struct Parser;

impl Parser {
    /// Creates a new auction parser.
    pub fn new() -> Self {
        Self
    }

    /// Parses a results page into listings, one per lot card.
    ///
    /// A card that cannot be parsed (no title) is logged and skipped;
    /// a page with no cards at all simply yields zero listings.
    pub fn parse_search(&self, html: &str, page_url: &str) -> Vec<Listing> {
        let document = Html::parse_document(html);
        let base = Url::parse(page_url).ok();

        let mut listings = Vec::new();
        for card in document.select(&selectors::ITEM_CARD) {
            match self.parse_item_card(card, page_url, base.as_ref()) {
                Some(listing) => {
                    trace!("Parsed lot: {}", listing.title);
                    listings.push(listing);
                }
                None => warn!("Skipping auction card with no title on {}", page_url),
            }
        }

        debug!("Parsed {} lots from {}", listings.len(), page_url);
        listings
    }

    /// Parses one lot card. Returns `None` when the required title is
    /// absent; every other field is best-effort.
    fn parse_item_card(
        &self,
        card: ElementRef,
        page_url: &str,
        base: Option<&Url>,
    ) -> Option<Listing> {
        let title = card
            .select(&selectors::TITLE)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())?;

        // First image only; normalized to a 0/1-element sequence
        let image_urls = card
            .select(&selectors::IMAGE)
            .next()
            .and_then(|e| e.value().attr("src"))
            .and_then(|src| match base {
                Some(base) => base.join(src).ok().map(|u| u.to_string()),
                None => Some(src.to_string()),
            })
            .into_iter()
            .collect();

        let price = card
            .select(&selectors::PRICE)
            .next()
            .and_then(|e| text::parse_price(&e.text().collect::<String>()));

        Some(Listing {
            source_url: page_url.to_string(),
            year: text::parse_year(&title),
            grade: text::parse_grade(&title),
            title,
            denomination: None,
            price,
            price_entries: Vec::new(),
            image_urls,
            source: Source::Auction,
        })
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
