//! Data models for scraped coin listings.

use serde::{Deserialize, Serialize};

/// Which site a listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Reference catalog with a price-guide table per coin.
    Catalog,
    /// Auction marketplace with paginated search results.
    Auction,
}

impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "catalog" => Ok(Source::Catalog),
            "auction" => Ok(Source::Auction),
            _ => Err(format!("Unknown source: {}. Use: catalog, auction", s)),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Catalog => write!(f, "catalog"),
            Source::Auction => write!(f, "auction"),
        }
    }
}

/// One grade/price pair from a catalog price guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Grade cell text as it appeared on the page
    pub grade: String,
    /// Guide price in dollars
    pub price: f64,
}

/// One scraped coin listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// URL of the page the listing was extracted from
    pub source_url: String,
    /// Raw listing title
    pub title: String,
    /// Mint year extracted from the title, [1700, 2099]
    pub year: Option<i32>,
    /// Denomination text (catalog pages only)
    pub denomination: Option<String>,
    /// Normalized grade (`MS-65` style), auction titles only
    pub grade: Option<String>,
    /// Single listing price (auction only)
    pub price: Option<f64>,
    /// Price guide rows (catalog only), page order
    pub price_entries: Vec<PriceEntry>,
    /// Absolute image URLs, page order
    pub image_urls: Vec<String>,
    /// Originating site
    pub source: Source,
}

/// Ordered collection of listings; insertion order is scrape order.
///
/// No deduplication and no uniqueness constraint across `source_url`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub listings: Vec<Listing>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one listing.
    pub fn push(&mut self, listing: Listing) {
        self.listings.push(listing);
    }

    /// Appends all listings from another dataset, preserving order.
    pub fn extend(&mut self, other: Dataset) {
        self.listings.extend(other.listings);
    }

    /// Returns the number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Returns true if no listings were collected.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Iterates listings in scrape order.
    pub fn iter(&self) -> std::slice::Iter<'_, Listing> {
        self.listings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_catalog_listing() -> Listing {
        Listing {
            source_url: "https://example.com/coinfacts/morgan-1881/7130".to_string(),
            title: "1881 Morgan Dollar".to_string(),
            year: Some(1881),
            denomination: Some("Dollar".to_string()),
            grade: None,
            price: None,
            price_entries: vec![PriceEntry { grade: "MS-63".to_string(), price: 150.0 }],
            image_urls: vec![
                "https://example.com/images/obverse.jpg".to_string(),
                "https://example.com/images/reverse.jpg".to_string(),
            ],
            source: Source::Catalog,
        }
    }

    #[test]
    fn test_source_parsing() {
        assert_eq!("catalog".parse::<Source>().unwrap(), Source::Catalog);
        assert_eq!("AUCTION".parse::<Source>().unwrap(), Source::Auction);

        let err = "ebay".parse::<Source>().unwrap_err();
        assert!(err.contains("Unknown source"));
    }

    #[test]
    fn test_source_display_roundtrip() {
        assert_eq!(Source::Catalog.to_string().parse::<Source>().unwrap(), Source::Catalog);
        assert_eq!(Source::Auction.to_string().parse::<Source>().unwrap(), Source::Auction);
    }

    #[test]
    fn test_dataset_ordering() {
        let mut dataset = Dataset::new();
        assert!(dataset.is_empty());

        dataset.push(make_catalog_listing());
        let mut second = make_catalog_listing();
        second.title = "1882 Morgan Dollar".to_string();
        dataset.push(second);

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.listings[0].title, "1881 Morgan Dollar");
        assert_eq!(dataset.listings[1].title, "1882 Morgan Dollar");
    }

    #[test]
    fn test_dataset_extend_preserves_order() {
        let mut a = Dataset::new();
        a.push(make_catalog_listing());

        let mut b = Dataset::new();
        let mut auction = make_catalog_listing();
        auction.source = Source::Auction;
        b.push(auction);

        a.extend(b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.listings[0].source, Source::Catalog);
        assert_eq!(a.listings[1].source, Source::Auction);
    }

    #[test]
    fn test_dataset_allows_duplicate_urls() {
        let mut dataset = Dataset::new();
        dataset.push(make_catalog_listing());
        dataset.push(make_catalog_listing());
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_listing_serde() {
        let listing = make_catalog_listing();
        let json = serde_json::to_string(&listing).unwrap();
        assert!(json.contains("1881 Morgan Dollar"));
        assert!(json.contains("\"catalog\""));

        let parsed: Listing = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.title, listing.title);
        assert_eq!(parsed.year, Some(1881));
        assert_eq!(parsed.price_entries, listing.price_entries);
    }
}
