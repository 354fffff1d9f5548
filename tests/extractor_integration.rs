//! Integration tests for the page extractors using fixture files.

use coin_scraper::models::Source;
use coin_scraper::{auction, catalog, dataset};

const CATALOG_DETAIL_FIXTURE: &str = include_str!("fixtures/catalog_detail.html");
const CATALOG_CATEGORY_FIXTURE: &str = include_str!("fixtures/catalog_category.html");
const AUCTION_RESULTS_FIXTURE: &str = include_str!("fixtures/auction_results.html");

const DETAIL_URL: &str = "https://www.pcgs.com/coinfacts/coin/1881-morgan/7130";
const CATEGORY_URL: &str = "https://www.pcgs.com/coinfacts/category/morgan-dollars-1878-1921/744";
const SEARCH_URL: &str = "https://coins.ha.com/c/search.zx?search=Morgan+Dollar&page=1";

#[test]
fn test_catalog_detail_extraction() {
    let parser = catalog::Parser::new();
    let listing = parser.parse_detail(CATALOG_DETAIL_FIXTURE, DETAIL_URL).unwrap();

    assert_eq!(listing.title, "1881 Morgan Dollar");
    assert_eq!(listing.year, Some(1881));
    assert_eq!(listing.denomination, Some("Dollar".to_string()));
    assert_eq!(listing.source, Source::Catalog);

    // Four clean rows survive; unparseable price, empty grade, and the
    // one-cell row are all dropped silently
    assert_eq!(listing.price_entries.len(), 4);
    assert_eq!(listing.price_entries[0].grade, "VF-20");
    assert_eq!(listing.price_entries[0].price, 42.0);
    assert_eq!(listing.price_entries[3].grade, "MS-65");
    assert_eq!(listing.price_entries[3].price, 1250.0);

    // Image without src skipped; relative src resolved against the page URL
    assert_eq!(listing.image_urls.len(), 2);
    assert_eq!(
        listing.image_urls[0],
        "https://www.pcgs.com/coinfacts/images/7130-obverse.jpg"
    );
    assert_eq!(
        listing.image_urls[1],
        "https://images.pcgs.com/coinfacts/7130-reverse.jpg"
    );
}

#[test]
fn test_catalog_category_extraction() {
    let parser = catalog::Parser::new();
    let urls = parser.parse_category(CATALOG_CATEGORY_FIXTURE, CATEGORY_URL).unwrap();

    assert_eq!(urls.len(), 3);
    assert_eq!(urls[0], "https://www.pcgs.com/coinfacts/coin/1878-morgan/7072");
    assert_eq!(urls[2], "https://www.pcgs.com/coinfacts/coin/1880-morgan/7096");
}

#[test]
fn test_catalog_structural_failures_are_errors() {
    let parser = catalog::Parser::new();

    // Category without a coin grid
    let result = parser.parse_category("<html><body></body></html>", CATEGORY_URL);
    assert!(result.is_err());

    // Detail without a price guide: no partial record
    let result = parser.parse_detail("<html><h1>1881 Morgan Dollar</h1></html>", DETAIL_URL);
    assert!(result.is_err());
}

#[test]
fn test_auction_results_extraction() {
    let parser = auction::Parser::new();
    let listings = parser.parse_search(AUCTION_RESULTS_FIXTURE, SEARCH_URL);

    // Placeholder card without a title is skipped
    assert_eq!(listings.len(), 3);

    let first = &listings[0];
    assert_eq!(first.title, "1921 Morgan Dollar MS63 PCGS");
    assert_eq!(first.year, Some(1921));
    assert_eq!(first.grade, Some("MS-63".to_string()));
    assert_eq!(first.price, Some(245.0));
    assert_eq!(first.image_urls, vec!["https://images.ha.com/lots/14001.jpg".to_string()]);
    assert_eq!(first.source, Source::Auction);
    assert_eq!(first.source_url, SEARCH_URL);

    // Lowercase grade and thousands separator normalized, relative image
    // resolved against the search URL
    let second = &listings[1];
    assert_eq!(second.grade, Some("MS-65".to_string()));
    assert_eq!(second.price, Some(1234.56));
    assert_eq!(second.image_urls, vec!["https://coins.ha.com/lots/14002.jpg".to_string()]);

    // No year, no grade, unparseable price: all absent, never an error
    let third = &listings[2];
    assert!(third.year.is_none());
    assert!(third.grade.is_none());
    assert!(third.price.is_none());
    assert!(third.image_urls.is_empty());
}

#[test]
fn test_extracted_listings_roundtrip_through_csv() {
    let catalog_parser = catalog::Parser::new();
    let auction_parser = auction::Parser::new();

    let mut combined = coin_scraper::Dataset::new();
    combined.push(catalog_parser.parse_detail(CATALOG_DETAIL_FIXTURE, DETAIL_URL).unwrap());
    for listing in auction_parser.parse_search(AUCTION_RESULTS_FIXTURE, SEARCH_URL) {
        combined.push(listing);
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coin_data.csv");
    dataset::write_csv(&combined, &path).unwrap();
    let read_back = dataset::read_csv(&path).unwrap();

    assert_eq!(read_back.len(), combined.len());
    for (original, parsed) in combined.iter().zip(read_back.iter()) {
        assert_eq!(parsed.title, original.title);
        assert_eq!(parsed.year, original.year);
        assert_eq!(parsed.grade, original.grade);
        assert_eq!(parsed.price, original.price);
        assert_eq!(parsed.price_entries, original.price_entries);
        assert_eq!(parsed.image_urls, original.image_urls);
        assert_eq!(parsed.source, original.source);
    }
}
