//! CSS selectors and endpoint constants for auction search pages.

use scraper::Selector;
use std::sync::LazyLock;

/// Search endpoint of the auction site.
pub const SEARCH_BASE_URL: &str = "https://coins.ha.com/c/search.zx";

/// Fixed query parameters sent with every search, before the term and page
/// number are substituted in.
pub const SEARCH_PARAMS: &[(&str, &str)] = &[
    ("saleNo", ""),
    ("type", "google-base"),
    ("ic", "100"),
    ("N", "0"),
    ("Nty", "1"),
    ("Ntk", "SI"),
    ("Nu", "QQQ"),
];

/// One auction lot card in the results list.
pub static ITEM_CARD: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".item-card").unwrap());

/// Lot title within a card.
pub static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".title").unwrap());

/// Lot photograph within a card.
pub static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

/// Current/realized price within a card.
pub static PRICE: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".price").unwrap());
