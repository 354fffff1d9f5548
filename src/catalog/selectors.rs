//! CSS selectors for catalog pages.
//!
//! All selectors used for parsing the catalog site live here. Update this
//! file when the site changes its HTML structure.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for category (coin grid) pages.
pub mod category {
    use super::*;

    /// Grid of coins in a category. Its presence is the structural
    /// readiness check for the page.
    pub static GRID: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".coin-grid").unwrap());

    /// Links to individual coin detail pages.
    pub static COIN_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".coin-grid a").unwrap());
}

/// Selectors for coin detail pages.
pub mod detail {
    use super::*;

    /// Page heading carrying the coin title.
    pub static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());

    /// Denomination label, when present.
    pub static DENOMINATION: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".denomination").unwrap());

    /// Price guide container. Its presence is the structural readiness
    /// check for the page.
    pub static PRICE_GUIDE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".price-guide").unwrap());

    /// One grade/price row of the price guide.
    pub static PRICE_ROW: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".price-guide tbody tr").unwrap());

    /// Cells within a price row.
    pub static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

    /// Coin photographs.
    pub static IMAGE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".coin-images img").unwrap());
}
