//! CLI command implementations.

pub mod auction;
pub mod catalog;
pub mod images;
pub mod scrape;

pub use auction::AuctionCommand;
pub use catalog::CatalogCommand;
pub use images::ImagesCommand;
pub use scrape::ScrapeCommand;
