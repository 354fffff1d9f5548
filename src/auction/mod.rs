//! Auction source: HTTP client, search-result parsing, and CSS selectors
//! for the auction marketplace.

pub mod client;
pub mod parser;
pub mod selectors;

pub use client::{AuctionClient, AuctionSearch};
pub use parser::Parser;
