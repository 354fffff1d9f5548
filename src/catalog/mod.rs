//! Catalog source: HTTP client, page parsing, and CSS selectors for the
//! reference price-guide site.

pub mod client;
pub mod parser;
pub mod selectors;

pub use client::{CatalogClient, CatalogFetch};
pub use parser::Parser;
