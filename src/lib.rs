//! coin-scraper - numismatic listing scraper for catalog and auction sites
//!
//! Extracts coin metadata, grade/price tables, and images from a reference
//! catalog site and an auction marketplace, normalizes the text into typed
//! fields, and persists the dataset plus downloaded images locally.

pub mod auction;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod images;
pub mod models;
pub mod text;

pub use config::Config;
pub use models::{Dataset, Listing, PriceEntry, Source};
