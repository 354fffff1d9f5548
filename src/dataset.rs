//! CSV persistence for datasets.
//!
//! One row per listing. The nested sequences (`price_entries`,
//! `image_urls`) are embedded as JSON inside a single cell, so the file
//! stays flat while the structure remains recoverable on read.

use crate::models::{Dataset, Listing, PriceEntry, Source};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

const HEADER: &str =
    "source_url,title,year,denomination,grade,price,price_entries,image_urls,source";

/// Writes the dataset as CSV, overwriting any existing file. The parent
/// directory is created if absent.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
        }
    }

    let mut lines = Vec::with_capacity(dataset.len() + 1);
    lines.push(HEADER.to_string());

    for listing in dataset.iter() {
        lines.push(csv_row(listing)?);
    }

    let mut content = lines.join("\n");
    content.push('\n');

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write dataset: {}", path.display()))?;

    info!("Dataset saved to {} ({} rows)", path.display(), dataset.len());
    Ok(())
}

/// Reads a dataset previously written by [`write_csv`].
pub fn read_csv(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;

    let mut records = split_csv_records(&content).into_iter();
    let header = records.next().context("Dataset file is empty")?;
    if header != HEADER {
        anyhow::bail!("Unexpected dataset header: {}", header);
    }

    let mut dataset = Dataset::new();
    for (num, record) in records.enumerate() {
        if record.is_empty() {
            continue;
        }
        let listing =
            parse_row(&record).with_context(|| format!("Bad dataset row {}", num + 2))?;
        dataset.push(listing);
    }

    Ok(dataset)
}

fn csv_row(listing: &Listing) -> Result<String> {
    let price_entries = serde_json::to_string(&listing.price_entries)?;
    let image_urls = serde_json::to_string(&listing.image_urls)?;

    Ok([
        csv_escape(&listing.source_url),
        csv_escape(&listing.title),
        listing.year.map(|y| y.to_string()).unwrap_or_default(),
        listing.denomination.as_deref().map(csv_escape).unwrap_or_default(),
        listing.grade.as_deref().map(csv_escape).unwrap_or_default(),
        listing.price.map(|p| p.to_string()).unwrap_or_default(),
        csv_escape(&price_entries),
        csv_escape(&image_urls),
        listing.source.to_string(),
    ]
    .join(","))
}

fn parse_row(line: &str) -> Result<Listing> {
    let fields = split_csv_line(line);
    if fields.len() != 9 {
        anyhow::bail!("Expected 9 columns, found {}", fields.len());
    }

    let price_entries: Vec<PriceEntry> =
        serde_json::from_str(&fields[6]).context("Bad price_entries cell")?;
    let image_urls: Vec<String> =
        serde_json::from_str(&fields[7]).context("Bad image_urls cell")?;
    let source: Source = fields[8].parse().map_err(anyhow::Error::msg)?;

    Ok(Listing {
        source_url: fields[0].clone(),
        title: fields[1].clone(),
        year: if fields[2].is_empty() { None } else { Some(fields[2].parse()?) },
        denomination: if fields[3].is_empty() { None } else { Some(fields[3].clone()) },
        grade: if fields[4].is_empty() { None } else { Some(fields[4].clone()) },
        price: if fields[5].is_empty() { None } else { Some(fields[5].parse()?) },
        price_entries,
        image_urls,
        source,
    })
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Splits file content into records. A newline inside a quoted field is
/// part of the field, not a record boundary.
fn split_csv_records(content: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in content.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            '\n' if !in_quotes => records.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        records.push(current);
    }

    records
}

/// Splits one CSV record into unquoted fields, honoring `""` escapes.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}
