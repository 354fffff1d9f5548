//! Text normalizers for raw listing text (years, prices, grades).

use regex::Regex;
use std::sync::LazyLock;

/// Four-digit mint year, 1700-2099.
static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b((?:17|18|19|20)\d{2})\b").unwrap());

/// Optional currency symbol, digit groups with optional thousands
/// separators, optional two-decimal fraction.
static PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?(\d[\d,]*(?:\.\d{2})?)").unwrap());

/// Grade prefix token, optional hyphen, numeric scale. Longer prefixes
/// listed first so FR-2 never resolves as F.
static GRADE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(MS|PR|AU|XF|VF|VG|AG|FR|F|G|P)-?(\d+)\b").unwrap()
});

/// Extracts the first 4-digit year from text.
///
/// Only years beginning with 17/18/19/20 are recognized, which bounds the
/// result to [1700, 2099].
pub fn parse_year(text: &str) -> Option<i32> {
    let caps = YEAR.captures(text)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Extracts the first price value from text, stripping thousands separators.
///
/// Returns `None` when the text carries no digits ("Call for price" and
/// friends). The pattern only admits unsigned values, so results are
/// non-negative by construction.
pub fn parse_price(text: &str) -> Option<f64> {
    let caps = PRICE.captures(text)?;
    let cleaned = caps.get(1)?.as_str().replace(',', "");
    cleaned.parse().ok()
}

/// Extracts the first numismatic grade from text, normalized to
/// `PREFIX-NUMBER` (e.g. "ms65" -> "MS-65").
///
/// Only the first grade-like substring is used; later occurrences in the
/// same title are ignored.
pub fn parse_grade(text: &str) -> Option<String> {
    let caps = GRADE.captures(text)?;
    let prefix = caps.get(1)?.as_str().to_uppercase();
    let number: u32 = caps.get(2)?.as_str().parse().ok()?;
    Some(format!("{}-{}", prefix, number))
}
