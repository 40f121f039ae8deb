//! Month/year resolution for timesheet documents.
//!
//! A document's period comes from its file name when it follows the
//! `Cartellino_MM_YYYY.pdf` convention, otherwise from date-like text printed
//! on its first pages.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::MonthYear;

/// Italian month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "gennaio",
    "febbraio",
    "marzo",
    "aprile",
    "maggio",
    "giugno",
    "luglio",
    "agosto",
    "settembre",
    "ottobre",
    "novembre",
    "dicembre",
];

/// How many leading pages are concatenated for the content fallback.
pub const CONTENT_FALLBACK_PAGES: usize = 3;

static FILE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Cartellino_(\d{2})_(\d{4})\.pdf").expect("regex is valid")
});

static MONTH_FIRST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})[/-](\d{4})\b").expect("regex is valid"));

static YEAR_FIRST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})[/-](\d{1,2})\b").expect("regex is valid"));

static MONTH_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b({})\s+(\d{{4}})\b", MONTH_NAMES.join("|")))
        .expect("regex is valid")
});

/// Resolve the period from a `Cartellino_MM_YYYY.pdf` file name.
pub fn from_file_name(file_name: &str) -> Option<MonthYear> {
    let caps = FILE_NAME_RE.captures(file_name)?;
    let month = caps[1].parse::<u32>().ok()?;
    let year = caps[2].parse::<i32>().ok()?;
    MonthYear::new(month, year)
}

/// Resolve the period from free text.
///
/// Tries `MM/YYYY` (or `MM-YYYY`), then `YYYY-MM` (or `YYYY/MM`), then a
/// month name followed by a year. Within each notation the first occurrence
/// with a month in 1-12 wins.
pub fn from_content(text: &str) -> Option<MonthYear> {
    let month_first = MONTH_FIRST_RE.captures_iter(text).find_map(|caps| {
        let month = caps[1].parse::<u32>().ok()?;
        let year = caps[2].parse::<i32>().ok()?;
        MonthYear::new(month, year)
    });
    if month_first.is_some() {
        return month_first;
    }

    let year_first = YEAR_FIRST_RE.captures_iter(text).find_map(|caps| {
        let year = caps[1].parse::<i32>().ok()?;
        let month = caps[2].parse::<u32>().ok()?;
        MonthYear::new(month, year)
    });
    if year_first.is_some() {
        return year_first;
    }

    MONTH_NAME_RE.captures_iter(text).find_map(|caps| {
        let name = caps[1].to_lowercase();
        let month = MONTH_NAMES.iter().position(|m| *m == name)? as u32 + 1;
        let year = caps[2].parse::<i32>().ok()?;
        MonthYear::new(month, year)
    })
}

/// Resolve the period from page text: the first page alone, then the
/// concatenation of up to [`CONTENT_FALLBACK_PAGES`] leading pages.
pub fn from_pages<S: AsRef<str>>(pages: &[S]) -> Option<MonthYear> {
    let first = pages.first()?;
    if let Some(period) = from_content(first.as_ref()) {
        return Some(period);
    }

    let combined = pages
        .iter()
        .take(CONTENT_FALLBACK_PAGES)
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n");
    from_content(&combined)
}

/// Resolve the period for a document: file name first, then page content.
pub fn resolve<S: AsRef<str>>(file_name: &str, pages: &[S]) -> Option<MonthYear> {
    if let Some(period) = from_file_name(file_name) {
        return Some(period);
    }
    let period = from_pages(pages);
    tracing::debug!(
        file = file_name,
        resolved = period.is_some(),
        "period taken from page content"
    );
    period
}

// ── Tests ─────────────────────────────────────────────────────────────────────
