//! Paginated plain-text report document.
//!
//! Renders a title line with the total day count, then the detail table with
//! its header repeated at the top of every page. Pages are separated by a
//! form feed. Columns are aligned by display width so accented weekday labels
//! line up.

use rise_core::formatting;
use rise_core::models::AttendanceRecord;
use unicode_width::UnicodeWidthStr;

use crate::views::YearSummaryRow;

/// Page separator between table pages.
pub const PAGE_BREAK: &str = "\u{c}";

const HEADER: [&str; 5] = ["Anno", "Data", "Giorno", "Entrata", "Uscita"];

/// Inputs to [`render_text_report`].
#[derive(Debug, Clone)]
pub struct ReportDocument<'a> {
    pub full_name: &'a str,
    pub marker: &'a str,
    pub total_days: usize,
    /// Detail rows, already sorted.
    pub rows: &'a [&'a AttendanceRecord],
    pub summary: &'a [YearSummaryRow],
    pub rows_per_page: usize,
}

/// Render the whole report as text.
pub fn render_text_report(doc: &ReportDocument<'_>) -> String {
    let mut out = String::new();
    out.push_str(&formatting::report_title(
        doc.full_name,
        doc.marker,
        doc.total_days,
    ));
    out.push_str("\n\n");

    if doc.rows.is_empty() {
        out.push_str(&formatting::empty_report_notice(doc.marker));
        out.push('\n');
        return out;
    }

    let cells: Vec<[String; 5]> = doc.rows.iter().map(|r| row_cells(r)).collect();
    let widths = column_widths(&cells);

    let per_page = doc.rows_per_page.max(1);
    let pages: Vec<String> = cells
        .chunks(per_page)
        .map(|chunk| render_page(chunk, &widths))
        .collect();
    out.push_str(&pages.join(&format!("{}\n", PAGE_BREAK)));

    if !doc.summary.is_empty() {
        out.push('\n');
        out.push_str(&formatting::days_with_marker_label(doc.marker));
        out.push('\n');
        for row in doc.summary {
            out.push_str(&format!(
                "  {}: {}\n",
                row.year,
                formatting::format_day_count(row.days)
            ));
        }
        out.push_str(&format!(
            "  Totale: {}\n",
            formatting::format_day_count(doc.total_days)
        ));
    }

    out
}

fn row_cells(record: &AttendanceRecord) -> [String; 5] {
    [
        record.year.to_string(),
        record.iso_date(),
        record.weekday_label.clone(),
        record.entry_time.clone(),
        record.exit_time.clone(),
    ]
}

fn column_widths(cells: &[[String; 5]]) -> [usize; 5] {
    let mut widths = HEADER.map(UnicodeWidthStr::width);
    for row in cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
    }
    widths
}

fn render_page(rows: &[[String; 5]], widths: &[usize; 5]) -> String {
    let mut page = String::new();
    page.push_str(&render_line(HEADER.iter().copied(), widths));
    page.push_str(&render_rule(widths));
    for row in rows {
        page.push_str(&render_line(row.iter().map(String::as_str), widths));
    }
    page
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize; 5]) -> String {
    let padded: Vec<String> = cells
        .zip(widths.iter())
        .map(|(cell, width)| pad(cell, *width))
        .collect();
    format!("{}\n", padded.join(" | ").trim_end())
}

fn render_rule(widths: &[usize; 5]) -> String {
    let parts: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    format!("{}\n", parts.join("-+-"))
}

/// Right-pad `text` with spaces to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
