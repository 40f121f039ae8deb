//! Day-block segmentation of timesheet page text.
//!
//! Each page is walked line by line. A day-marker row (`05 Lu`) closes the
//! block in progress and opens a new one for that day; every other line is
//! appended to the open block. The end of the page closes the last block.
//! A closed block carrying the marker word and at least two `HH:MM` tokens
//! yields one [`AttendanceRecord`] per (entry, exit) pair.

use chrono::NaiveDate;
use rise_core::matchers::{find_time_tokens, DayMarker, MarkerMatcher};
use rise_core::models::{AttendanceRecord, MonthYear, YearDayIndex};
use tracing::debug;

// ── Scan results ──────────────────────────────────────────────────────────────

/// Everything extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentScan {
    /// Records in order of appearance.
    pub records: Vec<AttendanceRecord>,
    /// Blocks whose text contained the marker, with or without usable times.
    pub marker_blocks: usize,
    /// Dates of blocks that produced records.
    pub year_days: YearDayIndex,
}

impl DocumentScan {
    fn absorb(&mut self, page: DocumentScan) {
        self.records.extend(page.records);
        self.marker_blocks += page.marker_blocks;
        self.year_days.merge(&page.year_days);
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

/// One input to the segmenter loop.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineEvent<'a> {
    DayMarker(DayMarker),
    Text(&'a str),
    EndOfPage,
}

/// Day context of the block being accumulated.
#[derive(Debug, Clone)]
struct OpenDay {
    /// `None` when the printed day does not exist in the resolved month.
    date: Option<NaiveDate>,
    weekday_label: String,
}

#[derive(Debug, Clone)]
enum SegmenterState {
    /// Before the first day marker of the page.
    Scanning,
    InBlock(OpenDay),
}

/// Walks page text for one document.
pub struct BlockSegmenter<'m> {
    marker: &'m MarkerMatcher,
    period: Option<MonthYear>,
    source_file: String,
}

impl<'m> BlockSegmenter<'m> {
    /// `period` is the document's resolved month/year; when `None`, blocks
    /// are walked but never examined.
    pub fn new(
        marker: &'m MarkerMatcher,
        period: Option<MonthYear>,
        source_file: impl Into<String>,
    ) -> Self {
        Self {
            marker,
            period,
            source_file: source_file.into(),
        }
    }

    /// Scan every page of a document in order.
    pub fn scan_document<S: AsRef<str>>(&self, pages: &[S]) -> DocumentScan {
        let mut scan = DocumentScan::default();
        for page in pages {
            scan.absorb(self.scan_page(page.as_ref()));
        }
        debug!(
            "{}: {} marker blocks, {} records",
            self.source_file,
            scan.marker_blocks,
            scan.records.len()
        );
        scan
    }

    /// Scan a single page. Block state never carries over between pages.
    pub fn scan_page(&self, text: &str) -> DocumentScan {
        let events = text
            .lines()
            .map(|line| match DayMarker::parse(line) {
                Some(marker) => LineEvent::DayMarker(marker),
                None => LineEvent::Text(line),
            })
            .chain(std::iter::once(LineEvent::EndOfPage));

        let mut scan = DocumentScan::default();
        let mut state = SegmenterState::Scanning;
        let mut block: Vec<&str> = Vec::new();

        for event in events {
            match event {
                LineEvent::Text(line) => block.push(line),
                LineEvent::DayMarker(marker) => {
                    self.flush(&state, &block, &mut scan);
                    block.clear();
                    state = SegmenterState::InBlock(self.open_day(&marker));
                }
                LineEvent::EndOfPage => {
                    self.flush(&state, &block, &mut scan);
                    break;
                }
            }
        }

        scan
    }

    fn open_day(&self, marker: &DayMarker) -> OpenDay {
        OpenDay {
            date: self.period.and_then(|p| p.date(marker.day)),
            weekday_label: marker.weekday_label(),
        }
    }

    /// Examine a closed block and emit its records into `scan`.
    fn flush(&self, state: &SegmenterState, block: &[&str], scan: &mut DocumentScan) {
        if block.is_empty() {
            return;
        }
        let Some(period) = self.period else {
            return;
        };

        let text = block.join("\n");
        if !self.marker.is_match(&text) {
            return;
        }
        scan.marker_blocks += 1;

        let times = find_time_tokens(&text);
        if times.len() < 2 {
            return;
        }

        // Marker and times but no usable date: counted above, nothing emitted.
        let SegmenterState::InBlock(day) = state else {
            return;
        };
        let Some(date) = day.date else {
            return;
        };

        scan.year_days.insert(date);
        // Odd trailing token is dropped by chunks_exact.
        for (idx, pair) in times.chunks_exact(2).enumerate() {
            scan.records.push(AttendanceRecord {
                year: period.year,
                month: period.month,
                date,
                weekday_label: day.weekday_label.clone(),
                entry_time: pair[0].to_string(),
                exit_time: pair[1].to_string(),
                pair_index: idx as u32 + 1,
                source_file: self.source_file.clone(),
            });
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
