//! Line and token recognisers used by the block segmenter.
//!
//! Timesheet text comes out of PDF extraction loosely structured: each day
//! starts with a row such as `05 Lu`, followed by any number of lines holding
//! attendance codes and `HH:MM` clock readings.

use std::sync::LazyLock;

use regex::Regex;

// ── Weekday vocabulary ────────────────────────────────────────────────────────

/// Weekday abbreviations printed on the timesheet rows, Monday first.
pub const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Lu", "Ma", "Me", "Gi", "Ve", "Sa", "Do"];

/// Full display labels, aligned with [`WEEKDAY_ABBREVIATIONS`].
pub const WEEKDAY_LABELS: [&str; 7] = [
    "Lunedì",
    "Martedì",
    "Mercoledì",
    "Giovedì",
    "Venerdì",
    "Sabato",
    "Domenica",
];

/// Map a weekday token to its display label.
///
/// Abbreviations map to the full name; full names map to themselves; anything
/// else is returned unchanged.
pub fn weekday_label(token: &str) -> String {
    WEEKDAY_ABBREVIATIONS
        .iter()
        .position(|abbr| *abbr == token)
        .map(|i| WEEKDAY_LABELS[i].to_string())
        .unwrap_or_else(|| token.to_string())
}

// ── Day marker ────────────────────────────────────────────────────────────────

static DAY_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Full names first so the alternation does not stop at the abbreviation.
    let vocabulary: Vec<&str> = WEEKDAY_LABELS
        .iter()
        .chain(WEEKDAY_ABBREVIATIONS.iter())
        .copied()
        .collect();
    Regex::new(&format!(r"^\s*(\d{{1,2}})\s+({})\b", vocabulary.join("|")))
        .expect("regex is valid")
});

static TIME_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}:\d{2}").expect("regex is valid"));

/// A parsed day-marker row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayMarker {
    /// Day of month as printed. Not range-checked.
    pub day: u32,
    /// The weekday token exactly as printed, e.g. `"Lu"`.
    pub weekday: String,
}

impl DayMarker {
    /// Parse `line` as a day-marker row.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = DAY_MARKER_RE.captures(line)?;
        let day = caps[1].parse::<u32>().ok()?;
        Some(Self {
            day,
            weekday: caps[2].to_string(),
        })
    }

    /// Full display label for the weekday token.
    pub fn weekday_label(&self) -> String {
        weekday_label(&self.weekday)
    }
}

/// All `HH:MM` tokens in `text`, left to right.
pub fn find_time_tokens(text: &str) -> Vec<&str> {
    TIME_TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

// ── Marker word ───────────────────────────────────────────────────────────────

/// Default attendance code looked for in day blocks.
pub const DEFAULT_MARKER: &str = "RISE";

/// Case-insensitive matcher for the marker word that tolerates whitespace
/// between letters (`R I S E`, `Ri\nse`).
#[derive(Debug, Clone)]
pub struct MarkerMatcher {
    word: String,
    pattern: Regex,
}

impl MarkerMatcher {
    /// Build a matcher for `word`. Whitespace inside `word` is ignored.
    pub fn new(word: &str) -> Self {
        let letters: Vec<String> = word
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| regex::escape(&c.to_string()))
            .collect();
        let pattern = Regex::new(&format!(r"(?i){}", letters.join(r"\s*")))
            .expect("escaped marker is a valid regex");
        Self {
            word: word.to_string(),
            pattern,
        }
    }

    /// `true` when the marker occurs anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    pub fn word(&self) -> &str {
        &self.word
    }
}

impl Default for MarkerMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
