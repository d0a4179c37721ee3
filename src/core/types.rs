//! Result types produced while checking a batch of URLs

use chrono::NaiveDate;
use serde::Serialize;

use super::recency::classify_recency;

/// Verdict of the index heuristic for one search-results page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum IndexStatus {
    Indexed,
    NotIndexed,
    /// The engine answered with an anti-automation challenge
    Blocked,
}

/// Outcome of the index check for one URL.
/// `markup` is kept only so the cache-date extractor can scan it before fetching again.
#[derive(Debug, Clone)]
pub(crate) struct IndexResult {
    pub(crate) url: String,
    pub(crate) status: IndexStatus,
    /// Name of the heuristic rule that decided the verdict
    pub(crate) rule: &'static str,
    pub(crate) markup: String,
}

impl IndexResult {
    pub(crate) fn indexed(&self) -> bool {
        self.status == IndexStatus::Indexed
    }
}

/// Cache date recovered from a results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CacheDate {
    Parsed { date: NaiveDate, raw: String },
    /// Matched text that no known date format could read
    Unparsed { raw: String },
}

impl CacheDate {
    pub(crate) fn date(&self) -> Option<NaiveDate> {
        match self {
            CacheDate::Parsed { date, .. } => Some(*date),
            CacheDate::Unparsed { .. } => None,
        }
    }

    pub(crate) fn raw(&self) -> &str {
        match self {
            CacheDate::Parsed { raw, .. } | CacheDate::Unparsed { raw } => raw,
        }
    }
}

/// Whether the cache date falls inside the recent window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) enum Recency {
    Yes,
    No,
    Unknown,
}

impl Recency {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Recency::Yes => "Yes",
            Recency::No => "No",
            Recency::Unknown => "Unknown",
        }
    }
}

/// Final status of one input URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RowStatus {
    Indexed,
    NotIndexed,
    Blocked,
    /// The index query itself failed (timeout, connection, HTTP status)
    Failed(String),
}

impl RowStatus {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            RowStatus::Indexed => "Yes",
            RowStatus::NotIndexed => "No",
            RowStatus::Blocked => "Blocked",
            RowStatus::Failed(_) => "Error",
        }
    }

    pub(crate) fn key(&self) -> &'static str {
        match self {
            RowStatus::Indexed => "indexed",
            RowStatus::NotIndexed => "not_indexed",
            RowStatus::Blocked => "blocked",
            RowStatus::Failed(_) => "error",
        }
    }
}

impl From<IndexStatus> for RowStatus {
    fn from(status: IndexStatus) -> Self {
        match status {
            IndexStatus::Indexed => RowStatus::Indexed,
            IndexStatus::NotIndexed => RowStatus::NotIndexed,
            IndexStatus::Blocked => RowStatus::Blocked,
        }
    }
}

/// One output row per input URL. Fields are fixed at construction.
#[derive(Debug, Clone)]
pub(crate) struct ResultRow {
    url: String,
    status: RowStatus,
    cached_date: Option<CacheDate>,
    recently_indexed: Recency,
    note: Option<String>,
}

impl ResultRow {
    /// Rows that are not indexed never carry a cache date and are always `Recency::No`.
    pub(crate) fn new(
        url: impl Into<String>,
        status: RowStatus,
        cached_date: Option<CacheDate>,
        note: Option<String>,
        today: NaiveDate,
    ) -> Self {
        let indexed = status == RowStatus::Indexed;
        let cached_date = if indexed { cached_date } else { None };
        let recently_indexed = if indexed {
            classify_recency(cached_date.as_ref(), today)
        } else {
            Recency::No
        };
        let note = note.or_else(|| match &status {
            RowStatus::Failed(message) => Some(message.clone()),
            RowStatus::Blocked => {
                Some("blocked by the search engine; raise the delay".to_string())
            }
            _ => None,
        });
        Self {
            url: url.into(),
            status,
            cached_date,
            recently_indexed,
            note,
        }
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    pub(crate) fn status(&self) -> &RowStatus {
        &self.status
    }

    pub(crate) fn indexed(&self) -> bool {
        self.status == RowStatus::Indexed
    }

    pub(crate) fn cached_date(&self) -> Option<&CacheDate> {
        self.cached_date.as_ref()
    }

    pub(crate) fn recently_indexed(&self) -> Recency {
        self.recently_indexed
    }

    pub(crate) fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// Rows collected by a batch run
#[derive(Debug, Default)]
pub(crate) struct BatchReport {
    pub(crate) rows: Vec<ResultRow>,
    /// Inputs that were selected for this run
    pub(crate) planned: usize,
    /// Set when Ctrl-C stopped the run early
    pub(crate) interrupted: bool,
    pub(crate) elapsed_ms: f64,
}

impl BatchReport {
    pub(crate) fn count(&self, key: &str) -> usize {
        self.rows.iter().filter(|r| r.status().key() == key).count()
    }

    pub(crate) fn recent(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.recently_indexed() == Recency::Yes)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn parsed(y: i32, m: u32, d: u32) -> CacheDate {
        CacheDate::Parsed {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            raw: format!("{y}-{m}-{d}"),
        }
    }

    #[test]
    fn not_indexed_row_is_never_recent() {
        let row = ResultRow::new(
            "https://example.com",
            RowStatus::NotIndexed,
            Some(parsed(2025, 6, 14)),
            None,
            today(),
        );
        assert_eq!(row.recently_indexed(), Recency::No);
        assert!(row.cached_date().is_none());
    }

    #[test]
    fn unparsed_date_on_indexed_row_is_unknown() {
        let row = ResultRow::new(
            "https://example.com",
            RowStatus::Indexed,
            Some(CacheDate::Unparsed {
                raw: "Smarch 3, 2025".to_string(),
            }),
            None,
            today(),
        );
        assert_eq!(row.recently_indexed(), Recency::Unknown);
    }

    #[test]
    fn unknown_only_for_indexed_rows() {
        for status in [
            RowStatus::NotIndexed,
            RowStatus::Blocked,
            RowStatus::Failed("timeout".to_string()),
        ] {
            let row = ResultRow::new(
                "u",
                status,
                Some(CacheDate::Unparsed {
                    raw: "??".to_string(),
                }),
                None,
                today(),
            );
            assert_eq!(row.recently_indexed(), Recency::No);
        }
    }

    #[test]
    fn failed_row_carries_error_note() {
        let row = ResultRow::new(
            "u",
            RowStatus::Failed("HTTP status 429".to_string()),
            None,
            None,
            today(),
        );
        assert_eq!(row.note(), Some("HTTP status 429"));
        assert_eq!(row.status().label(), "Error");
        assert!(!row.indexed());
    }

    #[test]
    fn blocked_row_has_hint() {
        let row = ResultRow::new("u", RowStatus::Blocked, None, None, today());
        assert!(row.note().unwrap().contains("delay"));
    }

    #[test]
    fn report_counts_by_status() {
        let report = BatchReport {
            rows: vec![
                ResultRow::new("a", RowStatus::Indexed, Some(parsed(2025, 6, 10)), None, today()),
                ResultRow::new("b", RowStatus::Indexed, None, None, today()),
                ResultRow::new("c", RowStatus::Blocked, None, None, today()),
            ],
            planned: 3,
            interrupted: false,
            elapsed_ms: 0.0,
        };
        assert_eq!(report.count("indexed"), 2);
        assert_eq!(report.count("blocked"), 1);
        assert_eq!(report.count("error"), 0);
        assert_eq!(report.recent(), 1);
    }
}
