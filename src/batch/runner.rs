//! Sequential batch driver: one URL at a time, index check then cache date

use std::sync::atomic::AtomicBool;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::core::{BatchReport, CacheDate, IndexStatus, ResultRow, RowStatus};
use crate::error::FetchError;
use crate::search::{CacheDateExtractor, CacheLookup, Fetcher, IndexChecker};
use crate::utils::is_stopped;

use super::progress::Progress;

pub(crate) struct BatchRunner<'a> {
    fetcher: &'a dyn Fetcher,
    index: IndexChecker,
    dates: CacheDateExtractor,
    today: NaiveDate,
    stop: &'a AtomicBool,
}

impl<'a> BatchRunner<'a> {
    pub(crate) fn new(
        fetcher: &'a dyn Fetcher,
        index: IndexChecker,
        dates: CacheDateExtractor,
        today: NaiveDate,
        stop: &'a AtomicBool,
    ) -> Self {
        Self {
            fetcher,
            index,
            dates,
            today,
            stop,
        }
    }

    /// Returns `None` only when interrupted before the index query went out.
    pub(crate) fn check_url(&self, url: &str) -> Option<ResultRow> {
        let index = match self.index.check(self.fetcher, url) {
            Ok(result) => result,
            Err(FetchError::Interrupted) => return None,
            Err(e) => {
                warn!(url, error = %e, "index query failed");
                return Some(self.row(url, RowStatus::Failed(e.to_string()), None, None));
            }
        };

        match index.status {
            IndexStatus::Blocked => {
                warn!(url, rule = index.rule, "blocked by search engine");
                Some(self.row(url, RowStatus::Blocked, None, None))
            }
            IndexStatus::NotIndexed => Some(self.row(url, RowStatus::NotIndexed, None, None)),
            IndexStatus::Indexed => {
                let (date, note) = self.cache_date(url, &index.markup);
                Some(self.row(url, RowStatus::Indexed, date, note))
            }
        }
    }

    /// The index page is scanned first; the `cache:` query only runs when it has no snapshot date.
    fn cache_date(&self, url: &str, index_markup: &str) -> (Option<CacheDate>, Option<String>) {
        let lookup = match self.dates.prescan(index_markup) {
            Some(date) => Ok(CacheLookup::Found(date)),
            None => self.dates.lookup(self.fetcher, url),
        };
        match lookup {
            Ok(CacheLookup::Found(date)) => {
                let note = match &date {
                    CacheDate::Unparsed { raw } => {
                        warn!(url, raw = raw.as_str(), "cache date not recognised");
                        Some(format!("unrecognised cache date: {raw}"))
                    }
                    CacheDate::Parsed { .. } => None,
                };
                (Some(date), note)
            }
            Ok(CacheLookup::NotFound) => (None, None),
            Ok(CacheLookup::Blocked) => (None, Some("cache lookup blocked".to_string())),
            Err(FetchError::Interrupted) => (None, Some("cache lookup interrupted".to_string())),
            Err(e) => {
                warn!(url, error = %e, "cache query failed");
                (None, Some(format!("cache lookup failed: {e}")))
            }
        }
    }

    fn row(
        &self,
        url: &str,
        status: RowStatus,
        date: Option<CacheDate>,
        note: Option<String>,
    ) -> ResultRow {
        ResultRow::new(url, status, date, note, self.today)
    }

    pub(crate) fn run(&self, urls: &[String], progress: &mut dyn Progress) -> BatchReport {
        let start = Instant::now();
        let total = urls.len();
        let mut report = BatchReport {
            rows: Vec::with_capacity(total),
            planned: total,
            ..BatchReport::default()
        };
        progress.begin(total);

        for (i, url) in urls.iter().enumerate() {
            if is_stopped(self.stop) {
                report.interrupted = true;
                break;
            }
            progress.item(i + 1, total, url);
            match self.check_url(url) {
                Some(row) => report.rows.push(row),
                None => {
                    report.interrupted = true;
                    break;
                }
            }
        }

        report.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        if report.interrupted {
            info!(done = report.rows.len(), total, "batch interrupted");
        } else {
            info!(total, elapsed_ms = report.elapsed_ms as u64, "batch finished");
        }
        progress.finish(&report);
        report
    }
}
