use std::time::Duration;

/// ISO date format used for `--today` and `--date-format iso`: "2025-06-01"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Day-first date format written to the output sheet by default: "01/06/2025"
pub(crate) const DMY_DATE_FORMAT: &str = "%d/%m/%Y";

pub(crate) const DEFAULT_ENDPOINT: &str = "https://www.google.com/search";
pub(crate) const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub(crate) const DEFAULT_DELAY_SECS: f64 = 2.0;
pub(crate) const MAX_DELAY_SECS: f64 = 60.0;

pub(crate) const DEFAULT_MAX_URLS: usize = 1000;
pub(crate) const MAX_URLS_CEILING: usize = 1000;

/// Size of the "recently indexed" window, inclusive on both ends
pub(crate) const RECENT_WINDOW_DAYS: i64 = 30;

/// Rows shown in the terminal preview table
pub(crate) const PREVIEW_ROWS: usize = 200;

pub(crate) const DEFAULT_OUTPUT_FILE: &str = "indexed_result.xlsx";

pub(crate) const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36";
pub(crate) const SAFARI_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.0 Safari/605.1.15";
