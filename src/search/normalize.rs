use chrono::NaiveDate;

use crate::core::CacheDate;

/// Formats tried in order against textual dates. chrono accepts full and
/// abbreviated month names for both `%B` and `%b`.
const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%B %d %Y",
    "%d %B, %Y",
    "%Y-%m-%d",
];

/// Date text captured by an extraction pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawDate {
    pub(crate) text: String,
    /// Day, month and year captured directly as numerals
    pub(crate) numeric: Option<(u32, u32, i32)>,
    pub(crate) pattern: &'static str,
}

impl RawDate {
    pub(crate) fn text(text: impl Into<String>, pattern: &'static str) -> Self {
        Self {
            text: text.into(),
            numeric: None,
            pattern,
        }
    }
}

pub(crate) fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let cleaned = clean(text);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&cleaned, fmt).ok())
}

/// Collapse whitespace and drop abbreviation dots ("Jun. 1, 2025")
fn clean(text: &str) -> String {
    text.split_whitespace()
        .map(|part| part.trim_end_matches('.'))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text that no format can read is kept as `Unparsed` rather than dropped.
pub(crate) fn normalize(raw: &RawDate) -> CacheDate {
    let date = match raw.numeric {
        Some((day, month, year)) => NaiveDate::from_ymd_opt(year, month, day),
        None => parse_date_text(&raw.text),
    };
    match date {
        Some(date) => CacheDate::Parsed {
            date,
            raw: raw.text.clone(),
        },
        None => CacheDate::Unparsed {
            raw: raw.text.clone(),
        },
    }
}
