//! Cache-date extraction from `cache:` result pages

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::core::{CacheDate, cache_query};
use crate::error::FetchError;

use super::client::Fetcher;
use super::normalize::{RawDate, normalize};
use super::rules::RuleSet;

/// "It is a snapshot of the page as it appeared on Jun 1, 2025 10:22:14 GMT."
static ENGLISH_SNAPSHOT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)as it appeared on\s+([a-z]{3,9}\.?\s+\d{1,2},\s*\d{4}|\d{1,2}\s+[a-z]{3,9}\.?,?\s+\d{4})",
    )
    .unwrap()
});

/// "Đây là bản lưu trong bộ nhớ cache ... vào ngày 1 tháng 6 năm 2025" or "... 1 thg 6, 2025"
static VIETNAMESE_CACHE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)(?:cache|lưu).{0,400}?(?:ngày\s+)?(\d{1,2})\s+(?:tháng|thg)\s+(\d{1,2}),?\s+(?:năm\s+)?(\d{4})",
    )
    .unwrap()
});

static CACHED_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)Cached</a>.*?>([^<>]{10,80})<").unwrap());

static ENGLISH_MONTH_DAY_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]{3,9}\s+\d{1,2},\s*\d{4})").unwrap());

/// One way of locating a cache date in markup
#[derive(Debug, Clone)]
pub(crate) enum DatePattern {
    /// Group 1 is the date text
    Phrase { name: &'static str, regex: Regex },
    /// Groups 1..=3 are day, month and year numerals
    Numeric { name: &'static str, regex: Regex },
    /// Group 1 of `anchor` is a snippet that `date` is searched within
    Anchored {
        name: &'static str,
        anchor: Regex,
        date: Regex,
    },
}

impl DatePattern {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            DatePattern::Phrase { name, .. }
            | DatePattern::Numeric { name, .. }
            | DatePattern::Anchored { name, .. } => name,
        }
    }

    pub(crate) fn find(&self, markup: &str) -> Option<RawDate> {
        match self {
            DatePattern::Phrase { name, regex } => {
                let caps = regex.captures(markup)?;
                Some(RawDate::text(caps.get(1)?.as_str().trim(), name))
            }
            DatePattern::Numeric { name, regex } => {
                let caps = regex.captures(markup)?;
                let numeric = numeric_parts(&caps)?;
                let text = format!("{}/{}/{}", numeric.0, numeric.1, numeric.2);
                Some(RawDate {
                    text,
                    numeric: Some(numeric),
                    pattern: name,
                })
            }
            DatePattern::Anchored { name, anchor, date } => {
                let snippet = anchor.captures(markup)?.get(1)?.as_str().trim().to_string();
                let found = date.captures(&snippet)?.get(1)?.as_str().to_string();
                Some(RawDate::text(found, name))
            }
        }
    }
}

fn numeric_parts(caps: &Captures<'_>) -> Option<(u32, u32, i32)> {
    let day = caps.get(1)?.as_str().parse().ok()?;
    let month = caps.get(2)?.as_str().parse().ok()?;
    let year = caps.get(3)?.as_str().parse().ok()?;
    Some((day, month, year))
}

pub(crate) fn default_patterns() -> Vec<DatePattern> {
    vec![
        DatePattern::Phrase {
            name: "english-snapshot",
            regex: ENGLISH_SNAPSHOT.clone(),
        },
        DatePattern::Numeric {
            name: "vietnamese-cache",
            regex: VIETNAMESE_CACHE.clone(),
        },
        DatePattern::Anchored {
            name: "cached-anchor",
            anchor: CACHED_ANCHOR.clone(),
            date: ENGLISH_MONTH_DAY_YEAR.clone(),
        },
    ]
}

/// Result of the `cache:` query
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CacheLookup {
    Found(CacheDate),
    NotFound,
    Blocked,
}

#[derive(Debug, Clone)]
pub(crate) struct CacheDateExtractor {
    patterns: Vec<DatePattern>,
    challenges: RuleSet,
}

impl Default for CacheDateExtractor {
    fn default() -> Self {
        Self::new(default_patterns())
    }
}

impl CacheDateExtractor {
    pub(crate) fn new(patterns: Vec<DatePattern>) -> Self {
        Self {
            patterns,
            challenges: RuleSet::challenges(),
        }
    }

    /// First pattern that matches wins
    pub(crate) fn find(&self, markup: &str) -> Option<RawDate> {
        self.patterns.iter().find_map(|p| {
            let found = p.find(markup);
            if let Some(raw) = &found {
                debug!(pattern = p.name(), raw = raw.text.as_str(), "cache date matched");
            }
            found
        })
    }

    pub(crate) fn extract(&self, markup: &str) -> Option<CacheDate> {
        self.find(markup).map(|raw| normalize(&raw))
    }

    /// Scan an index results page before issuing the `cache:` query. Only phrase
    /// patterns apply: the looser ones match snippet publication dates there.
    pub(crate) fn prescan(&self, markup: &str) -> Option<CacheDate> {
        self.patterns
            .iter()
            .filter(|p| matches!(p, DatePattern::Phrase { .. }))
            .find_map(|p| p.find(markup))
            .map(|raw| {
                debug!(pattern = raw.pattern, raw = raw.text.as_str(), "cache date on index page");
                normalize(&raw)
            })
    }

    pub(crate) fn lookup(&self, fetcher: &dyn Fetcher, url: &str) -> Result<CacheLookup, FetchError> {
        let query = cache_query(url);
        debug!(query, "cache query");
        let markup = match fetcher.fetch(&query) {
            Ok(markup) => markup,
            // No cached copy is commonly answered with 404
            Err(FetchError::Status { status: 404, body }) if self.challenges.blocked_by(&body).is_none() => {
                return Ok(CacheLookup::NotFound);
            }
            Err(FetchError::Status { body, .. }) if self.challenges.blocked_by(&body).is_some() => {
                return Ok(CacheLookup::Blocked);
            }
            Err(e) => return Err(e),
        };
        if self.challenges.blocked_by(&markup).is_some() {
            warn!(url, "cache page is a challenge page");
            return Ok(CacheLookup::Blocked);
        }
        Ok(match self.extract(&markup) {
            Some(date) => CacheLookup::Found(date),
            None => CacheLookup::NotFound,
        })
    }
}
