//! Validated settings threaded through the checker, the extractor and the batch driver

use std::time::Duration;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Deserialize;

use crate::consts::{
    CHROME_USER_AGENT, DATE_FORMAT, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_DELAY_SECS,
    DEFAULT_ENDPOINT, DEFAULT_MAX_URLS, DMY_DATE_FORMAT, MAX_DELAY_SECS, MAX_URLS_CEILING,
    REQUEST_TIMEOUT, SAFARI_USER_AGENT,
};
use crate::error::AppError;

/// How the index query is phrased. The heuristic differs per strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum QueryStrategy {
    /// `site:<url>` (default)
    #[default]
    Site,
    /// The bare URL as the query
    Bare,
}

impl QueryStrategy {
    pub(crate) fn index_query(self, url: &str) -> String {
        match self {
            QueryStrategy::Site => format!("site:{url}"),
            QueryStrategy::Bare => url.to_string(),
        }
    }
}

pub(crate) fn cache_query(url: &str) -> String {
    format!("cache:{url}")
}

/// Browser identity sent with every request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum UserAgentPreset {
    /// Chrome 116 on Windows (default)
    #[default]
    Chrome,
    /// Safari 16 on macOS
    Safari,
}

impl UserAgentPreset {
    pub(crate) fn header_value(self) -> &'static str {
        match self {
            UserAgentPreset::Chrome => CHROME_USER_AGENT,
            UserAgentPreset::Safari => SAFARI_USER_AGENT,
        }
    }
}

/// Format of the `Cached Date` column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DateStyle {
    /// DD/MM/YYYY (default)
    #[default]
    Dmy,
    /// YYYY-MM-DD
    Iso,
}

impl DateStyle {
    pub(crate) fn format(self, date: NaiveDate) -> String {
        match self {
            DateStyle::Dmy => date.format(DMY_DATE_FORMAT).to_string(),
            DateStyle::Iso => date.format(DATE_FORMAT).to_string(),
        }
    }
}

/// Request and pacing settings for one run
#[derive(Debug, Clone)]
pub(crate) struct CheckConfig {
    pub(crate) endpoint: String,
    pub(crate) user_agent: UserAgentPreset,
    pub(crate) accept_language: String,
    pub(crate) timeout: Duration,
    /// Minimum gap between two consecutive outbound requests
    pub(crate) delay: Duration,
    pub(crate) max_urls: usize,
    pub(crate) strategy: QueryStrategy,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: UserAgentPreset::default(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout: REQUEST_TIMEOUT,
            delay: Duration::from_secs_f64(DEFAULT_DELAY_SECS),
            max_urls: DEFAULT_MAX_URLS,
            strategy: QueryStrategy::default(),
        }
    }
}

pub(crate) fn validate_delay(secs: f64) -> Result<Duration, AppError> {
    if !secs.is_finite() || !(0.0..=MAX_DELAY_SECS).contains(&secs) {
        return Err(AppError::InvalidSetting {
            name: "delay",
            reason: format!("must be between 0 and {MAX_DELAY_SECS} seconds, got {secs}"),
        });
    }
    Ok(Duration::from_secs_f64(secs))
}

pub(crate) fn validate_max_urls(max: usize) -> Result<usize, AppError> {
    if max == 0 || max > MAX_URLS_CEILING {
        return Err(AppError::InvalidSetting {
            name: "max-urls",
            reason: format!("must be between 1 and {MAX_URLS_CEILING}, got {max}"),
        });
    }
    Ok(max)
}

pub(crate) fn validate_header_row(row: usize) -> Result<usize, AppError> {
    if row == 0 {
        return Err(AppError::InvalidSetting {
            name: "header-row",
            reason: "rows are numbered from 1".to_string(),
        });
    }
    Ok(row)
}

/// Lower bound on wall-clock time: one delay per URL, more when the cache query runs
pub(crate) fn expected_min_duration(urls: usize, delay: Duration) -> Duration {
    delay * urls as u32
}
