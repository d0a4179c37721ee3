//! Core module - result types, recency policy and run settings

mod recency;
mod settings;
mod types;

pub(crate) use recency::classify_recency;
pub(crate) use settings::{
    CheckConfig, DateStyle, QueryStrategy, UserAgentPreset, cache_query, expected_min_duration,
    validate_delay, validate_header_row, validate_max_urls,
};
pub(crate) use types::{BatchReport, CacheDate, IndexResult, IndexStatus, Recency, ResultRow, RowStatus};
