//! Search-engine scraping: requests, index heuristics and cache-date extraction

mod cache_date;
pub(crate) mod client;
mod index;
mod normalize;
pub(crate) mod rules;

pub(crate) use cache_date::{CacheDateExtractor, CacheLookup};
pub(crate) use client::{Fetcher, HttpFetcher, Throttled};
pub(crate) use index::IndexChecker;
pub(crate) use normalize::normalize;
