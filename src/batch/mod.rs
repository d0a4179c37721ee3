//! Batch driver: spreadsheet in, one result row per URL out

mod column;
mod input;
mod progress;
mod runner;
mod urls;

pub(crate) use input::Sheet;
pub(crate) use progress::StderrProgress;
pub(crate) use runner::BatchRunner;
pub(crate) use urls::{UrlList, select_urls};
