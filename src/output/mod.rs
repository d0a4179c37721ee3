mod format;
mod json;
mod sheet;
mod table;

pub(crate) use format::format_duration;
pub(crate) use json::output_results_json;
pub(crate) use sheet::{cached_date_text, write_results};
pub(crate) use table::{ResultTableOptions, print_results_table, print_url_list};
