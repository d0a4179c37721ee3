use crate::batch::UrlList;
use crate::core::{BatchReport, DateStyle};

use super::format::{create_styled_table, header_cell, recency_color, status_color, styled_cell};
use super::sheet::{HEADERS, row_cells};

#[derive(Debug, Clone, Copy)]
pub(crate) struct ResultTableOptions {
    pub(crate) use_color: bool,
    pub(crate) date_style: DateStyle,
    /// Preview only the first rows; the sheet always has all of them
    pub(crate) limit: usize,
}

pub(crate) fn print_results_table(report: &BatchReport, opts: ResultTableOptions) {
    let c = opts.use_color;
    let mut table = create_styled_table();
    table.set_header(HEADERS.iter().map(|h| header_cell(h, c)).collect::<Vec<_>>());

    for row in report.rows.iter().take(opts.limit) {
        let cells = row_cells(row, opts.date_style);
        table.add_row(vec![
            styled_cell(&cells[0], None, false),
            styled_cell(&cells[1], status_color(row.status(), c), false),
            styled_cell(&cells[2], None, false),
            styled_cell(&cells[3], recency_color(row.recently_indexed(), c), false),
            styled_cell(&cells[4], None, false),
        ]);
    }

    println!("\n{table}");
    if report.rows.len() > opts.limit {
        println!(
            "  ... {} more rows in the output file",
            report.rows.len() - opts.limit
        );
    }
    print_summary(report, c);
}

fn print_summary(report: &BatchReport, use_color: bool) {
    let summary = format!(
        "{} checked | {} indexed | {} not indexed | {} blocked | {} errors | {} cached in last 30 days",
        report.rows.len(),
        report.count("indexed"),
        report.count("not_indexed"),
        report.count("blocked"),
        report.count("error"),
        report.recent(),
    );
    if use_color {
        println!("\n  {} | \x1b[36m{:.0}ms\x1b[0m", summary, report.elapsed_ms);
    } else {
        println!("\n  {} | {:.0}ms", summary, report.elapsed_ms);
    }
    if report.interrupted {
        println!(
            "  Interrupted: {} of {} URLs were checked",
            report.rows.len(),
            report.planned
        );
    }
    if report.count("blocked") > 0 {
        println!("  Some requests were blocked. Raise --delay or split the list into smaller batches.");
    }
    println!();
}

/// Column decision and URL sample for `inspect`
pub(crate) fn print_url_list(list: &UrlList, show: usize, use_color: bool) {
    let mut table = create_styled_table();
    table.set_header(vec![header_cell("#", use_color), header_cell("URL", use_color)]);
    for (i, url) in list.urls.iter().take(show).enumerate() {
        table.add_row(vec![styled_cell(&(i + 1).to_string(), None, false), styled_cell(url, None, false)]);
    }

    let name = if list.column.name.is_empty() {
        "(unnamed)"
    } else {
        list.column.name.as_str()
    };
    println!(
        "URL column: {} ({}) via {}",
        name,
        list.column.letter(),
        list.column.strategy
    );
    if list.column.candidates.len() > 1 {
        println!("Other candidates: {}", list.column.candidates.join(", "));
    }
    if list.truncated() {
        println!("URLs: {} found, {} selected (--max-urls)", list.found, list.urls.len());
    } else {
        println!("URLs: {}", list.urls.len());
    }
    println!("{table}");
}
