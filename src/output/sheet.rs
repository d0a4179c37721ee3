//! Result spreadsheet writer (.xlsx by default, .csv by extension)

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::core::{CacheDate, DateStyle, ResultRow};
use crate::error::AppError;

pub(crate) const HEADERS: [&str; 5] = [
    "URL",
    "Indexed",
    "Cached Date",
    "Indexed In Last 30 Days",
    "Note",
];

const COLUMN_WIDTHS: [f64; 5] = [60.0, 10.0, 14.0, 24.0, 40.0];

/// Cached date as written to the sheet: formatted when parsed, verbatim when not
pub(crate) fn cached_date_text(date: Option<&CacheDate>, style: DateStyle) -> String {
    match date {
        Some(CacheDate::Parsed { date, .. }) => style.format(*date),
        Some(CacheDate::Unparsed { raw }) => raw.clone(),
        None => String::new(),
    }
}

pub(crate) fn row_cells(row: &ResultRow, style: DateStyle) -> [String; 5] {
    [
        row.url().to_string(),
        row.status().label().to_string(),
        cached_date_text(row.cached_date(), style),
        row.recently_indexed().label().to_string(),
        row.note().unwrap_or("").to_string(),
    ]
}

pub(crate) fn write_results(path: &Path, rows: &[ResultRow], style: DateStyle) -> Result<(), AppError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    let result = if is_csv {
        write_csv(path, rows, style).map_err(|e| e.to_string())
    } else {
        write_xlsx(path, rows, style).map_err(|e| e.to_string())
    };
    result.map_err(|message| AppError::WriteOutput {
        path: path.to_path_buf(),
        message,
    })
}

fn write_csv(path: &Path, rows: &[ResultRow], style: DateStyle) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADERS)?;
    for row in rows {
        writer.write_record(row_cells(row, style))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(path: &Path, rows: &[ResultRow], style: DateStyle) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Results")?;

    for (col, (header, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
        worksheet.set_column_width(col as u16, width)?;
    }
    for (i, row) in rows.iter().enumerate() {
        for (col, cell) in row_cells(row, style).into_iter().enumerate() {
            worksheet.write_string(i as u32 + 1, col as u16, cell)?;
        }
    }
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;
    Ok(())
}
