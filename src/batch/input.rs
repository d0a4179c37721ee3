//! Spreadsheet loading. Every format is flattened to a grid of trimmed strings
//! addressed by absolute (0-based) row and column.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use crate::error::AppError;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

#[derive(Debug, Clone, Default)]
pub(crate) struct Sheet {
    rows: Vec<Vec<String>>,
}

impl Sheet {
    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub(crate) fn load(path: &Path) -> Result<Self, AppError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if extension == "csv" {
            Self::load_csv(path)
        } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
            Self::load_workbook(path)
        } else {
            Err(AppError::UnsupportedFormat { extension })
        }
    }

    fn load_csv(path: &Path) -> Result<Self, AppError> {
        let read_err = |e: csv::Error| AppError::ReadInput {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(read_err)?;
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(read_err)?;
            rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
        }
        Ok(Self { rows })
    }

    /// First worksheet only. calamine trims leading empty rows/columns, so they are restored.
    fn load_workbook(path: &Path) -> Result<Self, AppError> {
        let read_err = |message: String| AppError::ReadInput {
            path: path.to_path_buf(),
            message,
        };
        let mut workbook = open_workbook_auto(path).map_err(|e| read_err(e.to_string()))?;
        let range = match workbook.worksheet_range_at(0) {
            Some(Ok(range)) => range,
            Some(Err(e)) => return Err(read_err(e.to_string())),
            None => {
                return Err(AppError::EmptyWorkbook {
                    path: path.to_path_buf(),
                });
            }
        };

        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<String>> = vec![Vec::new(); start_row as usize];
        for row in range.rows() {
            let mut cells = vec![String::new(); start_col as usize];
            cells.extend(row.iter().map(cell_text));
            rows.push(cells);
        }
        Ok(Self { rows })
    }

    #[cfg(test)]
    pub(crate) fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row, in cells
    pub(crate) fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// `header_row` is 1-based
    pub(crate) fn headers(&self, header_row: usize) -> Result<&[String], AppError> {
        header_row
            .checked_sub(1)
            .and_then(|i| self.rows.get(i))
            .map(Vec::as_slice)
            .ok_or(AppError::HeaderOutOfRange {
                row: header_row,
                rows: self.rows.len(),
            })
    }

    /// Cells below the header row in `column`, missing cells as empty strings
    pub(crate) fn column_below(&self, header_row: usize, column: usize) -> Vec<&str> {
        self.rows
            .iter()
            .skip(header_row)
            .map(|row| row.get(column).map(String::as_str).unwrap_or(""))
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}
