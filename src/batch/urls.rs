use tracing::info;

use crate::error::AppError;

use super::column::{ColumnChoice, detect_column};
use super::input::Sheet;

/// URLs selected for a run, in sheet order
#[derive(Debug, Clone)]
pub(crate) struct UrlList {
    pub(crate) column: ColumnChoice,
    pub(crate) urls: Vec<String>,
    /// Non-blank URLs found before the cap was applied
    pub(crate) found: usize,
}

impl UrlList {
    pub(crate) fn truncated(&self) -> bool {
        self.found > self.urls.len()
    }
}

/// Blank cells are dropped, then the list is capped at `max_urls`.
pub(crate) fn select_urls(
    sheet: &Sheet,
    header_row: usize,
    explicit_column: Option<&str>,
    max_urls: usize,
) -> Result<UrlList, AppError> {
    let headers = sheet.headers(header_row)?;
    let column = detect_column(headers, sheet.width(), explicit_column)?;

    let mut urls: Vec<String> = sheet
        .column_below(header_row, column.index)
        .into_iter()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect();

    if urls.is_empty() {
        return Err(AppError::NoUrls {
            column: if column.name.is_empty() {
                column.letter()
            } else {
                column.name.clone()
            },
        });
    }

    let found = urls.len();
    urls.truncate(max_urls);
    info!(found, selected = urls.len(), max_urls, "collected URLs");

    Ok(UrlList {
        column,
        urls,
        found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: &[&[&str]]) -> Sheet {
        Sheet::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn keeps_order_and_drops_blanks() {
        let s = sheet(&[
            &["Name", "Profile"],
            &["a", "https://example.com/1"],
            &["b", "   "],
            &["c", ""],
            &["d", "https://example.com/4"],
        ]);
        let list = select_urls(&s, 1, None, 1000).unwrap();
        assert_eq!(list.urls, vec!["https://example.com/1", "https://example.com/4"]);
        assert_eq!(list.found, 2);
        assert!(!list.truncated());
    }

    #[test]
    fn caps_at_max_urls() {
        let s = sheet(&[&["Profile"], &["u1"], &["u2"], &["u3"]]);
        let list = select_urls(&s, 1, None, 2).unwrap();
        assert_eq!(list.urls, vec!["u1", "u2"]);
        assert_eq!(list.found, 3);
        assert!(list.truncated());
    }

    #[test]
    fn header_row_override() {
        let s = sheet(&[
            &["Report", ""],
            &["", ""],
            &["STT", "Profile"],
            &["1", "https://example.com/a"],
        ]);
        let list = select_urls(&s, 3, None, 10).unwrap();
        assert_eq!(list.urls, vec!["https://example.com/a"]);
    }

    #[test]
    fn empty_column_is_error() {
        let s = sheet(&[&["Name", "Profile"], &["a", ""]]);
        let err = select_urls(&s, 1, None, 10).unwrap_err();
        assert!(matches!(err, AppError::NoUrls { column } if column == "Profile"));
    }

    #[test]
    fn positional_unnamed_column_reports_letter() {
        let s = sheet(&[&["Name"], &["a", ""]]);
        let err = select_urls(&s, 1, None, 10).unwrap_err();
        assert!(matches!(err, AppError::NoUrls { column } if column == "B"));
    }
}
