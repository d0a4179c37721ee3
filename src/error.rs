use std::path::PathBuf;

use thiserror::Error;

/// Run-level failures. Any of these aborts the run before (or instead of) writing output.
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    #[error("Cannot read {}: {message}", path.display())]
    ReadInput { path: PathBuf, message: String },

    #[error("Unsupported input format \"{extension}\" (expected .xlsx, .xlsm, .xls, .ods or .csv)")]
    UnsupportedFormat { extension: String },

    #[error("{} contains no worksheet", path.display())]
    EmptyWorkbook { path: PathBuf },

    #[error("Header row {row} is beyond the last row of the sheet ({rows} rows)")]
    HeaderOutOfRange { row: usize, rows: usize },

    #[error("Column \"{name}\" not found (available: {available})")]
    ColumnNotFound { name: String, available: String },

    #[error("No URL column found. Name a column \"Profile\" or put URLs in column B")]
    NoUrlColumn,

    #[error("No URLs found in column \"{column}\"")]
    NoUrls { column: String },

    #[error("Cannot write {}: {message}", path.display())]
    WriteOutput { path: PathBuf, message: String },

    #[error("Cannot read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a single outbound request. Captured into the URL's result row.
#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("request timed out")]
    Timeout,

    /// Non-2xx answer. The body is kept so a challenge page can still be recognised.
    #[error("HTTP status {status}")]
    Status { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("interrupted")]
    Interrupted,
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(status) => FetchError::Status {
                status,
                body: String::new(),
            },
            ureq::Error::Timeout(_) => FetchError::Timeout,
            other => FetchError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_display_date() {
        let e = AppError::InvalidDate {
            input: "abc".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Invalid date "abc" (expected YYYYMMDD or YYYY-MM-DD)"#
        );
    }

    #[test]
    fn app_error_display_timezone() {
        let e = AppError::InvalidTimezone {
            input: "Mars/Olympus".to_string(),
        };
        assert_eq!(e.to_string(), "Invalid timezone: Mars/Olympus");
    }

    #[test]
    fn app_error_display_setting() {
        let e = AppError::InvalidSetting {
            name: "delay",
            reason: "must be between 0 and 60 seconds".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid setting delay: must be between 0 and 60 seconds"
        );
    }

    #[test]
    fn app_error_display_column_not_found() {
        let e = AppError::ColumnNotFound {
            name: "Links".to_string(),
            available: "Name, Profile".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Column "Links" not found (available: Name, Profile)"#
        );
    }

    #[test]
    fn fetch_error_status() {
        let e = FetchError::Status {
            status: 429,
            body: "<html></html>".to_string(),
        };
        assert_eq!(e.to_string(), "HTTP status 429");
    }

    #[test]
    fn fetch_error_from_ureq_status() {
        let e: FetchError = ureq::Error::StatusCode(503).into();
        assert!(matches!(e, FetchError::Status { status: 503, .. }));
    }
}
