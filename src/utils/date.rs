use chrono::NaiveDate;

use crate::error::AppError;

/// Parse a user-supplied date (YYYYMMDD or YYYY-MM-DD)
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    let s = s.trim();
    if s.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d")
    {
        return Ok(d);
    }
    NaiveDate::parse_from_str(s, crate::consts::DATE_FORMAT).map_err(|_| AppError::InvalidDate {
        input: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_form() {
        assert_eq!(
            parse_date("20250615").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
        );
    }

    #[test]
    fn dashed_form() {
        assert_eq!(
            parse_date(" 2025-06-15 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
        );
    }

    #[test]
    fn invalid_is_error() {
        let err = parse_date("15/06/2025").unwrap_err();
        assert!(err.to_string().contains("15/06/2025"));
    }
}
