use chrono::{Duration, NaiveDate};

use crate::consts::RECENT_WINDOW_DAYS;

use super::types::{CacheDate, Recency};

/// Inclusive `[today - 30 days, today]` window
#[derive(Debug, Clone, Copy)]
pub(crate) struct RecentWindow {
    since: NaiveDate,
    until: NaiveDate,
}

impl RecentWindow {
    pub(crate) fn ending(today: NaiveDate) -> Self {
        Self {
            since: today - Duration::days(RECENT_WINDOW_DAYS),
            until: today,
        }
    }

    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        date >= self.since && date <= self.until
    }
}

/// No date at all is `No`: missing cache evidence is treated as not confirmed-recent.
/// A date that could not be parsed is `Unknown`.
pub(crate) fn classify_recency(cached: Option<&CacheDate>, today: NaiveDate) -> Recency {
    match cached {
        None => Recency::No,
        Some(CacheDate::Unparsed { .. }) => Recency::Unknown,
        Some(CacheDate::Parsed { date, .. }) => {
            if RecentWindow::ending(today).contains(*date) {
                Recency::Yes
            } else {
                Recency::No
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn days_ago(n: i64) -> CacheDate {
        let date = today() - Duration::days(n);
        CacheDate::Parsed {
            date,
            raw: date.to_string(),
        }
    }

    #[test]
    fn ten_days_ago_is_recent() {
        assert_eq!(classify_recency(Some(&days_ago(10)), today()), Recency::Yes);
    }

    #[test]
    fn thirty_days_ago_is_inclusive() {
        assert_eq!(classify_recency(Some(&days_ago(30)), today()), Recency::Yes);
    }

    #[test]
    fn thirty_one_days_ago_is_not_recent() {
        assert_eq!(classify_recency(Some(&days_ago(31)), today()), Recency::No);
    }

    #[test]
    fn today_is_recent() {
        assert_eq!(classify_recency(Some(&days_ago(0)), today()), Recency::Yes);
    }

    #[test]
    fn future_date_is_outside_window() {
        assert_eq!(classify_recency(Some(&days_ago(-1)), today()), Recency::No);
    }

    #[test]
    fn missing_date_is_no() {
        assert_eq!(classify_recency(None, today()), Recency::No);
    }

    #[test]
    fn unparsed_date_is_unknown() {
        let raw = CacheDate::Unparsed {
            raw: "sometime last spring".to_string(),
        };
        assert_eq!(classify_recency(Some(&raw), today()), Recency::Unknown);
    }

    #[test]
    fn classification_is_deterministic_for_fixed_today() {
        let date = days_ago(12);
        let first = classify_recency(Some(&date), today());
        let second = classify_recency(Some(&date), today());
        assert_eq!(first, second);
    }
}
