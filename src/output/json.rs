use crate::core::{DateStyle, ResultRow};

pub(crate) fn output_results_json(rows: &[ResultRow], style: DateStyle) -> String {
    let output: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            let cached = row.cached_date();
            serde_json::json!({
                "url": row.url(),
                "indexed": row.indexed(),
                "status": row.status().key(),
                "cached_date": cached.and_then(|d| d.date()).map(|d| style.format(d)),
                "cached_date_raw": cached.map(|d| d.raw()),
                "recently_indexed": row.recently_indexed(),
                "note": row.note(),
            })
        })
        .collect();
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::core::{CacheDate, RowStatus};

    #[test]
    fn json_fields() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let rows = vec![
            ResultRow::new(
                "https://example.com/a",
                RowStatus::Indexed,
                Some(CacheDate::Parsed {
                    date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                    raw: "Jun 1, 2025".to_string(),
                }),
                None,
                today,
            ),
            ResultRow::new("https://example.com/b", RowStatus::Blocked, None, None, today),
        ];
        let json: serde_json::Value =
            serde_json::from_str(&output_results_json(&rows, DateStyle::Iso)).unwrap();
        let arr = json.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["indexed"], true);
        assert_eq!(arr[0]["cached_date"], "2025-06-01");
        assert_eq!(arr[0]["cached_date_raw"], "Jun 1, 2025");
        assert_eq!(arr[0]["recently_indexed"], "Yes");
        assert_eq!(arr[1]["status"], "blocked");
        assert_eq!(arr[1]["indexed"], false);
        assert!(arr[1]["cached_date"].is_null());
        assert!(arr[1]["note"].as_str().unwrap().contains("delay"));
    }
}
