use chrono::{NaiveDate, SecondsFormat, Utc};

use crate::constants::DATE_FORMAT;

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Strict `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_date_accepts_iso_dates() {
        let date = parse_date("2024-02-29").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 2, 29));
    }

    #[test]
    fn test_parse_date_rejects_other_shapes() {
        for value in ["2023-02-29", "2024-2-1", "20240201", "2024-02-01T00:00:00", "", "yesterday"] {
            assert!(parse_date(value).is_none(), "{:?} should be rejected", value);
        }
    }

    #[test]
    fn test_format_date_round_trips() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(date), "2024-01-05");
    }

    #[test]
    fn test_now_rfc3339_is_utc() {
        assert!(now_rfc3339().ends_with('Z'));
    }
}
