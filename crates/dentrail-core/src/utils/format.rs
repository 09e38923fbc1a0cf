use std::cmp::Ordering;

use chrono::NaiveDate;

/// Round a 0-100 percentage to the nearest whole number for display
pub fn round_percent(percent: f64) -> u32 {
    if percent.is_nan() || percent <= 0.0 {
        0
    } else {
        percent.round() as u32
    }
}

/// Format a percentage as e.g. "33%"
pub fn format_percent(percent: f64) -> String {
    format!("{}%", round_percent(percent))
}

/// Long date used in session headings, e.g. "January 05, 2025"
pub fn format_date_long(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Short date used in provenance captions, e.g. "01/05/2025"
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Join dates in short form, comma separated
pub fn format_date_list(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(|d| format_date_short(*d))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Case-insensitive ordering for roster names, falling back to exact order
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_percent() {
        assert_eq!(round_percent(100.0 / 3.0), 33);
        assert_eq!(round_percent(200.0 / 3.0), 67);
        assert_eq!(round_percent(100.0), 100);
        assert_eq!(round_percent(0.0), 0);
        assert_eq!(round_percent(f64::NAN), 0);
        assert_eq!(format_percent(50.0), "50%");
    }

    #[test]
    fn test_format_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(format_date_long(date), "January 05, 2025");
        assert_eq!(format_date_short(date), "01/05/2025");

        let later = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        assert_eq!(format_date_list(&[date, later]), "01/05/2025, 02/10/2025");
        assert_eq!(format_date_list(&[]), "");
    }

    #[test]
    fn test_cmp_ignore_case() {
        let mut names = vec!["bob", "Alice", "alice", "Charlie"];
        names.sort_by(|a, b| cmp_ignore_case(a, b));
        assert_eq!(names, vec!["Alice", "alice", "bob", "Charlie"]);
    }
}
